//! JSON command scripts replayed against an [`Editor`].
//!
//! A script is a JSON array of commands tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "select", "id": "title" },
//!   { "op": "pointer", "elapsed_ms": 0,
//!     "event": { "kind": "down", "position": { "x": 120, "y": 80 } } },
//!   { "op": "key", "key": "z", "modifiers": { "ctrl": true } }
//! ]
//! ```

use crate::shortcuts::ShortcutRegistry;
use deckforge_core::{
    Alignment, Axis, DeckResult, Editor, ElementId, Instant, Modifiers, NewElement, PointerEvent,
    SlideId,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// A single scripted editor command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    SetScale {
        scale: f64,
    },
    Select {
        id: ElementId,
    },
    Toggle {
        id: ElementId,
    },
    SetSelection {
        ids: Vec<ElementId>,
    },
    SelectAll,
    ClearSelection,
    /// Pointer event, stamped `elapsed_ms` after the script started.
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        elapsed_ms: u64,
    },
    Align {
        alignment: Alignment,
    },
    Distribute {
        axis: Axis,
    },
    Group,
    Ungroup,
    Duplicate,
    Delete,
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
    /// Add elements to a slide (the current one when `slide` is omitted).
    AddElements {
        #[serde(default)]
        slide: Option<SlideId>,
        elements: Vec<NewElement>,
    },
    AddSlide,
    DuplicateSlide {
        #[serde(default)]
        id: Option<SlideId>,
    },
    DeleteSlide {
        #[serde(default)]
        id: Option<SlideId>,
    },
    MoveSlide {
        from: usize,
        to: usize,
    },
    SwitchSlide {
        id: SlideId,
    },
    Undo,
    Redo,
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl Command {
    /// Apply the command. Returns true if it had an effect.
    pub fn apply(&self, editor: &mut Editor, started: Instant) -> bool {
        match self {
            Command::SetScale { scale } => {
                editor.set_scale(*scale);
                true
            }
            Command::Select { id } => editor.select(id),
            Command::Toggle { id } => editor.toggle_selection(id),
            Command::SetSelection { ids } => {
                editor.set_selection(ids);
                !editor.selection().is_empty()
            }
            Command::SelectAll => {
                editor.select_all();
                !editor.selection().is_empty()
            }
            Command::ClearSelection => {
                editor.clear_selection();
                true
            }
            Command::Pointer { event, elapsed_ms } => {
                let now = started + Duration::from_millis(*elapsed_ms);
                editor.handle_pointer(*event, now)
            }
            Command::Align { alignment } => editor.align(*alignment),
            Command::Distribute { axis } => editor.distribute(*axis),
            Command::Group => editor.group_selected().is_some(),
            Command::Ungroup => editor.ungroup_selected().is_some(),
            Command::Duplicate => !editor.duplicate_selected().is_empty(),
            Command::Delete => editor.delete_selected() > 0,
            Command::BringToFront => editor.bring_to_front(),
            Command::SendToBack => editor.send_to_back(),
            Command::BringForward => editor.bring_forward(),
            Command::SendBackward => editor.send_backward(),
            Command::AddElements { slide, elements } => {
                let slide = slide
                    .clone()
                    .unwrap_or_else(|| editor.current_slide_id().clone());
                !editor.add_elements(&slide, elements.clone()).is_empty()
            }
            Command::AddSlide => {
                editor.add_slide();
                true
            }
            Command::DuplicateSlide { id } => {
                let id = id.clone().unwrap_or_else(|| editor.current_slide_id().clone());
                editor.duplicate_slide(&id).is_some()
            }
            Command::DeleteSlide { id } => {
                let id = id.clone().unwrap_or_else(|| editor.current_slide_id().clone());
                editor.delete_slide(&id)
            }
            Command::MoveSlide { from, to } => editor.move_slide(*from, *to),
            Command::SwitchSlide { id } => editor.set_current_slide(id),
            Command::Undo => editor.undo().is_some(),
            Command::Redo => editor.redo().is_some(),
            Command::Key { key, modifiers } => ShortcutRegistry::dispatch(editor, key, *modifiers),
        }
    }
}

/// An ordered list of commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_json(json: &str) -> DeckResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> DeckResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command in order. Returns how many had an effect.
    pub fn run(&self, editor: &mut Editor) -> usize {
        let started = Instant::now();
        let mut applied = 0;
        for (index, command) in self.commands.iter().enumerate() {
            if command.apply(editor, started) {
                applied += 1;
            } else {
                log::debug!("Command {index} had no effect: {command:?}");
            }
        }
        log::info!("Replayed {applied}/{} commands", self.commands.len());
        applied
    }
}
