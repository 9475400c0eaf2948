//! Keyboard shortcut registry and dispatch.

use deckforge_core::{Editor, Modifiers};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

/// Editor command bound to a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Group,
    Ungroup,
    SelectAll,
    Duplicate,
    Delete,
    ClearSelection,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press triggers this shortcut. Cmd counts as Ctrl.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutAction::*;
        vec![
            Shortcut::new("A", true, false, SelectAll, "Select all elements on the slide"),
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("G", true, false, Group, "Group selected elements"),
            Shortcut::new("G", true, true, Ungroup, "Ungroup selected elements"),
            Shortcut::new("D", true, false, Duplicate, "Duplicate selected elements"),
            Shortcut::new("Delete", false, false, Delete, "Delete selected elements"),
            Shortcut::new("Backspace", false, false, Delete, "Delete selected elements"),
            Shortcut::new("Escape", false, false, ClearSelection, "Clear the selection"),
        ]
    }

    /// Find the action bound to a key press.
    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.action)
    }

    /// Handle a key press. Returns true if a shortcut ran and changed
    /// something.
    pub fn dispatch(editor: &mut Editor, key: &str, modifiers: Modifiers) -> bool {
        let Some(action) = Self::lookup(key, modifiers) else {
            log::debug!("No shortcut bound to {key}");
            return false;
        };
        log::debug!("Shortcut {key} -> {action:?}");
        match action {
            ShortcutAction::Undo => editor.undo().is_some(),
            ShortcutAction::Redo => editor.redo().is_some(),
            ShortcutAction::Group => editor.group_selected().is_some(),
            ShortcutAction::Ungroup => editor.ungroup_selected().is_some(),
            ShortcutAction::SelectAll => {
                editor.select_all();
                !editor.selection().is_empty()
            }
            ShortcutAction::Duplicate => !editor.duplicate_selected().is_empty(),
            ShortcutAction::Delete => editor.delete_selected() > 0,
            ShortcutAction::ClearSelection => {
                let had_selection = !editor.selection().is_empty();
                editor.clear_selection();
                had_selection
            }
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
