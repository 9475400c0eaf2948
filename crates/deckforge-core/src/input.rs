//! Pointer and keyboard input delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates relative to the canvas viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Window or focus loss: end any session at the last known position.
    Cancel,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. } | Self::Move { position, .. } | Self::Up { position, .. } => {
                Some(*position)
            }
            Self::Cancel => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::Down { modifiers, .. } | Self::Move { modifiers, .. } | Self::Up { modifiers, .. } => {
                *modifiers
            }
            Self::Cancel => Modifiers::NONE,
        }
    }
}
