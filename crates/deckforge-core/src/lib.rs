//! Deckforge Core Library
//!
//! Platform-agnostic slide-editing core: the deck data model, pointer-driven
//! geometry sessions, selection and grouping, and snapshot undo/redo.

pub mod arrange;
pub mod config;
pub mod deck;
pub mod editor;
pub mod elements;
pub mod error;
pub mod history;
pub mod input;
pub mod mapper;
pub mod selection;
pub mod slide;
pub mod transform;

pub use arrange::{Alignment, Axis, Restack};
pub use config::EditorConfig;
pub use deck::Deck;
pub use editor::Editor;
pub use elements::{
    Element, ElementId, ElementKind, ElementPayload, Geometry, GroupId, NewElement, SerializableColor,
    ShapeKind, SizeLimits,
};
pub use error::{DeckError, DeckResult};
pub use history::{DEFAULT_HISTORY_CAPACITY, History, HistoryMode};
pub use input::{Modifiers, PointerEvent};
pub use mapper::CoordinateMapper;
pub use selection::Selection;
pub use slide::{Group, Slide, SlideId};
pub use transform::{
    FrameThrottle, HandleKind, Instant, LiveTransform, ResizeHandle, SessionOutcome, TransformEngine,
};
