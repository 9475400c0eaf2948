//! Error types for the I/O boundary of the editor core.
//!
//! Editing operations never fail: invalid requests are clamped or ignored.
//! Only loading and saving values (configuration, decks) can produce errors.

use thiserror::Error;

/// Errors raised while loading or saving editor data.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fallible load/save operations.
pub type DeckResult<T> = Result<T, DeckError>;
