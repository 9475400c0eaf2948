//! Editor configuration.

use crate::elements::SizeLimits;
use crate::error::{DeckError, DeckResult};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable parameters of the editing core.
///
/// Every field has a default, so a config file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum element width in canvas units.
    pub min_width: f64,
    /// Minimum element height in canvas units.
    pub min_height: f64,
    /// Smallest font size a text resize may commit.
    pub min_font_size: f64,
    /// Maximum number of history snapshots kept.
    pub history_capacity: usize,
    /// Minimum time between two live updates of a session.
    pub frame_interval_ms: u64,
    /// Rotation increment used while the snap modifier is held.
    pub rotation_snap_degrees: f64,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: Vec2,
    /// Handle hit radius in screen pixels.
    pub handle_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_width: 50.0,
            min_height: 30.0,
            min_font_size: 8.0,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            frame_interval_ms: 16,
            rotation_snap_degrees: 15.0,
            duplicate_offset: Vec2::new(20.0, 20.0),
            handle_tolerance: 8.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> DeckResult<()> {
        if !(self.min_width > 0.0 && self.min_height > 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "minimum size must be positive, got {}x{}",
                self.min_width, self.min_height
            )));
        }
        if !(self.min_font_size > 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "min_font_size must be positive, got {}",
                self.min_font_size
            )));
        }
        if self.history_capacity == 0 {
            return Err(DeckError::InvalidConfig(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        if !(self.rotation_snap_degrees > 0.0) {
            return Err(DeckError::InvalidConfig(format!(
                "rotation_snap_degrees must be positive, got {}",
                self.rotation_snap_degrees
            )));
        }
        if !self.handle_tolerance.is_finite() || self.handle_tolerance < 0.0 {
            return Err(DeckError::InvalidConfig(format!(
                "handle_tolerance must be a non-negative number, got {}",
                self.handle_tolerance
            )));
        }
        Ok(())
    }

    /// Size floor applied to every committed geometry.
    pub fn size_limits(&self) -> SizeLimits {
        SizeLimits::new(self.min_width, self.min_height)
    }

    /// Interval of the live-update throttle.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert!((config.min_width - 50.0).abs() < f64::EPSILON);
        assert!((config.min_height - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "history_capacity": 10 }"#).unwrap();
        assert_eq!(config.history_capacity, 10);
        assert!((config.rotation_snap_degrees - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EditorConfig::from_json(r#"{ "history_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, DeckError::InvalidConfig(_)));

        let err = EditorConfig::from_json(r#"{ "min_width": -5.0 }"#).unwrap_err();
        assert!(matches!(err, DeckError::InvalidConfig(_)));

        let err = EditorConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, DeckError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frame_interval_ms": 33, "min_font_size": 10.0 }}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.frame_interval_ms, 33);
        assert!((config.min_font_size - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DeckError::Io(_)));
    }
}
