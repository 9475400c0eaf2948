//! Screen to canvas coordinate conversion.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest accepted scale factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest accepted scale factor.
pub const MAX_SCALE: f64 = 10.0;

/// Maps pointer positions between screen space and canvas logical space.
///
/// Screen positions are relative to the top-left corner of the canvas
/// viewport, so the mapping is a uniform scale with no translation.
/// `screen = canvas * scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    scale: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl CoordinateMapper {
    /// Create a mapper with the given scale (clamped to the accepted range).
    pub fn new(scale: f64) -> Self {
        let mut mapper = Self::default();
        mapper.set_scale(scale);
        mapper
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Update the scale factor.
    ///
    /// Non-finite or non-positive values are ignored; others are clamped to
    /// `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("Ignoring invalid canvas scale {scale}");
            return;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Canvas to screen transform, for renderers.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(screen_point.x / self.scale, screen_point.y / self.scale)
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a pointer delta from screen pixels to canvas units.
    pub fn delta_to_canvas(&self, screen_delta: Vec2) -> Vec2 {
        screen_delta / self.scale
    }

    /// Convert a length (such as a hit tolerance) from screen pixels to
    /// canvas units.
    pub fn length_to_canvas(&self, screen_length: f64) -> f64 {
        screen_length / self.scale
    }
}
