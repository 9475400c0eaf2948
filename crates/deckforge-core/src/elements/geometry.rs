//! Element geometry in canvas logical space.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default minimum element width.
pub const MIN_WIDTH: f64 = 50.0;
/// Default minimum element height.
pub const MIN_HEIGHT: f64 = 30.0;

/// Minimum size every committed geometry is floored at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl SizeLimits {
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(MIN_WIDTH, MIN_HEIGHT)
    }
}

/// Position, size and rotation of an element.
///
/// `x`/`y` is the top-left corner of the unrotated box. Rotation is in
/// degrees, clockwise, around the box center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned box, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Floor the size at the limits and the position at 0.
    ///
    /// Non-finite values collapse to the floor.
    pub fn clamped(self, limits: SizeLimits) -> Self {
        Self {
            x: finite_or_zero(self.x).max(0.0),
            y: finite_or_zero(self.y).max(0.0),
            width: finite_or_zero(self.width).max(limits.min_width),
            height: finite_or_zero(self.height).max(limits.min_height),
            rotation: finite_or_zero(self.rotation),
        }
    }

    pub fn is_valid(&self, limits: SizeLimits) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= limits.min_width
            && self.height >= limits.min_height
    }

    /// Map a canvas point into the element's unrotated frame.
    pub fn to_local(&self, point: Point) -> Point {
        if self.rotation == 0.0 {
            return point;
        }
        let center = self.center();
        let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }

    /// Map a point from the element's unrotated frame to the canvas.
    pub fn to_canvas(&self, local: Point) -> Point {
        if self.rotation == 0.0 {
            return local;
        }
        let center = self.center();
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let dx = local.x - center.x;
        let dy = local.y - center.y;
        Point::new(
            center.x + dx * cos - dy * sin,
            center.y + dx * sin + dy * cos,
        )
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}
