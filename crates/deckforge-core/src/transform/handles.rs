//! Manipulation handles around an element.

use crate::elements::Element;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance from the top edge to the rotation handle (in canvas units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// The eight resize handles, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::NW,
        Self::NE,
        Self::SW,
        Self::SE,
        Self::N,
        Self::S,
        Self::E,
        Self::W,
    ];

    /// Whether dragging moves the left edge (the right edge stays anchored).
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    pub fn moves_right_edge(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    /// Whether dragging moves the top edge (the bottom edge stays anchored).
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    pub fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }

    /// Handle position in the element's unrotated frame, as fractions of
    /// width and height from the top-left corner.
    fn anchor(self) -> (f64, f64) {
        match self {
            Self::N => (0.5, 0.0),
            Self::S => (0.5, 1.0),
            Self::E => (1.0, 0.5),
            Self::W => (0.0, 0.5),
            Self::NE => (1.0, 0.0),
            Self::NW => (0.0, 0.0),
            Self::SE => (1.0, 1.0),
            Self::SW => (0.0, 1.0),
        }
    }
}

/// What a pointer-down on an element grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "handle", content = "direction", rename_all = "lowercase")]
pub enum HandleKind {
    /// The element body: drag.
    Body,
    Resize(ResizeHandle),
    Rotate,
}

/// A handle with its position in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a canvas point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Resize handles plus the rotation handle, rotated with the element.
pub fn handles(element: &Element) -> Vec<Handle> {
    let geometry = &element.geometry;
    let mut handles: Vec<Handle> = ResizeHandle::ALL
        .iter()
        .map(|&resize| {
            let (fx, fy) = resize.anchor();
            let local = Point::new(
                geometry.x + geometry.width * fx,
                geometry.y + geometry.height * fy,
            );
            Handle::new(geometry.to_canvas(local), HandleKind::Resize(resize))
        })
        .collect();

    // Rotation handle: above top-center
    let rotate = Point::new(
        geometry.x + geometry.width / 2.0,
        geometry.y - ROTATE_HANDLE_OFFSET,
    );
    handles.push(Handle::new(geometry.to_canvas(rotate), HandleKind::Rotate));
    handles
}

/// Hit test the handles of an element. Corners win over edges.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// The handle under a canvas point, `Body` inside the element, or `None`.
pub fn handle_at(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    hit_test_handles(element, point, tolerance)
        .or_else(|| element.hit_test(point, 0.0).then_some(HandleKind::Body))
}
