//! Eight-direction resize.

use super::handles::ResizeHandle;
use crate::elements::{Geometry, SizeLimits};
use kurbo::Vec2;

/// Resize `origin` by dragging `handle` by `delta` canvas units.
///
/// The edge opposite to a dragged `w`/`n` edge stays where it was: the new
/// origin is derived from the floored size. Size is floored at `limits` and
/// position at 0. Rotation is carried through.
pub fn resize(origin: Geometry, handle: ResizeHandle, delta: Vec2, limits: SizeLimits) -> Geometry {
    let mut width = origin.width;
    let mut height = origin.height;
    if handle.moves_right_edge() {
        width += delta.x;
    } else if handle.moves_left_edge() {
        width -= delta.x;
    }
    if handle.moves_bottom_edge() {
        height += delta.y;
    } else if handle.moves_top_edge() {
        height -= delta.y;
    }
    let width = width.max(limits.min_width);
    let height = height.max(limits.min_height);

    let x = if handle.moves_left_edge() {
        origin.x + (origin.width - width)
    } else {
        origin.x
    };
    let y = if handle.moves_top_edge() {
        origin.y + (origin.height - height)
    } else {
        origin.y
    };

    Geometry {
        x: x.max(0.0),
        y: y.max(0.0),
        width,
        height,
        rotation: origin.rotation,
    }
}

/// Uniform text scale implied by a resize: the mean of the two axis ratios.
pub fn text_scale(origin: &Geometry, resized: &Geometry) -> f64 {
    if origin.width <= 0.0 || origin.height <= 0.0 {
        return 1.0;
    }
    (resized.width / origin.width + resized.height / origin.height) / 2.0
}
