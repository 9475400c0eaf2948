//! Alignment, distribution and stacking order of elements on a slide.

use crate::elements::{Element, ElementId};
use crate::slide::Slide;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shared edge or center to align elements on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Direction to distribute elements along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Minimum number of elements alignment applies to.
pub const MIN_ALIGN: usize = 2;
/// Minimum number of elements distribution applies to.
pub const MIN_DISTRIBUTE: usize = 3;

fn existing<'a>(slide: &'a Slide, ids: &[ElementId]) -> Vec<&'a Element> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| slide.element(id))
        .collect()
}

/// Union bounding box of a set of elements.
pub fn union_bounds<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Rect> {
    elements
        .into_iter()
        .map(Element::bounds)
        .reduce(|acc, bounds| acc.union(bounds))
}

/// New origins that align the given elements on a shared edge or center.
///
/// Unknown ids are ignored. Fewer than two elements yield nothing.
pub fn alignment_targets(slide: &Slide, ids: &[ElementId], alignment: Alignment) -> Vec<(ElementId, Point)> {
    let elements = existing(slide, ids);
    if elements.len() < MIN_ALIGN {
        return Vec::new();
    }
    let Some(bounds) = union_bounds(elements.iter().copied()) else {
        return Vec::new();
    };

    elements
        .into_iter()
        .map(|element| {
            let g = &element.geometry;
            let origin = match alignment {
                Alignment::Left => Point::new(bounds.x0, g.y),
                Alignment::Center => Point::new(bounds.center().x - g.width / 2.0, g.y),
                Alignment::Right => Point::new(bounds.x1 - g.width, g.y),
                Alignment::Top => Point::new(g.x, bounds.y0),
                Alignment::Middle => Point::new(g.x, bounds.center().y - g.height / 2.0),
                Alignment::Bottom => Point::new(g.x, bounds.y1 - g.height),
            };
            (element.id.clone(), origin)
        })
        .collect()
}

/// New origins that space the given elements evenly along `axis`.
///
/// Elements are sorted by their leading edge; the first and last stay put
/// and the ones between are moved so that the gaps between consecutive
/// boxes are equal. Only the moved elements are returned. Unknown ids are
/// ignored. Fewer than three elements yield nothing.
pub fn distribution_targets(slide: &Slide, ids: &[ElementId], axis: Axis) -> Vec<(ElementId, Point)> {
    let mut elements = existing(slide, ids);
    if elements.len() < MIN_DISTRIBUTE {
        return Vec::new();
    }

    let leading = |e: &Element| match axis {
        Axis::Horizontal => e.geometry.x,
        Axis::Vertical => e.geometry.y,
    };
    let extent = |e: &Element| match axis {
        Axis::Horizontal => e.geometry.width,
        Axis::Vertical => e.geometry.height,
    };
    elements.sort_by(|a, b| leading(*a).total_cmp(&leading(*b)));

    let first = elements[0];
    let last = elements[elements.len() - 1];
    let inner = &elements[1..elements.len() - 1];
    let inner_extent: f64 = inner.iter().map(|e| extent(*e)).sum();
    let free = leading(last) - (leading(first) + extent(first)) - inner_extent;
    let gap = free / (elements.len() - 1) as f64;

    let mut cursor = leading(first) + extent(first) + gap;
    inner
        .iter()
        .map(|element| {
            let g = &element.geometry;
            let origin = match axis {
                Axis::Horizontal => Point::new(cursor, g.y),
                Axis::Vertical => Point::new(g.x, cursor),
            };
            cursor += extent(*element) + gap;
            (element.id.clone(), origin)
        })
        .collect()
}

/// Direction of a stacking change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restack {
    /// Above every other element.
    ToFront,
    /// Below every other element.
    ToBack,
    /// Swap with the nearest element above.
    Forward,
    /// Swap with the nearest element below.
    Backward,
}

/// Change the stacking order of the given elements.
///
/// Relative order inside the moved set is preserved. When the order changes
/// every element on the slide is renumbered `1..=n`. Returns false when the
/// order is unchanged.
pub fn restack(slide: &mut Slide, ids: &[ElementId], direction: Restack) -> bool {
    let moving: BTreeSet<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| slide.contains(id))
        .collect();
    if moving.is_empty() {
        return false;
    }

    let before: Vec<ElementId> = slide.elements_ordered().iter().map(|e| e.id.clone()).collect();
    let mut order = before.clone();
    let is_moving = |id: &ElementId| moving.contains(id.as_str());

    match direction {
        Restack::ToFront => {
            let (mut rest, front): (Vec<_>, Vec<_>) = order.into_iter().partition(|id| !is_moving(id));
            rest.extend(front);
            order = rest;
        }
        Restack::ToBack => {
            let (mut back, rest): (Vec<_>, Vec<_>) = order.into_iter().partition(|id| is_moving(id));
            back.extend(rest);
            order = back;
        }
        Restack::Forward => {
            for i in (0..order.len().saturating_sub(1)).rev() {
                if is_moving(&order[i]) && !is_moving(&order[i + 1]) {
                    order.swap(i, i + 1);
                }
            }
        }
        Restack::Backward => {
            for i in 1..order.len() {
                if is_moving(&order[i]) && !is_moving(&order[i - 1]) {
                    order.swap(i, i - 1);
                }
            }
        }
    }

    if order == before {
        return false;
    }
    for (position, id) in order.iter().enumerate() {
        if let Some(element) = slide.element_mut(id) {
            element.z_index = position as i64 + 1;
        }
    }
    true
}
