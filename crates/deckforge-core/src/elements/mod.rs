//! Slide elements: the atomic manipulable units.

mod geometry;
mod payload;

pub use geometry::{Geometry, MIN_HEIGHT, MIN_WIDTH, SizeLimits, normalize_degrees};
pub use payload::{ElementKind, ElementPayload, ShapeKind};

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = String;
/// Unique identifier for groups.
pub type GroupId = String;

/// Generate a fresh unique id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// An element placed on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Stacking order, higher draws on top.
    #[serde(default)]
    pub z_index: i64,
    /// Group this element belongs to. Derived from the slide's groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(flatten)]
    pub payload: ElementPayload,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        self.payload.kind()
    }

    pub fn is_text(&self) -> bool {
        self.kind() == ElementKind::Text
    }

    /// Unrotated bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    /// Check if a canvas point hits the (rotated) element box.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.geometry.to_local(point);
        self.bounds().inflate(tolerance, tolerance).contains(local)
    }

    /// Font size of a text element.
    pub fn font_size(&self) -> Option<f64> {
        match &self.payload {
            ElementPayload::Text { font_size, .. } => Some(*font_size),
            _ => None,
        }
    }

    /// Letter spacing of a text element, if set.
    pub fn letter_spacing(&self) -> Option<f64> {
        match &self.payload {
            ElementPayload::Text { letter_spacing, .. } => *letter_spacing,
            _ => None,
        }
    }

    /// Overwrite the text metrics. Ignored for non-text elements.
    pub fn set_text_metrics(&mut self, new_font_size: f64, new_letter_spacing: Option<f64>) {
        if let ElementPayload::Text {
            font_size,
            letter_spacing,
            ..
        } = &mut self.payload
        {
            *font_size = new_font_size;
            if new_letter_spacing.is_some() {
                *letter_spacing = new_letter_spacing;
            }
        }
    }

    /// Replace the id with a fresh one.
    pub fn regenerate_id(&mut self) {
        self.id = new_id();
    }
}

/// Element handed to the core by a collaborator, before it has an id or a
/// stacking position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewElement {
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(flatten)]
    pub payload: ElementPayload,
}

impl NewElement {
    pub fn new(geometry: Geometry, payload: ElementPayload) -> Self {
        Self { geometry, payload }
    }

    /// Text element with the given font size.
    pub fn text(geometry: Geometry, content: impl Into<String>, font_size: f64) -> Self {
        Self::new(geometry, ElementPayload::text(content, font_size))
    }

    /// Rectangle shape element.
    pub fn rectangle(geometry: Geometry) -> Self {
        Self::new(geometry, ElementPayload::shape(ShapeKind::Rectangle))
    }

    /// Turn into a placed element with a fresh id. Geometry is clamped.
    pub fn into_element(self, z_index: i64, limits: SizeLimits) -> Element {
        Element {
            id: new_id(),
            geometry: self.geometry.clamped(limits),
            z_index,
            group_id: None,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_element() -> Element {
        NewElement::text(Geometry::new(10.0, 20.0, 200.0, 80.0), "Title", 32.0)
            .into_element(1, SizeLimits::default())
    }

    #[test]
    fn test_into_element_assigns_unique_ids() {
        let a = text_element();
        let b = text_element();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_into_element_clamps_geometry() {
        let element = NewElement::rectangle(Geometry::new(-4.0, 3.0, 10.0, 10.0))
            .into_element(1, SizeLimits::default());
        assert_eq!(element.geometry, Geometry::new(0.0, 3.0, 50.0, 30.0));
    }

    #[test]
    fn test_text_metrics() {
        let mut element = text_element();
        assert_eq!(element.font_size(), Some(32.0));
        assert_eq!(element.letter_spacing(), None);

        element.set_text_metrics(40.0, Some(1.5));
        assert_eq!(element.font_size(), Some(40.0));
        assert_eq!(element.letter_spacing(), Some(1.5));

        let mut shape = NewElement::rectangle(Geometry::new(0.0, 0.0, 60.0, 40.0))
            .into_element(2, SizeLimits::default());
        shape.set_text_metrics(40.0, None);
        assert_eq!(shape.font_size(), None);
    }

    #[test]
    fn test_hit_test_rotated() {
        let mut element = NewElement::rectangle(Geometry::new(0.0, 40.0, 200.0, 20.0))
            .into_element(1, SizeLimits::default());
        // Far right end of the unrotated bar.
        assert!(element.hit_test(Point::new(190.0, 50.0), 0.0));

        element.geometry.rotation = 90.0;
        // Now the bar is vertical around (100, 50).
        assert!(!element.hit_test(Point::new(190.0, 50.0), 0.0));
        assert!(element.hit_test(Point::new(100.0, 140.0), 0.0));
    }

    #[test]
    fn test_json_field_names() {
        let element = text_element();
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["fontSize"], 32.0);
        assert_eq!(json["x"], 10.0);
        assert!(json.get("groupId").is_none());

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }
}
