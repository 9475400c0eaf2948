//! Type-specific element content.
//!
//! The editing core only reads the text metrics; everything else is carried
//! through untouched for the renderers.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Icon,
    Table,
    Code,
}

/// Primitive drawn by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
    Arrow,
    Star,
}

/// Content of an element, tagged by its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ElementPayload {
    Text {
        content: String,
        font_size: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        letter_spacing: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<SerializableColor>,
    },
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Shape {
        shape: ShapeKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<SerializableColor>,
    },
    Icon {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<SerializableColor>,
    },
    Table {
        rows: u32,
        columns: u32,
        #[serde(default)]
        cells: Vec<Vec<String>>,
    },
    Code {
        language: String,
        source: String,
    },
}

impl ElementPayload {
    /// Text content with the given font size.
    pub fn text(content: impl Into<String>, font_size: f64) -> Self {
        Self::Text {
            content: content.into(),
            font_size,
            letter_spacing: None,
            color: None,
        }
    }

    pub fn shape(shape: ShapeKind) -> Self {
        Self::Shape { shape, fill: None }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self::Image {
            src: src.into(),
            alt: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::Shape { .. } => ElementKind::Shape,
            Self::Icon { .. } => ElementKind::Icon,
            Self::Table { .. } => ElementKind::Table,
            Self::Code { .. } => ElementKind::Code,
        }
    }
}
