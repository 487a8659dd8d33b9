use egui::Color32;

use crate::command::CommandError;
use crate::element::{Shape, ShapeId, Style};

/// Editable attributes of the single selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeProperties {
    pub id: ShapeId,
    pub kind: &'static str,
    pub stroke: Color32,
    pub fill: Option<Color32>,
    pub stroke_width: u32,
    pub opacity: f32,
}

impl ShapeProperties {
    pub fn of(shape: &Shape) -> Self {
        Self {
            id: shape.id,
            kind: shape.kind_name(),
            stroke: shape.style.stroke,
            fill: shape.style.fill,
            stroke_width: shape.style.stroke_width,
            opacity: shape.style.opacity,
        }
    }

    /// Opacity as a whole percentage for display.
    pub fn opacity_percent(&self) -> u32 {
        (self.opacity * 100.0).round() as u32
    }
}

/// A single write from the property editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyChange {
    Stroke(Color32),
    /// `None` removes the fill
    Fill(Option<Color32>),
    StrokeWidth(u32),
    Opacity(f32),
}

impl PropertyChange {
    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            PropertyChange::StrokeWidth(0) => Err(CommandError::InvalidParameters(
                "stroke width must be positive".to_owned(),
            )),
            PropertyChange::Opacity(opacity) if !(0.0..=1.0).contains(opacity) => Err(
                CommandError::InvalidParameters(format!("opacity {opacity} outside 0..=1")),
            ),
            _ => Ok(()),
        }
    }

    pub fn apply(&self, style: &mut Style) {
        match *self {
            PropertyChange::Stroke(color) => style.stroke = color,
            PropertyChange::Fill(fill) => style.fill = fill,
            PropertyChange::StrokeWidth(width) => style.stroke_width = width,
            PropertyChange::Opacity(opacity) => style.opacity = opacity,
        }
    }
}
