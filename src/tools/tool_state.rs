use egui::Color32;

use super::Tool;
use crate::element::Style;

/// Session-scoped tool settings. Never persisted.
///
/// The controller receives a `ToolState` with every event and hands back the
/// updated value; nothing mutates it in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub active: Tool,
    pub stroke: Color32,
    pub fill: Option<Color32>,
    pub stroke_width: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: Tool::Select,
            stroke: Color32::BLACK,
            fill: None,
            stroke_width: 2,
        }
    }
}

/// Every way the tool state can change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAction {
    SelectTool(Tool),
    SetStroke(Color32),
    SetFill(Option<Color32>),
    /// Clamped into the allowed width range
    SetStrokeWidth { width: u32, min: u32, max: u32 },
}

impl ToolState {
    #[must_use]
    pub fn apply(self, action: ToolAction) -> Self {
        match action {
            ToolAction::SelectTool(active) => Self { active, ..self },
            ToolAction::SetStroke(stroke) => Self { stroke, ..self },
            ToolAction::SetFill(fill) => Self { fill, ..self },
            ToolAction::SetStrokeWidth { width, min, max } => Self {
                stroke_width: width.clamp(min, max),
                ..self
            },
        }
    }

    /// Style for a newly created shape.
    pub fn style(&self) -> Style {
        Style {
            stroke: self.stroke,
            fill: self.fill,
            stroke_width: self.stroke_width,
            opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let state = ToolState::default();
        assert_eq!(state.active, Tool::Select);
        assert_eq!(state.stroke, Color32::BLACK);
        assert_eq!(state.fill, None);
        assert_eq!(state.stroke_width, 2);
    }

    #[test]
    fn apply_returns_a_new_value() {
        let before = ToolState::default();
        let after = before
            .apply(ToolAction::SelectTool(Tool::Circle))
            .apply(ToolAction::SetFill(Some(Color32::RED)));
        assert_eq!(before.active, Tool::Select);
        assert_eq!(after.active, Tool::Circle);
        assert_eq!(after.style().fill, Some(Color32::RED));
    }

    #[test]
    fn stroke_width_is_clamped() {
        let state = ToolState::default();
        let wide = state.apply(ToolAction::SetStrokeWidth { width: 99, min: 1, max: 20 });
        let thin = state.apply(ToolAction::SetStrokeWidth { width: 0, min: 1, max: 20 });
        assert_eq!(wide.stroke_width, 20);
        assert_eq!(thin.stroke_width, 1);
    }
}
