//! The gesture state machine of the canvas controller.
//!
//! # State Transitions
//!
//! ```text
//!              ┌──────────────┐
//!        ┌─────►   Drafting   ├─────┐
//!        │     └──────────────┘     │
//!        │     ┌──────────────┐     │
//!        ├─────►   Freehand   ├─────┤
//! ┌──────┴───┐ └──────────────┘ ┌───▼──────┐
//! │   Idle   │ ┌──────────────┐ │   Idle   │
//! │          ├─►    Moving    ├─►          │
//! └──────┬───┘ └──────────────┘ └───▲──────┘
//!        │     ┌──────────────┐     │
//!        └─────► EditingText  ├─────┘
//!              └──────────────┘
//! ```
//!
//! Every gesture starts from `Idle` and ends by returning to it.
use egui::Pos2;

use crate::element::{Shape, ShapeId};
use crate::tools::{FreehandCapture, Tool};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// No active gesture
    #[default]
    Idle,
    /// Sizing a draft shape with a drag tool
    Drafting { tool: Tool, anchor: Pos2, draft: Shape },
    /// Collecting pen points
    Freehand { capture: FreehandCapture },
    /// Dragging the selection; `moved` records whether anything changed
    Moving { last: Pos2, moved: bool },
    /// Live-editing the content of a text shape
    EditingText { id: ShapeId },
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            // From Idle, we can go to any state
            (EditorState::Idle, _) => true,
            // Everything else can only finish or cancel
            (_, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Drafting { .. } => "drafting",
            EditorState::Freehand { .. } => "freehand",
            EditorState::Moving { .. } => "moving",
            EditorState::EditingText { .. } => "editing_text",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    /// Id of the text being edited, if any
    pub fn editing_text(&self) -> Option<ShapeId> {
        match self {
            EditorState::EditingText { id } => Some(*id),
            _ => None,
        }
    }

    /// The uncommitted shape being drawn, for painting
    pub fn preview(&self) -> Option<Shape> {
        match self {
            EditorState::Drafting { draft, .. } => Some(draft.clone()),
            EditorState::Freehand { capture } => Some(capture.preview()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_reaches_every_state_and_back() {
        let editing = EditorState::EditingText { id: ShapeId::new() };
        let moving = EditorState::Moving {
            last: Pos2::ZERO,
            moved: false,
        };
        assert!(EditorState::Idle.can_transition_to(&editing));
        assert!(editing.can_transition_to(&EditorState::Idle));
        assert!(!editing.can_transition_to(&moving));
        assert!(!moving.can_transition_to(&moving.clone()));
    }
}
