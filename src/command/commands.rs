use std::collections::HashSet;

use egui::Vec2;

use super::{CommandError, CommandResult};
use crate::document::Document;
use crate::element::{Shape, ShapeId};
use crate::properties::PropertyChange;

/// A live edit to the content of a text shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TextEdit {
    Append(String),
    Newline,
    Backspace,
}

/// Mutations of the document. Every successful command is followed by one save.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a shape on top of the document
    AddShape(Shape),

    RemoveShapes(HashSet<ShapeId>),

    /// Translate several shapes by the same delta
    MoveShapes { ids: HashSet<ShapeId>, delta: Vec2 },

    /// Change one visual attribute of a shape
    SetStyle { id: ShapeId, change: PropertyChange },

    EditText { id: ShapeId, edit: TextEdit },

    /// Remove everything
    Clear,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddShape(_) => "add_shape",
            Command::RemoveShapes(_) => "remove_shapes",
            Command::MoveShapes { .. } => "move_shapes",
            Command::SetStyle { .. } => "set_style",
            Command::EditText { .. } => "edit_text",
            Command::Clear => "clear",
        }
    }

    /// Execute the command against the document
    pub fn execute(&self, document: &mut Document) -> CommandResult {
        match self {
            Command::AddShape(shape) => {
                if document.contains(shape.id) {
                    return Err(CommandError::InvalidParameters(format!(
                        "shape {} already exists",
                        shape.id
                    )));
                }
                document.add(shape.clone());
                Ok(())
            }

            Command::RemoveShapes(ids) => {
                if ids.is_empty() {
                    return Err(CommandError::InvalidParameters("nothing to remove".to_owned()));
                }
                document.remove(ids);
                Ok(())
            }

            Command::MoveShapes { ids, delta } => {
                if !delta.is_finite() {
                    return Err(CommandError::InvalidParameters(format!("bad delta {delta:?}")));
                }
                document.translate(ids, *delta);
                Ok(())
            }

            Command::SetStyle { id, change } => {
                change.validate()?;
                let shape = document.get_mut(*id).ok_or(CommandError::ShapeNotFound(*id))?;
                change.apply(&mut shape.style);
                Ok(())
            }

            Command::EditText { id, edit } => {
                let shape = document.get_mut(*id).ok_or(CommandError::ShapeNotFound(*id))?;
                let text = shape.kind.as_text_mut().ok_or(CommandError::NotText(*id))?;
                match edit {
                    TextEdit::Append(typed) => text.push_str(typed),
                    TextEdit::Newline => text.push_str("\n"),
                    TextEdit::Backspace => {
                        text.pop_char();
                    }
                }
                Ok(())
            }

            Command::Clear => {
                document.clear();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, factory};
    use egui::{Color32, Pos2};

    #[test]
    fn set_style_on_missing_shape_fails() {
        let mut doc = Document::new();
        let id = ShapeId::new();
        let result = Command::SetStyle {
            id,
            change: PropertyChange::Stroke(Color32::RED),
        }
        .execute(&mut doc);
        assert_eq!(result, Err(CommandError::ShapeNotFound(id)));
    }

    #[test]
    fn text_edits_apply_in_order() {
        let mut doc = Document::new();
        let id = doc.add(factory::text(Pos2::ZERO, "ab", 20.0, Style::default()));
        for edit in [
            TextEdit::Backspace,
            TextEdit::Newline,
            TextEdit::Append("cd".to_owned()),
        ] {
            Command::EditText { id, edit }.execute(&mut doc).unwrap();
        }
        let text = doc.get(id).unwrap().kind.as_text().unwrap();
        assert_eq!(text.content, "a\ncd");
    }

    #[test]
    fn text_edit_on_rectangle_is_rejected() {
        let mut doc = Document::new();
        let id = doc.add(factory::rectangle(Pos2::ZERO, Vec2::splat(3.0), Style::default()));
        let result = Command::EditText {
            id,
            edit: TextEdit::Newline,
        }
        .execute(&mut doc);
        assert_eq!(result, Err(CommandError::NotText(id)));
    }

    #[test]
    fn invalid_opacity_leaves_style_alone() {
        let mut doc = Document::new();
        let id = doc.add(factory::circle(Pos2::ZERO, 2.0, Style::default()));
        let result = Command::SetStyle {
            id,
            change: PropertyChange::Opacity(1.5),
        }
        .execute(&mut doc);
        assert!(matches!(result, Err(CommandError::InvalidParameters(_))));
        assert_eq!(doc.get(id).unwrap().style.opacity, 1.0);
    }
}
