mod commands;

use thiserror::Error;

use crate::element::ShapeId;

pub use commands::{Command, TextEdit};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur during command execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The command names a shape that is not in the document
    #[error("shape {0} not found")]
    ShapeNotFound(ShapeId),
    /// Text edits only apply to text shapes
    #[error("shape {0} is not a text shape")]
    NotText(ShapeId),
    /// The command parameters are invalid
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
