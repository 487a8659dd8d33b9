#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod properties;
pub mod renderer;
pub mod state;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use command::{Command, CommandError};
pub use config::EditorConfig;
pub use document::Document;
pub use element::{Shape, ShapeId, ShapeKind, Style};
pub use error::ImageError;
pub use input::{InputEvent, InputLocation};
pub use renderer::Renderer;
pub use state::{DocumentStore, EditorContext, EditorState};
pub use tools::{Tool, ToolAction, ToolState};
