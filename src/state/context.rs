//! The interaction controller: turns canvas input into document mutations.
//!
//! `EditorContext` owns the document, the selection and the gesture state.
//! Tool settings are not part of it; every call to [`EditorContext::handle_event`]
//! receives the current [`ToolState`] and returns the possibly updated one.

use std::collections::HashSet;

use egui::{Key, Modifiers, PointerButton, Pos2, Vec2};
use thiserror::Error;

use super::EditorState;
use super::persistence::{DocumentStore, LoadOutcome};
use crate::command::{Command, TextEdit};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{Shape, ShapeId, Style, factory};
use crate::error::ImageError;
use crate::file_handler::ImagePayload;
use crate::input::InputEvent;
use crate::properties::{PropertyChange, ShapeProperties};
use crate::tools::{FreehandCapture, Gesture, Placement, Tool, ToolAction, ToolState};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateTransitionError {
    /// The requested state transition is not allowed from the current state
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A recoverable problem the user should hear about.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Work the controller needs the application shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Open the file picker and load an image
    PickImage,
}

/// Outcome of handling one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub tools: ToolState,
    pub request: Option<Request>,
}

/// The main context for the editor.
#[derive(Debug)]
pub struct EditorContext {
    state: EditorState,
    document: Document,
    selection: HashSet<ShapeId>,
    store: DocumentStore,
    config: EditorConfig,
    notices: Vec<Notice>,
    clear_pending: bool,
    image_pending: bool,
}

impl EditorContext {
    /// Creates a context and loads whatever the store holds.
    ///
    /// An unreadable blob is not fatal: the session starts with an empty document
    /// and a warning notice.
    pub fn new(store: DocumentStore, config: EditorConfig) -> Self {
        let mut notices = Vec::new();
        let document = match store.load() {
            LoadOutcome::Empty => Document::new(),
            LoadOutcome::Loaded(document) => document,
            LoadOutcome::Recovered { reason } => {
                log::warn!("Discarding unreadable saved drawing: {}", reason);
                notices.push(Notice::warning(
                    "The saved drawing could not be read, starting with an empty canvas",
                ));
                Document::new()
            }
        };

        Self {
            state: EditorState::Idle,
            document,
            selection: HashSet::new(),
            store,
            config,
            notices,
            clear_pending: false,
            image_pending: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn selection(&self) -> &HashSet<ShapeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// True while the clear confirmation dialog should be shown
    pub fn is_clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub fn is_image_pending(&self) -> bool {
        self.image_pending
    }

    /// Attempts to transition to a new state, validating the transition.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state.name(),
                to: new_state.name(),
            });
        }
        log::debug!("Gesture state {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        Ok(())
    }

    /// Ends the current gesture and hands back the state it was in.
    fn return_to_idle(&mut self) -> EditorState {
        let previous = std::mem::take(&mut self.state);
        if !previous.is_idle() {
            log::debug!("Gesture state {} -> idle", previous.name());
        }
        previous
    }

    fn begin(&mut self, new_state: EditorState) {
        if let Err(err) = self.transition_to(new_state) {
            log::warn!("Ignoring gesture: {}", err);
        }
    }

    /// Run a command against the document without saving.
    fn apply(&mut self, command: Command) -> bool {
        let name = command.name();
        match command.execute(&mut self.document) {
            Ok(()) => {
                self.selection.retain(|id| self.document.contains(*id));
                true
            }
            Err(err) => {
                log::warn!("Command {} failed: {}", name, err);
                false
            }
        }
    }

    /// Run a command and save the document if it succeeded.
    pub fn execute(&mut self, command: Command) -> bool {
        let applied = self.apply(command);
        if applied {
            self.persist();
        }
        applied
    }

    /// Write the whole document to the store.
    pub fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.document) {
            log::error!("Failed to save drawing: {}", err);
            self.notices
                .push(Notice::warning(format!("Changes could not be saved: {err}")));
        }
    }

    /// Feed one input event through the controller.
    pub fn handle_event(&mut self, tools: ToolState, event: &InputEvent) -> Response {
        let mut response = Response {
            tools,
            request: None,
        };

        match event {
            InputEvent::PointerDown {
                location,
                button,
                modifiers,
            } => {
                if *button == PointerButton::Primary && location.is_in_canvas() {
                    self.pointer_down(&mut response, location.position, *modifiers);
                }
            }
            InputEvent::PointerMove { location, .. } => self.pointer_move(location.position),
            InputEvent::PointerUp {
                location,
                button: PointerButton::Primary,
            } => self.pointer_up(location.position),
            InputEvent::DoubleClick { location } => {
                if location.is_in_canvas() && tools.active == Tool::Select {
                    self.double_click(location.position);
                }
            }
            InputEvent::Key { key, modifiers } => self.key_pressed(&mut response, *key, *modifiers),
            InputEvent::Text(text) => {
                if let Some(id) = self.state.editing_text() {
                    self.execute(Command::EditText {
                        id,
                        edit: TextEdit::Append(text.clone()),
                    });
                }
            }
            _ => {}
        }

        response
    }

    fn pointer_down(&mut self, response: &mut Response, pos: Pos2, modifiers: Modifiers) {
        let tolerance = self.config.hit_tolerance;

        if let Some(editing) = self.state.editing_text() {
            if self.document.topmost_at(pos, tolerance) == Some(editing) {
                return;
            }
            self.return_to_idle();
        }
        if !self.state.is_idle() {
            // A release got lost somewhere; finish what was started.
            self.pointer_up(pos);
        }

        let tools = response.tools;
        match tools.active.spec().gesture {
            Gesture::Select => match self.document.topmost_at(pos, tolerance) {
                Some(id) if modifiers.shift => {
                    if !self.selection.remove(&id) {
                        self.selection.insert(id);
                    }
                }
                Some(id) => {
                    if !self.selection.contains(&id) {
                        self.selection.clear();
                        self.selection.insert(id);
                    }
                    self.begin(EditorState::Moving {
                        last: pos,
                        moved: false,
                    });
                }
                None if modifiers.shift => {}
                None => self.selection.clear(),
            },
            Gesture::Freehand => {
                self.selection.clear();
                let capture =
                    FreehandCapture::new(pos, tools.style(), self.config.freehand_min_distance);
                self.begin(EditorState::Freehand { capture });
            }
            Gesture::Drag(handler) => {
                let mut draft = Shape::new(handler.begin(pos), tools.style());
                draft.selectable = false;
                self.begin(EditorState::Drafting {
                    tool: tools.active,
                    anchor: pos,
                    draft,
                });
            }
            Gesture::Place(Placement::Text) => {
                let style = Style {
                    fill: Some(tools.stroke),
                    ..tools.style()
                };
                let shape = factory::text(
                    pos,
                    &self.config.text_placeholder,
                    self.config.text_font_size,
                    style,
                );
                let id = shape.id;
                if self.execute(Command::AddShape(shape)) {
                    log::info!("Inserted text {}", id);
                    self.selection.clear();
                    self.selection.insert(id);
                }
                response.tools = tools.apply(ToolAction::SelectTool(Tool::Select));
            }
            Gesture::Place(Placement::Image) => {
                if self.image_pending {
                    log::debug!("Image load already in flight");
                } else {
                    self.image_pending = true;
                    response.request = Some(Request::PickImage);
                }
            }
        }
    }

    fn pointer_move(&mut self, pos: Pos2) {
        match &mut self.state {
            EditorState::Drafting {
                tool,
                anchor,
                draft,
            } => {
                if let Gesture::Drag(handler) = tool.spec().gesture {
                    handler.update(&mut draft.kind, *anchor, pos);
                }
            }
            EditorState::Freehand { capture } => {
                capture.add_point(pos);
            }
            EditorState::Moving { last, moved } => {
                let delta = pos - *last;
                if delta != Vec2::ZERO && !self.selection.is_empty() {
                    self.document.translate(&self.selection, delta);
                    *last = pos;
                    *moved = true;
                }
            }
            EditorState::Idle | EditorState::EditingText { .. } => {}
        }
    }

    fn pointer_up(&mut self, pos: Pos2) {
        if matches!(self.state, EditorState::Idle | EditorState::EditingText { .. }) {
            return;
        }

        match self.return_to_idle() {
            EditorState::Drafting {
                tool,
                anchor,
                mut draft,
            } => {
                if let Gesture::Drag(handler) = tool.spec().gesture {
                    handler.update(&mut draft.kind, anchor, pos);
                }
                draft.selectable = true;
                let (kind, id) = (draft.kind_name(), draft.id);
                if self.execute(Command::AddShape(draft)) {
                    log::info!("Committed {} {}", kind, id);
                }
            }
            EditorState::Freehand { mut capture } => {
                capture.add_point(pos);
                let shape = capture.finish();
                let id = shape.id;
                if self.execute(Command::AddShape(shape)) {
                    log::info!("Committed path {}", id);
                }
            }
            EditorState::Moving { last, moved } => {
                let delta = pos - last;
                if delta != Vec2::ZERO {
                    self.apply(Command::MoveShapes {
                        ids: self.selection.clone(),
                        delta,
                    });
                }
                if moved || delta != Vec2::ZERO {
                    self.persist();
                }
            }
            EditorState::Idle | EditorState::EditingText { .. } => {}
        }
    }

    fn double_click(&mut self, pos: Pos2) {
        let Some(id) = self.document.topmost_at(pos, self.config.hit_tolerance) else {
            return;
        };
        let is_text = self
            .document
            .get(id)
            .is_some_and(|shape| shape.kind.as_text().is_some());
        if !is_text {
            return;
        }

        // The second press of a double click usually started a move.
        if matches!(self.state, EditorState::Moving { .. }) {
            self.pointer_up(pos);
        }
        self.selection.clear();
        self.selection.insert(id);
        self.begin(EditorState::EditingText { id });
    }

    fn key_pressed(&mut self, response: &mut Response, key: Key, modifiers: Modifiers) {
        if let Some(id) = self.state.editing_text() {
            let edit = match key {
                Key::Escape => {
                    self.return_to_idle();
                    response.tools = response.tools.apply(ToolAction::SelectTool(Tool::Select));
                    return;
                }
                Key::Enter => TextEdit::Newline,
                Key::Backspace => TextEdit::Backspace,
                _ => return,
            };
            self.execute(Command::EditText { id, edit });
            return;
        }

        if key == Key::Escape {
            response.tools = response.tools.apply(ToolAction::SelectTool(Tool::Select));
            return;
        }
        if !modifiers.is_none() {
            return;
        }

        match key {
            Key::Delete | Key::Backspace => {
                self.delete_selected();
            }
            _ => {
                if let Some(tool) = Tool::from_shortcut(key) {
                    response.tools = response.tools.apply(ToolAction::SelectTool(tool));
                }
            }
        }
    }

    /// Remove every selected shape with a single save. Does nothing while a text
    /// is being edited or when nothing is selected.
    pub fn delete_selected(&mut self) -> bool {
        if self.state.editing_text().is_some() || self.selection.is_empty() {
            return false;
        }
        let ids = std::mem::take(&mut self.selection);
        let count = ids.len();
        let removed = self.execute(Command::RemoveShapes(ids));
        if removed {
            log::info!("Deleted {} shapes", count);
        }
        removed
    }

    /// Ask for confirmation before clearing.
    pub fn request_clear(&mut self) {
        self.clear_pending = true;
    }

    /// Answer the clear confirmation. Declining changes nothing.
    pub fn resolve_clear(&mut self, confirmed: bool) {
        self.clear_pending = false;
        if !confirmed {
            return;
        }

        self.return_to_idle();
        self.apply(Command::Clear);
        self.selection.clear();
        if let Err(err) = self.store.erase() {
            log::error!("Failed to erase saved drawing: {}", err);
            self.notices
                .push(Notice::warning(format!("The saved drawing could not be erased: {err}")));
        }
        log::info!("Canvas cleared");
    }

    /// Properties of the selection when exactly one shape is selected.
    pub fn selected_properties(&self) -> Option<ShapeProperties> {
        if self.selection.len() != 1 {
            return None;
        }
        let id = self.selection.iter().next()?;
        self.document.get(*id).map(ShapeProperties::of)
    }

    /// Write one attribute of the single selected shape.
    pub fn apply_property(&mut self, change: PropertyChange) -> bool {
        let Some(properties) = self.selected_properties() else {
            return false;
        };
        let change = match change {
            PropertyChange::StrokeWidth(width) => {
                PropertyChange::StrokeWidth(self.config.clamp_stroke_width(width))
            }
            other => other,
        };
        self.execute(Command::SetStyle {
            id: properties.id,
            change,
        })
    }

    /// Deliver the result of a [`Request::PickImage`].
    pub fn finish_image_load(&mut self, result: Result<ImagePayload, ImageError>) {
        self.image_pending = false;
        self.place_image(result);
    }

    /// An image dropped onto the window; goes through the same path as a picked one.
    pub fn insert_dropped_image(&mut self, result: Result<ImagePayload, ImageError>) {
        self.place_image(result);
    }

    fn place_image(&mut self, result: Result<ImagePayload, ImageError>) {
        match result {
            Ok(payload) => {
                let name = payload.name.clone();
                let shape = factory::image(
                    self.config.image_position,
                    payload.natural_size,
                    self.config.image_scale,
                    payload.src,
                    Style::default(),
                );
                let id = shape.id;
                if self.execute(Command::AddShape(shape)) {
                    log::info!("Inserted image {} as {}", name, id);
                    self.selection.clear();
                    self.selection.insert(id);
                }
            }
            Err(ImageError::Cancelled) => log::info!("Image selection cancelled"),
            Err(err) => {
                log::error!("Image load failed: {}", err);
                self.notices.push(Notice::error(format!("Could not load image: {err}")));
            }
        }
    }
}
