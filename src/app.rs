use crate::config::EditorConfig;
use crate::file_handler::ImageLoader;
use crate::input::InputHandler;
use crate::panels::{central_panel, property_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{DocumentStore, EditorContext, NoticeLevel, Request};
use crate::tools::{ToolAction, ToolState};

/// Identifier of the per-user data directory on native platforms.
pub const APP_ID: &str = "infinite_canvas";

/// The application shell: wires egui input, panels and the image loader to the editor.
pub struct PaintApp {
    editor: EditorContext,
    tools: ToolState,
    renderer: Renderer,
    input: InputHandler,
    images: ImageLoader,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = EditorConfig::default();
        let store = DocumentStore::platform_default(APP_ID, &config.storage_key);
        Self::with_store(store, config)
    }

    /// Build the app on top of an explicit store, loading the saved drawing.
    pub fn with_store(store: DocumentStore, config: EditorConfig) -> Self {
        let renderer = Renderer::new(config.texture_cache_size);
        Self {
            editor: EditorContext::new(store, config),
            tools: ToolState::default(),
            renderer,
            input: InputHandler::new(),
            images: ImageLoader::new(),
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn tools(&self) -> ToolState {
        self.tools
    }

    pub fn apply_tool_action(&mut self, action: ToolAction) {
        let next = self.tools.apply(action);
        if next.active != self.tools.active {
            log::info!("Tool selected: {}", next.active);
        }
        self.tools = next;
    }

    /// Feed this frame's input through the editor. `canvas_hovered` is false when a
    /// window covers the pointer.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect, canvas_hovered: bool) {
        self.input.set_central_panel(canvas_rect, canvas_hovered);
        for event in self.input.process_input(ctx) {
            let response = self.editor.handle_event(self.tools, &event);
            if response.tools.active != self.tools.active {
                log::info!("Tool selected: {}", response.tools.active);
            }
            self.tools = response.tools;
            if response.request == Some(Request::PickImage) {
                if let Err(err) = self.images.pick(ctx) {
                    self.editor.finish_image_load(Err(err));
                }
            }
        }
    }

    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(ctx, painter, rect, &self.editor);
    }

    fn poll_images(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.images.poll() {
            self.editor.finish_image_load(result);
        }
        if let Some(result) = self.images.take_dropped(ctx) {
            self.editor.insert_dropped_image(result);
        }
    }

    fn show_clear_confirmation(&mut self, ctx: &egui::Context) {
        if !self.editor.is_clear_pending() {
            return;
        }
        let mut answer = None;
        egui::Window::new("Clear canvas?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("This removes every shape and the saved drawing.");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
        if let Some(confirmed) = answer {
            self.editor.resolve_clear(confirmed);
        }
    }

    fn show_notices(&mut self, ctx: &egui::Context) {
        if self.editor.notices().is_empty() {
            return;
        }
        let mut dismissed = None;
        egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
            for (index, notice) in self.editor.notices().iter().enumerate() {
                ui.horizontal(|ui| {
                    let color = match notice.level {
                        NoticeLevel::Warning => ui.visuals().warn_fg_color,
                        NoticeLevel::Error => ui.visuals().error_fg_color,
                    };
                    ui.colored_label(color, &notice.message);
                    if ui.small_button("✖").clicked() {
                        dismissed = Some(index);
                    }
                });
            }
        });
        if let Some(index) = dismissed {
            self.editor.dismiss_notice(index);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_images(ctx);

        tools_panel(self, ctx);
        self.show_notices(ctx);
        property_panel(self, ctx);
        central_panel(self, ctx);
        self.show_clear_confirmation(ctx);
    }
}
