use std::collections::HashSet;

use egui::{Color32, Context, Painter, Pos2, Rect, Stroke, Vec2};

use crate::element::{SELECTION_PADDING, Shape, ShapeId, ShapeKind};
use crate::state::EditorContext;
use crate::texture_manager::TextureManager;

const SELECTION_COLOR: Color32 = Color32::from_rgb(33, 150, 243);
const HANDLE_SIZE: f32 = 8.0;

/// Paints the document one way: nothing here feeds back into the model.
pub struct Renderer {
    textures: TextureManager,
}

impl Renderer {
    pub fn new(texture_cache_size: usize) -> Self {
        Self {
            textures: TextureManager::new(texture_cache_size),
        }
    }

    /// Paint everything the editor holds into `rect`, whose top-left is document (0, 0).
    pub fn render(&mut self, ctx: &Context, painter: &Painter, rect: Rect, editor: &EditorContext) {
        self.textures.begin_frame();
        let offset = rect.min.to_vec2();
        let document = editor.document();

        painter.rect_filled(rect, 0.0, Color32::WHITE);

        for shape in document.shapes() {
            self.draw_shape(ctx, painter, offset, shape);
        }

        if let Some(preview) = editor.state().preview() {
            preview.draw(painter, offset);
        }

        for id in editor.selection() {
            if let Some(shape) = document.get(*id) {
                draw_selection(painter, shape.bounds().translate(offset));
            }
        }

        if let Some(id) = editor.state().editing_text() {
            if let Some(text) = document.get(id).and_then(|shape| shape.kind.as_text()) {
                let (top, height) = text.caret();
                let top = top + offset;
                painter.line_segment(
                    [top, top + Vec2::new(0.0, height)],
                    Stroke::new(1.5, SELECTION_COLOR),
                );
            }
        }

        let live: HashSet<ShapeId> = document.shapes().iter().map(|shape| shape.id).collect();
        self.textures.retain(|id| live.contains(&id));
    }

    fn draw_shape(&mut self, ctx: &Context, painter: &Painter, offset: Vec2, shape: &Shape) {
        if let ShapeKind::Image(image) = &shape.kind {
            if let Some(texture) = self.textures.get_or_create_texture(shape.id, || image.decode(), ctx) {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                let tint = Color32::WHITE.gamma_multiply(shape.style.opacity);
                painter.image(texture, shape.bounds().translate(offset), uv, tint);
                return;
            }
        }
        shape.draw(painter, offset);
    }
}

/// Outline around the shape's bounds plus a handle on each corner.
fn draw_selection(painter: &Painter, bounds: Rect) {
    let outline = bounds.expand(SELECTION_PADDING);
    painter.rect_stroke(outline, 0.0, Stroke::new(1.0, SELECTION_COLOR));
    for corner in [
        outline.left_top(),
        outline.right_top(),
        outline.left_bottom(),
        outline.right_bottom(),
    ] {
        let handle = Rect::from_center_size(corner, Vec2::splat(HANDLE_SIZE));
        painter.rect_filled(handle, 0.0, Color32::WHITE);
        painter.rect_stroke(handle, 0.0, Stroke::new(1.0, SELECTION_COLOR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::element::{Style, factory};
    use crate::input::{InputEvent, InputLocation};
    use crate::state::{DocumentStore, MemoryStore};
    use crate::tools::ToolState;

    #[test]
    fn renders_shapes_selection_and_broken_images() {
        let store = DocumentStore::new(Box::new(MemoryStore::new()), "canvas");
        let mut editor = EditorContext::new(store, EditorConfig::default());
        editor.execute(crate::command::Command::AddShape(factory::rectangle(
            Pos2::new(10.0, 10.0),
            Vec2::splat(20.0),
            Style::default(),
        )));
        editor.execute(crate::command::Command::AddShape(factory::image(
            Pos2::new(50.0, 50.0),
            Vec2::splat(4.0),
            1.0,
            "data:image/png;base64,AAAA".to_owned(),
            Style::default(),
        )));
        editor.handle_event(
            ToolState::default(),
            &InputEvent::PointerDown {
                location: InputLocation::canvas(15.0, 15.0),
                button: egui::PointerButton::Primary,
                modifiers: egui::Modifiers::NONE,
            },
        );

        let ctx = Context::default();
        let mut renderer = Renderer::new(4);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            let rect = Rect::from_min_size(Pos2::new(100.0, 0.0), Vec2::splat(400.0));
            renderer.render(ctx, &painter, rect, &editor);
        });

        assert_eq!(editor.selection().len(), 1);
        assert_eq!(renderer.textures.cache_size(), 0);
    }

    #[test]
    fn decodable_image_is_uploaded_once() {
        let mut png = Vec::new();
        image::RgbaImage::new(2, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let store = DocumentStore::new(Box::new(MemoryStore::new()), "canvas");
        let mut editor = EditorContext::new(store, EditorConfig::default());
        editor.execute(crate::command::Command::AddShape(factory::image(
            Pos2::new(20.0, 20.0),
            Vec2::splat(2.0),
            0.5,
            crate::element::to_data_url(&png, "image/png"),
            Style::default(),
        )));

        let ctx = Context::default();
        let mut renderer = Renderer::new(4);
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                let painter = ctx.layer_painter(egui::LayerId::background());
                let rect = Rect::from_min_size(Pos2::ZERO, Vec2::splat(200.0));
                renderer.render(ctx, &painter, rect, &editor);
            });
        }

        assert_eq!(renderer.textures.cache_size(), 1);
    }
}
