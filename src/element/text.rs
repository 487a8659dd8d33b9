use egui::{Align2, FontId, Painter, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style};

// Rough glyph metrics for the proportional default font. The surface lays out the
// real glyphs when painting; these only size the box for hit testing and outlines.
const CHAR_WIDTH_RATIO: f32 = 0.55;
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// A block of editable text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub origin: Pos2,
    pub content: String,
    pub font_size: f32,
}

impl Text {
    pub fn new(origin: Pos2, content: impl Into<String>, font_size: f32) -> Self {
        Self {
            origin,
            content: content.into(),
            font_size,
        }
    }

    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Removes the last character; returns false if the text was already empty.
    pub fn pop_char(&mut self) -> bool {
        self.content.pop().is_some()
    }

    /// Top of the insertion point after the last character, and its height.
    pub fn caret(&self) -> (Pos2, f32) {
        let last_line = self.content.rsplit('\n').next().unwrap_or_default();
        let x = last_line.chars().count() as f32 * self.font_size * CHAR_WIDTH_RATIO;
        let y = (self.line_count() - 1) as f32 * self.font_size * LINE_HEIGHT_RATIO;
        (self.origin + Vec2::new(x, y), self.font_size * LINE_HEIGHT_RATIO)
    }

    fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    fn widest_line(&self) -> usize {
        self.content
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl Geometry for Text {
    fn kind_name(&self) -> &'static str {
        "text"
    }

    fn origin(&self) -> Pos2 {
        self.origin
    }

    fn bounds(&self) -> Rect {
        // Keep an empty text grabbable.
        let width = (self.widest_line().max(1) as f32) * self.font_size * CHAR_WIDTH_RATIO;
        let height = self.line_count() as f32 * self.font_size * LINE_HEIGHT_RATIO;
        Rect::from_min_size(self.origin, Vec2::new(width, height))
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.bounds().expand(tolerance).contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let color = style.fill_color().unwrap_or_else(|| style.stroke_color());
        painter.text(
            self.origin + offset,
            Align2::LEFT_TOP,
            &self.content,
            FontId::proportional(self.font_size),
            color,
        );
    }
}
