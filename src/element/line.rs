use egui::{Painter, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style, common};

/// Straight segment between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Pos2,
    pub end: Pos2,
}

impl Line {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }
}

impl Geometry for Line {
    fn kind_name(&self) -> &'static str {
        "line"
    }

    fn origin(&self) -> Pos2 {
        self.start
    }

    fn bounds(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        common::distance_to_line_segment(pos, self.start, self.end) <= tolerance
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        painter.line_segment([self.start + offset, self.end + offset], style.egui_stroke());
    }
}
