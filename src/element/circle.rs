use egui::{Color32, Painter, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style};

/// Circle stored by the top-left corner of its bounding box.
///
/// When a circle is dragged out, this corner stays pinned at the anchor and the circle
/// grows down-right from it, so the center is `origin + (radius, radius)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub origin: Pos2,
    pub radius: f32,
}

impl Circle {
    pub fn new(origin: Pos2, radius: f32) -> Self {
        Self { origin, radius }
    }

    pub fn center(&self) -> Pos2 {
        self.origin + Vec2::splat(self.radius)
    }
}

impl Geometry for Circle {
    fn kind_name(&self) -> &'static str {
        "circle"
    }

    fn origin(&self) -> Pos2 {
        self.origin
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.origin, Vec2::splat(self.radius * 2.0))
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.center().distance(pos) <= self.radius + tolerance
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let fill = style.fill_color().unwrap_or(Color32::TRANSPARENT);
        painter.circle(self.center() + offset, self.radius, fill, style.egui_stroke());
    }
}
