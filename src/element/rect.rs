use egui::{Color32, Painter, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style};

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Pos2,
    pub size: Vec2,
}

impl Rectangle {
    pub fn new(origin: Pos2, size: Vec2) -> Self {
        Self { origin, size }
    }
}

impl Geometry for Rectangle {
    fn kind_name(&self) -> &'static str {
        "rectangle"
    }

    fn origin(&self) -> Pos2 {
        self.origin
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.bounds().expand(tolerance).contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let rect = self.bounds().translate(offset);
        if let Some(fill) = style.fill_color() {
            painter.rect_filled(rect, 0.0, fill);
        }
        painter.rect_stroke(rect, 0.0, style.egui_stroke());
    }
}

/// Isosceles triangle inscribed in a box, apex at the top-center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub origin: Pos2,
    pub size: Vec2,
}

impl Triangle {
    pub fn new(origin: Pos2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Apex, bottom-right, bottom-left.
    pub fn vertices(&self) -> [Pos2; 3] {
        let rect = Rect::from_min_size(self.origin, self.size);
        [rect.center_top(), rect.right_bottom(), rect.left_bottom()]
    }
}

impl Geometry for Triangle {
    fn kind_name(&self) -> &'static str {
        "triangle"
    }

    fn origin(&self) -> Pos2 {
        self.origin
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.bounds().expand(tolerance).contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let points = self.vertices().iter().map(|p| *p + offset).collect();
        let fill = style.fill_color().unwrap_or(Color32::TRANSPARENT);
        painter.add(egui::Shape::convex_polygon(points, fill, style.egui_stroke()));
    }
}
