use egui::{Painter, Pos2, Rect, Shape as EguiShape, Vec2};
use serde::{Deserialize, Serialize};

use super::{Geometry, Style, common};

/// Freehand pen stroke: the points captured between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandPath {
    pub points: Vec<Pos2>,
}

impl FreehandPath {
    pub fn new(points: Vec<Pos2>) -> Self {
        Self { points }
    }

    /// Get the points that make up this path
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }
}

impl Geometry for FreehandPath {
    fn kind_name(&self) -> &'static str {
        "path"
    }

    fn origin(&self) -> Pos2 {
        self.bounds().min
    }

    fn bounds(&self) -> Rect {
        common::calculate_bounds(&self.points, 0.0)
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        common::polyline_hit(&self.points, pos, tolerance)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        let stroke = style.egui_stroke();
        match self.points.as_slice() {
            [] => {}
            // A click without movement still leaves a dot.
            [point] => {
                painter.circle_filled(*point + offset, stroke.width / 2.0, stroke.color);
            }
            points => {
                let points = points.iter().map(|p| *p + offset).collect();
                painter.add(EguiShape::line(points, stroke));
            }
        }
    }
}
