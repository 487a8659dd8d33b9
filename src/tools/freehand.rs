use egui::Pos2;

use crate::element::{Shape, Style, factory};

/// Collects pen points between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandCapture {
    points: Vec<Pos2>,
    style: Style,
    min_distance: f32,
}

impl FreehandCapture {
    pub fn new(start: Pos2, style: Style, min_distance: f32) -> Self {
        Self {
            points: vec![start],
            style,
            min_distance,
        }
    }

    /// Add a point unless it is too close to the previous one.
    pub fn add_point(&mut self, point: Pos2) -> bool {
        let far_enough = self
            .points
            .last()
            .is_none_or(|last| last.distance(point) >= self.min_distance);
        if far_enough {
            self.points.push(point);
        }
        far_enough
    }

    /// Get the current points
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// In-progress path for painting; not part of any document.
    pub fn preview(&self) -> Shape {
        factory::path(self.points.clone(), self.style)
    }

    /// Turn the capture into a document shape.
    pub fn finish(self) -> Shape {
        factory::path(self.points, self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_points_closer_than_min_distance() {
        let mut capture = FreehandCapture::new(Pos2::ZERO, Style::default(), 1.0);
        assert!(!capture.add_point(Pos2::new(0.5, 0.0)));
        assert!(capture.add_point(Pos2::new(1.0, 0.0)));
        assert!(capture.add_point(Pos2::new(1.0, 3.0)));
        assert_eq!(capture.points().len(), 3);
    }
}
