use egui::{Pos2, Vec2};

use crate::element::{Circle, Line, Rectangle, ShapeKind, Triangle, normalized_box};

/// A tool whose shape is sized by dragging from an anchor point.
pub trait DragTool: Sync {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Zero-extent geometry placed at the anchor on pointer-down.
    fn begin(&self, anchor: Pos2) -> ShapeKind;

    /// Recompute the draft's extent from the anchor and the current pointer.
    fn update(&self, draft: &mut ShapeKind, anchor: Pos2, pointer: Pos2);
}

pub struct LineTool;
pub struct RectangleTool;
pub struct CircleTool;
pub struct TriangleTool;

impl DragTool for LineTool {
    fn name(&self) -> &'static str {
        "line"
    }

    fn begin(&self, anchor: Pos2) -> ShapeKind {
        ShapeKind::Line(Line::new(anchor, anchor))
    }

    fn update(&self, draft: &mut ShapeKind, _anchor: Pos2, pointer: Pos2) {
        if let ShapeKind::Line(line) = draft {
            line.end = pointer;
        }
    }
}

impl DragTool for RectangleTool {
    fn name(&self) -> &'static str {
        "rectangle"
    }

    fn begin(&self, anchor: Pos2) -> ShapeKind {
        ShapeKind::Rectangle(Rectangle::new(anchor, Vec2::ZERO))
    }

    fn update(&self, draft: &mut ShapeKind, anchor: Pos2, pointer: Pos2) {
        if let ShapeKind::Rectangle(rect) = draft {
            (rect.origin, rect.size) = normalized_box(anchor, pointer);
        }
    }
}

impl DragTool for TriangleTool {
    fn name(&self) -> &'static str {
        "triangle"
    }

    fn begin(&self, anchor: Pos2) -> ShapeKind {
        ShapeKind::Triangle(Triangle::new(anchor, Vec2::ZERO))
    }

    fn update(&self, draft: &mut ShapeKind, anchor: Pos2, pointer: Pos2) {
        if let ShapeKind::Triangle(triangle) = draft {
            (triangle.origin, triangle.size) = normalized_box(anchor, pointer);
        }
    }
}

impl DragTool for CircleTool {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn begin(&self, anchor: Pos2) -> ShapeKind {
        ShapeKind::Circle(Circle::new(anchor, 0.0))
    }

    // The box origin stays on the anchor, so the circle grows away from the press point
    // instead of around it.
    fn update(&self, draft: &mut ShapeKind, anchor: Pos2, pointer: Pos2) {
        if let ShapeKind::Circle(circle) = draft {
            circle.origin = anchor;
            circle.radius = anchor.distance(pointer) / 2.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Geometry;

    fn drag(tool: &dyn DragTool, from: Pos2, to: Pos2) -> ShapeKind {
        let mut draft = tool.begin(from);
        tool.update(&mut draft, from, to);
        draft
    }

    #[test]
    fn begin_has_zero_extent() {
        let anchor = Pos2::new(3.0, 4.0);
        for tool in [&LineTool as &dyn DragTool, &RectangleTool, &CircleTool, &TriangleTool] {
            let draft = tool.begin(anchor);
            assert_eq!(draft.bounds().size(), Vec2::ZERO, "{}", tool.name());
            assert_eq!(draft.origin(), anchor, "{}", tool.name());
        }
    }

    #[test]
    fn line_end_follows_pointer() {
        let draft = drag(&LineTool, Pos2::new(1.0, 2.0), Pos2::new(-5.0, 9.0));
        assert_eq!(
            draft,
            ShapeKind::Line(Line::new(Pos2::new(1.0, 2.0), Pos2::new(-5.0, 9.0)))
        );
    }

    #[test]
    fn triangle_normalizes_like_rectangle() {
        let draft = drag(&TriangleTool, Pos2::new(40.0, 30.0), Pos2::new(10.0, 90.0));
        assert_eq!(
            draft,
            ShapeKind::Triangle(Triangle::new(Pos2::new(10.0, 30.0), Vec2::new(30.0, 60.0)))
        );
    }

    #[test]
    fn circle_keeps_origin_at_anchor_when_dragging_up_left() {
        let draft = drag(&CircleTool, Pos2::new(50.0, 50.0), Pos2::new(44.0, 42.0));
        assert_eq!(draft, ShapeKind::Circle(Circle::new(Pos2::new(50.0, 50.0), 5.0)));
    }
}
