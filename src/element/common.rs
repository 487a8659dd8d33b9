use egui::{Pos2, Rect, Vec2};

/// Extra slack around a shape's box when it is hit-tested or outlined.
pub const SELECTION_PADDING: f32 = 4.0;

/// Normalizes a drag from `anchor` to `pointer` into a top-left origin and a size.
pub(crate) fn normalized_box(anchor: Pos2, pointer: Pos2) -> (Pos2, Vec2) {
    let origin = Pos2::new(anchor.x.min(pointer.x), anchor.y.min(pointer.y));
    let size = Vec2::new((pointer.x - anchor.x).abs(), (pointer.y - anchor.y).abs());
    (origin, size)
}

/// Calculate distance from a point to a line segment (used for line and path hit testing)
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// True if `pos` is within `tolerance` of any segment of the polyline.
pub(crate) fn polyline_hit(points: &[Pos2], pos: Pos2, tolerance: f32) -> bool {
    match points {
        [] => false,
        [single] => single.distance(pos) <= tolerance,
        _ => points
            .windows(2)
            .any(|w| distance_to_line_segment(pos, w[0], w[1]) <= tolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_box_ignores_drag_direction() {
        let forward = normalized_box(Pos2::new(10.0, 10.0), Pos2::new(110.0, 60.0));
        let backward = normalized_box(Pos2::new(110.0, 60.0), Pos2::new(10.0, 10.0));
        assert_eq!(forward, backward);
        assert_eq!(forward.0, Pos2::new(10.0, 10.0));
        assert_eq!(forward.1, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = distance_to_line_segment(Pos2::new(-3.0, 4.0), Pos2::ZERO, Pos2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-4);
    }
}
