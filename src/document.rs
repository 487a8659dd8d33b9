use std::collections::HashSet;

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::element::{Shape, ShapeId};

/// Version tag written into every serialized document.
pub const FORMAT_VERSION: u32 = 1;

/// The drawing: an ordered list of shapes, where list order is paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    version: u32,
    #[serde(rename = "objects")]
    shapes: Vec<Shape>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.iter().any(|shape| shape.id == id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id == id)
    }

    /// Creation index the next added shape receives.
    pub fn next_order(&self) -> u64 {
        self.shapes.last().map_or(0, |shape| shape.order + 1)
    }

    /// Append a shape on top of everything else and return its id.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        shape.order = self.next_order();
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Remove every shape whose id is in `ids`; returns how many were removed.
    pub fn remove(&mut self, ids: &HashSet<ShapeId>) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|shape| !ids.contains(&shape.id));
        before - self.shapes.len()
    }

    /// Translate the given shapes; returns how many were moved.
    pub fn translate(&mut self, ids: &HashSet<ShapeId>, delta: Vec2) -> usize {
        let mut moved = 0;
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id)) {
            shape.translate(delta);
            moved += 1;
        }
        moved
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Topmost selectable shape under `pos`.
    pub fn topmost_at(&self, pos: Pos2, tolerance: f32) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.selectable && shape.hit_test(pos, tolerance))
            .map(|shape| shape.id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a serialized document, restoring paint order from the creation index.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut document: Document = serde_json::from_str(json)?;
        document.shapes.sort_by_key(|shape| shape.order);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Style, factory};

    #[test]
    fn add_assigns_increasing_order() {
        let mut doc = Document::new();
        let style = Style::default();
        doc.add(factory::line(Pos2::ZERO, Pos2::new(1.0, 1.0), style));
        doc.add(factory::circle(Pos2::ZERO, 4.0, style));
        let orders: Vec<u64> = doc.shapes().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn topmost_prefers_later_shapes_and_skips_unselectable() {
        let mut doc = Document::new();
        let style = Style::default();
        let below = doc.add(factory::rectangle(Pos2::ZERO, Vec2::splat(50.0), style));
        let mut above = factory::rectangle(Pos2::new(10.0, 10.0), Vec2::splat(50.0), style);
        let above_id = above.id;
        doc.add(above.clone());
        assert_eq!(doc.topmost_at(Pos2::new(20.0, 20.0), 0.0), Some(above_id));

        above.selectable = false;
        let mut ids = HashSet::new();
        ids.insert(above_id);
        doc.remove(&ids);
        doc.add(above);
        assert_eq!(doc.topmost_at(Pos2::new(20.0, 20.0), 0.0), Some(below));
    }
}
