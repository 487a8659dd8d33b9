use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub(crate) mod circle;
pub(crate) mod image;
pub(crate) mod line;
pub(crate) mod rect;
pub(crate) mod stroke;
pub(crate) mod text;

pub use circle::Circle;
pub use common::SELECTION_PADDING;
pub use self::image::{Image, decode_data_url, to_data_url};
pub use line::Line;
pub use rect::{Rectangle, Triangle};
pub use stroke::FreehandPath;
pub use text::Text;

pub(crate) use common::normalized_box;

/// Stable identity of a shape across edits and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual attributes shared by every shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color32,
    /// `None` means "no fill".
    pub fill: Option<Color32>,
    /// Pixels, always at least 1.
    pub stroke_width: u32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Color32::BLACK,
            fill: None,
            stroke_width: 2,
            opacity: 1.0,
        }
    }
}

impl Style {
    pub fn stroke_color(&self) -> Color32 {
        self.stroke.gamma_multiply(self.opacity)
    }

    pub fn fill_color(&self) -> Option<Color32> {
        self.fill.map(|fill| fill.gamma_multiply(self.opacity))
    }

    pub fn egui_stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width as f32, self.stroke_color())
    }
}

/// Geometry every shape kind provides to the document, controller and surface.
pub trait Geometry {
    /// Short lowercase name of the shape kind
    fn kind_name(&self) -> &'static str;

    /// Position of the shape in document coordinates
    fn origin(&self) -> Pos2;

    /// Axis-aligned bounding box in document coordinates
    fn bounds(&self) -> Rect;

    /// Test if the shape contains the given document position
    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool;

    /// Move the shape by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Paint the shape; `offset` maps document coordinates to screen coordinates.
    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style);
}

/// Enumeration of all drawable kinds in the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Text(Text),
    Image(Image),
    #[serde(rename = "path")]
    FreehandPath(FreehandPath),
}

impl ShapeKind {
    fn geometry(&self) -> &dyn Geometry {
        match self {
            ShapeKind::Line(s) => s,
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Triangle(s) => s,
            ShapeKind::Text(s) => s,
            ShapeKind::Image(s) => s,
            ShapeKind::FreehandPath(s) => s,
        }
    }

    fn geometry_mut(&mut self) -> &mut dyn Geometry {
        match self {
            ShapeKind::Line(s) => s,
            ShapeKind::Rectangle(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Triangle(s) => s,
            ShapeKind::Text(s) => s,
            ShapeKind::Image(s) => s,
            ShapeKind::FreehandPath(s) => s,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            ShapeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            ShapeKind::Image(image) => Some(image),
            _ => None,
        }
    }
}

impl Geometry for ShapeKind {
    fn kind_name(&self) -> &'static str {
        self.geometry().kind_name()
    }

    fn origin(&self) -> Pos2 {
        self.geometry().origin()
    }

    fn bounds(&self) -> Rect {
        self.geometry().bounds()
    }

    fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.geometry().hit_test(pos, tolerance)
    }

    fn translate(&mut self, delta: Vec2) {
        self.geometry_mut().translate(delta)
    }

    fn draw(&self, painter: &Painter, offset: Vec2, style: &Style) {
        self.geometry().draw(painter, offset, style)
    }
}

/// One entry of the document: a shape kind with its style and bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(flatten)]
    pub kind: ShapeKind,
    pub style: Style,
    /// Drafts are not selectable until their gesture completes.
    pub selectable: bool,
    /// Creation order; higher values paint on top.
    pub order: u64,
}

impl Shape {
    /// A new selectable shape. The document assigns `order` when the shape is added.
    pub fn new(kind: ShapeKind, style: Style) -> Self {
        Self {
            id: ShapeId::new(),
            kind,
            style,
            selectable: true,
            order: 0,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.kind_name()
    }

    pub fn bounds(&self) -> Rect {
        self.kind.bounds()
    }

    /// Hit test that also accounts for half the stroke width.
    pub fn hit_test(&self, pos: Pos2, tolerance: f32) -> bool {
        self.kind
            .hit_test(pos, tolerance + self.style.stroke_width as f32 / 2.0)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.kind.translate(delta);
    }

    pub fn draw(&self, painter: &Painter, offset: Vec2) {
        self.kind.draw(painter, offset, &self.style);
    }
}

/// Factory functions for creating shapes
pub mod factory {
    use super::*;

    pub fn line(start: Pos2, end: Pos2, style: Style) -> Shape {
        Shape::new(ShapeKind::Line(Line::new(start, end)), style)
    }

    pub fn rectangle(origin: Pos2, size: Vec2, style: Style) -> Shape {
        Shape::new(ShapeKind::Rectangle(Rectangle::new(origin, size)), style)
    }

    pub fn circle(origin: Pos2, radius: f32, style: Style) -> Shape {
        Shape::new(ShapeKind::Circle(Circle::new(origin, radius)), style)
    }

    pub fn triangle(origin: Pos2, size: Vec2, style: Style) -> Shape {
        Shape::new(ShapeKind::Triangle(Triangle::new(origin, size)), style)
    }

    pub fn text(origin: Pos2, content: &str, font_size: f32, style: Style) -> Shape {
        Shape::new(ShapeKind::Text(Text::new(origin, content, font_size)), style)
    }

    pub fn image(origin: Pos2, natural_size: Vec2, scale: f32, src: String, style: Style) -> Shape {
        Shape::new(
            ShapeKind::Image(Image::new(origin, natural_size, scale, src)),
            style,
        )
    }

    pub fn path(points: Vec<Pos2>, style: Style) -> Shape {
        Shape::new(ShapeKind::FreehandPath(FreehandPath::new(points)), style)
    }
}
