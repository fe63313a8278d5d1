//! Shape definitions for the editor.

mod arc;
mod bezier;
mod ellipse;
mod group;
mod line;
mod marker;
mod path;
mod rectangle;

pub use arc::Arc;
pub use bezier::{CubicBezier, QuadraticBezier};
pub use ellipse::Ellipse;
pub use group::Group;
pub use line::Line;
pub use marker::PointShape;
pub use path::Path;
pub use rectangle::Rectangle;

use crate::point::PointRef;
use crate::render::ShapeRenderer;
use kurbo::{BezPath, ParamCurveNearest, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Accuracy used for curve nearest-point queries.
const NEAREST_ACCURACY: f64 = 1e-3;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Fill color, used when the shape is filled.
    pub fill_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    pub fn new(
        stroke_color: SerializableColor,
        fill_color: SerializableColor,
        stroke_width: f64,
    ) -> Self {
        Self {
            stroke_color,
            fill_color,
            stroke_width,
            opacity: 1.0,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Color {
        self.fill_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(SerializableColor::black(), SerializableColor::white(), 2.0)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to any segment of a path.
/// Returns infinity for a path without segments.
pub fn point_to_path_dist(point: Point, path: &BezPath) -> f64 {
    path.segments()
        .map(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq)
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Inclusive containment test; points on the boundary count as inside.
pub fn rect_contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Bounding box of a set of points, or `Rect::ZERO` when empty.
pub fn points_bounds<'a>(points: impl IntoIterator<Item = &'a PointRef>) -> Rect {
    let mut points = points.into_iter().map(|p| p.position());
    let Some(first) = points.next() else {
        return Rect::ZERO;
    };
    points.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Body test: does `point` hit the shape itself (not its handles)?
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;

    fn is_stroked(&self) -> bool;

    fn is_filled(&self) -> bool;

    /// Control points of the shape, in a stable order.
    fn points(&self) -> Vec<&PointRef>;

    fn points_mut(&mut self) -> Vec<&mut PointRef>;

    /// Swap every reference to `old` for a reference to `new`.
    /// Returns the number of references replaced.
    fn replace_point(&mut self, old: &PointRef, new: &PointRef) -> usize {
        let mut replaced = 0;
        for point in self.points_mut() {
            if point.ptr_eq(old) {
                *point = new.clone();
                replaced += 1;
            }
        }
        replaced
    }

    /// Translate the shape. Each distinct point moves once; connector
    /// points are left to the group that owns them.
    fn move_by(&mut self, dx: f64, dy: f64) {
        let mut moved = HashSet::new();
        for point in self.points() {
            if !point.is_connector() && moved.insert(point.key()) {
                point.move_by(dx, dy);
            }
        }
    }
}

/// Closed set of shape variants.
#[derive(Debug)]
pub enum Shape {
    Point(PointShape),
    Line(Line),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Arc(Arc),
    CubicBezier(CubicBezier),
    QuadraticBezier(QuadraticBezier),
    Path(Path),
    Group(Group),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Point(s) => s,
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Arc(s) => s,
            Shape::CubicBezier(s) => s,
            Shape::QuadraticBezier(s) => s,
            Shape::Path(s) => s,
            Shape::Group(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Point(s) => s,
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Arc(s) => s,
            Shape::CubicBezier(s) => s,
            Shape::QuadraticBezier(s) => s,
            Shape::Path(s) => s,
            Shape::Group(s) => s,
        }
    }

    /// Short name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Point(_) => "Point",
            Shape::Line(_) => "Line",
            Shape::Rectangle(_) => "Rectangle",
            Shape::Ellipse(_) => "Ellipse",
            Shape::Arc(_) => "Arc",
            Shape::CubicBezier(_) => "CubicBezier",
            Shape::QuadraticBezier(_) => "QuadraticBezier",
            Shape::Path(_) => "Path",
            Shape::Group(_) => "Group",
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn is_stroked(&self) -> bool {
        self.as_trait().is_stroked()
    }

    pub fn is_filled(&self) -> bool {
        self.as_trait().is_filled()
    }

    pub fn points(&self) -> Vec<&PointRef> {
        self.as_trait().points()
    }

    pub fn points_mut(&mut self) -> Vec<&mut PointRef> {
        self.as_trait_mut().points_mut()
    }

    pub fn replace_point(&mut self, old: &PointRef, new: &PointRef) -> usize {
        self.as_trait_mut().replace_point(old, new)
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.as_trait_mut().move_by(dx, dy)
    }

    /// Whether the shape holds a reference to `point`.
    pub fn references(&self, point: &PointRef) -> bool {
        self.points().iter().any(|p| p.ptr_eq(point))
    }

    /// Hand the shape to a rendering backend.
    pub fn draw(&self, renderer: &mut dyn ShapeRenderer) {
        match self {
            Shape::Point(marker) => {
                renderer.draw_point(marker.point.position(), marker.marker(), &marker.style)
            }
            Shape::Group(group) => {
                for child in &group.children {
                    child.draw(renderer);
                }
            }
            _ => {
                let path = self.to_path();
                renderer.draw_path(&path, self.style(), self.is_stroked(), self.is_filled());
            }
        }
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Get the group if this shape is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Get the mutable group if this shape is a group.
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Shape::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Shape::Rectangle(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_cubic_bezier(&self) -> Option<&CubicBezier> {
        match self {
            Shape::CubicBezier(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Shape::Path(p) => Some(p),
            _ => None,
        }
    }
}
