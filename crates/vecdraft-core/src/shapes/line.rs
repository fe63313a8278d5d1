//! Line shape.

use super::{point_to_segment_dist, points_bounds, ShapeId, ShapeStyle, ShapeTrait};
use crate::point::PointRef;
use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

/// A straight line between two (possibly shared) points.
#[derive(Debug)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: PointRef,
    /// End point.
    pub end: PointRef,
    pub is_stroked: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: PointRef, end: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            is_stroked: true,
            style: ShapeStyle::default(),
        }
    }

    /// Closest point on the line to `point`.
    pub fn nearest_point(&self, point: Point) -> Point {
        let a = self.start.position();
        let b = self.end.position();
        let seg = b - a;
        let len_sq = seg.hypot2();
        if len_sq < f64::EPSILON {
            return a;
        }
        let t = ((point - a).dot(seg) / len_sq).clamp(0.0, 1.0);
        a + seg * t
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds([&self.start, &self.end])
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start.position(), self.end.position()) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start.position());
        path.line_to(self.end.position());
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn is_stroked(&self) -> bool {
        self.is_stroked
    }

    fn is_filled(&self) -> bool {
        false
    }

    fn points(&self) -> Vec<&PointRef> {
        vec![&self.start, &self.end]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![&mut self.start, &mut self.end]
    }
}
