//! Path shape wrapping a [`Geometry`].

use super::{point_to_path_dist, points_bounds, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{FillRule, Geometry};
use crate::point::PointRef;
use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

/// A shape whose outline is an arbitrary geometry. Its points are exactly
/// the points reachable from the geometry.
#[derive(Debug)]
pub struct Path {
    pub(crate) id: ShapeId,
    pub geometry: Geometry,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Path {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            is_stroked: true,
            is_filled: false,
            style: ShapeStyle::default(),
        }
    }

    /// An empty path using `fill_rule`.
    pub fn empty(fill_rule: FillRule) -> Self {
        Self::new(Geometry::new(fill_rule))
    }
}

impl ShapeTrait for Path {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(self.geometry.points())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.is_filled && self.geometry.fill_contains(point) {
            return true;
        }
        point_to_path_dist(point, &self.to_path()) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        self.geometry.to_path()
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
        self.is_filled
    }

    fn points(&self) -> Vec<&PointRef> {
        self.geometry.points().collect()
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        self.geometry.points_mut().collect()
    }
}
