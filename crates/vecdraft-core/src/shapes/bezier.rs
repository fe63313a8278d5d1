//! Cubic and quadratic Bézier shapes.

use super::{points_bounds, ShapeId, ShapeStyle, ShapeTrait, NEAREST_ACCURACY};
use crate::point::PointRef;
use kurbo::{BezPath, CubicBez, ParamCurveNearest, Point, QuadBez, Rect, Shape as KurboShape};
use uuid::Uuid;

/// Filled curves are closed back to their start for the inside test.
fn closed_contains(mut path: BezPath, point: Point) -> bool {
    path.close_path();
    path.winding(point) != 0
}

/// A cubic Bézier curve anchored at `start` and ending at `point3`.
#[derive(Debug)]
pub struct CubicBezier {
    pub(crate) id: ShapeId,
    pub start: PointRef,
    pub point1: PointRef,
    pub point2: PointRef,
    pub point3: PointRef,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl CubicBezier {
    pub fn new(start: PointRef, point1: PointRef, point2: PointRef, point3: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            point1,
            point2,
            point3,
            is_stroked: true,
            is_filled: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn as_kurbo(&self) -> CubicBez {
        CubicBez::new(
            self.start.position(),
            self.point1.position(),
            self.point2.position(),
            self.point3.position(),
        )
    }
}

impl ShapeTrait for CubicBezier {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(self.points())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = self.as_kurbo().nearest(point, NEAREST_ACCURACY);
        nearest.distance_sq.sqrt() <= tolerance
            || (self.is_filled && closed_contains(self.to_path(), point))
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start.position());
        path.curve_to(
            self.point1.position(),
            self.point2.position(),
            self.point3.position(),
        );
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
        self.is_filled
    }

    fn points(&self) -> Vec<&PointRef> {
        vec![&self.start, &self.point1, &self.point2, &self.point3]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![
            &mut self.start,
            &mut self.point1,
            &mut self.point2,
            &mut self.point3,
        ]
    }
}

/// A quadratic Bézier curve anchored at `start` and ending at `point2`.
#[derive(Debug)]
pub struct QuadraticBezier {
    pub(crate) id: ShapeId,
    pub start: PointRef,
    pub point1: PointRef,
    pub point2: PointRef,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl QuadraticBezier {
    pub fn new(start: PointRef, point1: PointRef, point2: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            point1,
            point2,
            is_stroked: true,
            is_filled: false,
            style: ShapeStyle::default(),
        }
    }

    pub fn as_kurbo(&self) -> QuadBez {
        QuadBez::new(
            self.start.position(),
            self.point1.position(),
            self.point2.position(),
        )
    }
}

impl ShapeTrait for QuadraticBezier {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        points_bounds(self.points())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = self.as_kurbo().nearest(point, NEAREST_ACCURACY);
        nearest.distance_sq.sqrt() <= tolerance
            || (self.is_filled && closed_contains(self.to_path(), point))
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start.position());
        path.quad_to(self.point1.position(), self.point2.position());
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
        self.is_filled
    }

    fn points(&self) -> Vec<&PointRef> {
        vec![&self.start, &self.point1, &self.point2]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![&mut self.start, &mut self.point1, &mut self.point2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointRef {
        PointRef::new(x, y)
    }

    #[test]
    fn test_cubic_hit_test() {
        let curve = CubicBezier::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0));
        assert!(curve.hit_test(Point::new(0.0, 0.0), 0.1));
        assert!(curve.hit_test(Point::new(5.0, 7.5), 0.1));
        assert!(!curve.hit_test(Point::new(5.0, 2.0), 1.0));
    }

    #[test]
    fn test_filled_cubic_hits_inside() {
        let mut curve = CubicBezier::new(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0));
        curve.is_filled = true;
        assert!(curve.hit_test(Point::new(5.0, 2.0), 1.0));
    }

    #[test]
    fn test_quadratic_hit_test() {
        let curve = QuadraticBezier::new(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0));
        // Apex of the curve is at t = 0.5: (5, 5).
        assert!(curve.hit_test(Point::new(5.0, 5.0), 0.1));
        assert!(!curve.hit_test(Point::new(5.0, 9.0), 1.0));
    }

    #[test]
    fn test_bounds_cover_control_points() {
        let curve = QuadraticBezier::new(p(0.0, 0.0), p(5.0, 10.0), p(10.0, 0.0));
        assert_eq!(curve.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_points_order() {
        let curve = CubicBezier::new(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0));
        let xs: Vec<f64> = curve.points().iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
