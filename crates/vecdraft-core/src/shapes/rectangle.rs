//! Rectangle shape.

use super::{rect_contains_inclusive, ShapeId, ShapeStyle, ShapeTrait};
use crate::point::PointRef;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// An axis-aligned rectangle spanned by two corner points.
///
/// The corners may be given in any order; equal corners are a valid,
/// degenerate rectangle.
#[derive(Debug)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    pub top_left: PointRef,
    pub bottom_right: PointRef,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(top_left: PointRef, bottom_right: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            top_left,
            bottom_right,
            is_stroked: true,
            is_filled: false,
            style: ShapeStyle::default(),
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.top_left.position(), self.bottom_right.position())
    }

    pub fn width(&self) -> f64 {
        self.as_rect().width()
    }

    pub fn height(&self) -> f64 {
        self.as_rect().height()
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let inflate = tolerance + self.style.stroke_width / 2.0;
        rect_contains_inclusive(self.as_rect().inflate(inflate, inflate), point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
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
        vec![&self.top_left, &self.bottom_right]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![&mut self.top_left, &mut self.bottom_right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rectangle {
        Rectangle::new(PointRef::new(x0, y0), PointRef::new(x1, y1))
    }

    #[test]
    fn test_rectangle_from_reversed_corners() {
        let rect = rect(100.0, 100.0, 50.0, 50.0);
        let r = rect.as_rect();
        assert!((r.x0 - 50.0).abs() < f64::EPSILON);
        assert!((r.y0 - 50.0).abs() < f64::EPSILON);
        assert!((rect.width() - 50.0).abs() < f64::EPSILON);
        assert!((rect.height() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let mut rect = rect(0.0, 0.0, 100.0, 100.0);
        rect.style.stroke_width = 0.0;
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0));
        // Boundary counts as a hit.
        assert!(rect.hit_test(Point::new(100.0, 100.0), 0.0));
    }

    #[test]
    fn test_hit_test_includes_half_stroke() {
        let mut rect = rect(0.0, 0.0, 10.0, 10.0);
        rect.style.stroke_width = 4.0;
        assert!(rect.hit_test(Point::new(12.0, 5.0), 0.0));
        assert!(!rect.hit_test(Point::new(12.5, 5.0), 0.0));
    }

    #[test]
    fn test_degenerate_rectangle() {
        let rect = rect(5.0, 5.0, 5.0, 5.0);
        assert!((rect.width()).abs() < f64::EPSILON);
        assert!(rect.hit_test(Point::new(6.0, 6.0), 1.0));
        assert!(!rect.to_path().elements().is_empty());
    }

    #[test]
    fn test_shared_corner_moves_rectangle() {
        let corner = PointRef::new(10.0, 20.0);
        let rect = Rectangle::new(PointRef::new(0.0, 0.0), corner.clone());
        corner.set(30.0, 40.0);
        assert_eq!(rect.bounds(), Rect::new(0.0, 0.0, 30.0, 40.0));
    }
}
