//! Ellipse shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::point::PointRef;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// An axis-aligned ellipse inscribed in the rectangle spanned by two points.
#[derive(Debug)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    pub top_left: PointRef,
    pub bottom_right: PointRef,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
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

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Horizontal and vertical radius.
    pub fn radii(&self) -> (f64, f64) {
        let rect = self.bounds();
        (rect.width() / 2.0, rect.height() / 2.0)
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::from_rect(self.bounds())
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.top_left.position(), self.bottom_right.position())
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let center = self.center();
        let (rx, ry) = self.radii();
        let rx = rx + tolerance;
        let ry = ry + tolerance;
        if rx < f64::EPSILON || ry < f64::EPSILON {
            return point.distance(center) <= tolerance;
        }
        let dx = (point.x - center.x) / rx;
        let dy = (point.y - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
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

    fn ellipse(x0: f64, y0: f64, x1: f64, y1: f64) -> Ellipse {
        Ellipse::new(PointRef::new(x0, y0), PointRef::new(x1, y1))
    }

    #[test]
    fn test_center_and_radii() {
        let ellipse = ellipse(20.0, 30.0, 80.0, 70.0);
        assert_eq!(ellipse.center(), Point::new(50.0, 50.0));
        let (rx, ry) = ellipse.radii();
        assert!((rx - 30.0).abs() < f64::EPSILON);
        assert!((ry - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_center_and_edge() {
        let circle = ellipse(-10.0, -10.0, 10.0, 10.0);
        assert!(circle.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(15.0, 0.0), 5.0));
    }

    #[test]
    fn test_hit_test_corner_outside() {
        let circle = ellipse(-10.0, -10.0, 10.0, 10.0);
        assert!(!circle.hit_test(Point::new(9.0, 9.0), 0.0));
    }

    #[test]
    fn test_degenerate_ellipse() {
        let point = ellipse(5.0, 5.0, 5.0, 5.0);
        assert!(point.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(!point.hit_test(Point::new(6.0, 5.0), 0.0));
    }
}
