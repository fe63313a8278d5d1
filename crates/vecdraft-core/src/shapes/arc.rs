//! Elliptical arc shape.

use super::{point_to_path_dist, ShapeId, ShapeStyle, ShapeTrait};
use crate::point::PointRef;
use kurbo::{Arc as KurboArc, BezPath, Point, Rect, Shape as KurboShape, Vec2};
use std::f64::consts::TAU;
use uuid::Uuid;

/// An arc of the ellipse inscribed in the rectangle `point1`..`point2`.
///
/// `point3` and `point4` only contribute their direction from the centre:
/// the arc runs from the ray through `point3` to the ray through `point4`.
#[derive(Debug)]
pub struct Arc {
    pub(crate) id: ShapeId,
    pub point1: PointRef,
    pub point2: PointRef,
    pub point3: PointRef,
    pub point4: PointRef,
    pub is_stroked: bool,
    pub is_filled: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arc {
    pub fn new(point1: PointRef, point2: PointRef, point3: PointRef, point4: PointRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            point1,
            point2,
            point3,
            point4,
            is_stroked: true,
            is_filled: false,
            style: ShapeStyle::default(),
        }
    }

    /// Rectangle bounding the full ellipse.
    pub fn ellipse_rect(&self) -> Rect {
        Rect::from_points(self.point1.position(), self.point2.position())
    }

    /// Parametric angle of the ray from the centre through `point`.
    fn angle_of(&self, point: Point) -> f64 {
        let rect = self.ellipse_rect();
        let center = rect.center();
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        // Scale into the unit circle without dividing by a zero radius.
        ((point.y - center.y) * rx).atan2((point.x - center.x) * ry)
    }

    pub fn start_angle(&self) -> f64 {
        self.angle_of(self.point3.position())
    }

    /// Sweep from the start ray to the end ray, in `(0, 2π]`.
    pub fn sweep_angle(&self) -> f64 {
        let sweep = self.angle_of(self.point4.position()) - self.start_angle();
        let sweep = sweep.rem_euclid(TAU);
        if sweep <= f64::EPSILON { TAU } else { sweep }
    }

    pub fn as_kurbo(&self) -> KurboArc {
        let rect = self.ellipse_rect();
        KurboArc::new(
            rect.center(),
            Vec2::new(rect.width() / 2.0, rect.height() / 2.0),
            self.start_angle(),
            self.sweep_angle(),
            0.0,
        )
    }
}

impl ShapeTrait for Arc {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.ellipse_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_path_dist(point, &self.to_path()) <= tolerance
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
        vec![&self.point1, &self.point2, &self.point3, &self.point4]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![
            &mut self.point1,
            &mut self.point2,
            &mut self.point3,
            &mut self.point4,
        ]
    }
}
