//! Point marker shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::point::{PointMarker, PointRef};
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use uuid::Uuid;

/// A glyph drawn at a point, e.g. the helper markers shown while a tool
/// places control points. The marker shares the point with the shape it
/// decorates, so it follows every move of that point.
#[derive(Debug)]
pub struct PointShape {
    pub(crate) id: ShapeId,
    pub point: PointRef,
    /// Style properties.
    pub style: ShapeStyle,
}

impl PointShape {
    pub fn new(point: PointRef, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            point,
            style,
        }
    }

    /// The glyph of the underlying point, or the default glyph.
    pub fn marker(&self) -> PointMarker {
        self.point.marker().unwrap_or_default()
    }
}

impl ShapeTrait for PointShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let h = self.marker().half_extent();
        let c = self.point.position();
        Rect::new(c.x - h, c.y - h, c.x + h, c.y + h)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.point.distance_to(point) <= tolerance
    }

    fn to_path(&self) -> BezPath {
        let c = self.point.position();
        match self.marker() {
            PointMarker::Rectangle { .. } => self.bounds().to_path(0.1),
            PointMarker::Ellipse { radius } => Circle::new(c, radius).to_path(0.1),
            PointMarker::Cross { half_size: h } => {
                let mut path = BezPath::new();
                path.move_to((c.x - h, c.y - h));
                path.line_to((c.x + h, c.y + h));
                path.move_to((c.x + h, c.y - h));
                path.line_to((c.x - h, c.y + h));
                path
            }
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn is_stroked(&self) -> bool {
        true
    }

    fn is_filled(&self) -> bool {
        !matches!(self.marker(), PointMarker::Cross { .. })
    }

    fn points(&self) -> Vec<&PointRef> {
        vec![&self.point]
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        vec![&mut self.point]
    }
}
