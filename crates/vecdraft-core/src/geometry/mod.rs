//! Path geometry: figures built from segment primitives.

mod context;
mod segment;

pub use context::{GeometryContext, GeometryError, GeometryResult};
pub use segment::{Segment, SegmentFlags, SegmentKind, SweepDirection};

use crate::point::PointRef;
use kurbo::{Arc, BezPath, Point, SvgArc, Vec2};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used when converting arcs to curves.
const ARC_TOLERANCE: f64 = 0.1;

/// Rule deciding which regions of a self-intersecting path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    Nonzero,
}

impl FillRule {
    /// Whether a winding number counts as inside under this rule.
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::Nonzero => winding != 0,
        }
    }
}

/// One contiguous sub-path.
#[derive(Debug)]
pub struct Figure {
    pub start_point: PointRef,
    pub segments: Vec<Segment>,
    pub is_filled: bool,
    pub is_closed: bool,
}

impl Figure {
    /// The start point followed by every segment's points, in order.
    pub fn points(&self) -> impl Iterator<Item = &PointRef> {
        std::iter::once(&self.start_point).chain(self.segments.iter().flat_map(|s| s.points()))
    }

    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut PointRef> {
        std::iter::once(&mut self.start_point)
            .chain(self.segments.iter_mut().flat_map(|s| s.points_mut()))
    }

    /// The point the figure currently ends at.
    pub fn last_point(&self) -> &PointRef {
        self.segments
            .iter()
            .rev()
            .find_map(|s| s.end_point())
            .unwrap_or(&self.start_point)
    }

    /// Append this figure to `path`.
    pub fn append_to(&self, path: &mut BezPath) {
        let mut current = self.start_point.position();
        path.move_to(current);

        for segment in &self.segments {
            match &segment.kind {
                SegmentKind::Line { point } => path.line_to(point.position()),
                SegmentKind::Arc {
                    point,
                    size,
                    rotation_angle,
                    is_large_arc,
                    sweep_direction,
                } => {
                    let svg = SvgArc {
                        from: current,
                        to: point.position(),
                        radii: Vec2::new(size.width, size.height),
                        x_rotation: rotation_angle.to_radians(),
                        large_arc: *is_large_arc,
                        sweep: *sweep_direction == SweepDirection::Clockwise,
                    };
                    match Arc::from_svg_arc(&svg) {
                        Some(arc) => {
                            for el in arc.append_iter(ARC_TOLERANCE) {
                                path.push(el);
                            }
                        }
                        // Degenerate radii collapse to a straight line.
                        None => path.line_to(svg.to),
                    }
                }
                SegmentKind::CubicBezier {
                    point1,
                    point2,
                    point3,
                } => path.curve_to(point1.position(), point2.position(), point3.position()),
                SegmentKind::QuadraticBezier { point1, point2 } => {
                    path.quad_to(point1.position(), point2.position())
                }
                SegmentKind::PolyLine { points } => {
                    for p in points {
                        path.line_to(p.position());
                    }
                }
                SegmentKind::PolyCubicBezier { points } => {
                    let chunks = points.chunks_exact(3);
                    if !chunks.remainder().is_empty() {
                        log::warn!(
                            "Poly cubic segment has {} trailing points, ignoring them",
                            chunks.remainder().len()
                        );
                    }
                    for c in chunks {
                        path.curve_to(c[0].position(), c[1].position(), c[2].position());
                    }
                }
                SegmentKind::PolyQuadraticBezier { points } => {
                    let chunks = points.chunks_exact(2);
                    if !chunks.remainder().is_empty() {
                        log::warn!("Poly quadratic segment has a trailing point, ignoring it");
                    }
                    for c in chunks {
                        path.quad_to(c[0].position(), c[1].position());
                    }
                }
            }
            if let Some(end) = segment.end_point() {
                current = end.position();
            }
        }

        if self.is_closed {
            path.close_path();
        }
    }
}

/// Ordered collection of figures; the resolved shape of a path object.
#[derive(Debug, Default)]
pub struct Geometry {
    pub figures: Vec<Figure>,
    pub fill_rule: FillRule,
}

impl Geometry {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            figures: Vec::new(),
            fill_rule,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Every point reachable from the geometry, figure by figure.
    pub fn points(&self) -> impl Iterator<Item = &PointRef> {
        self.figures.iter().flat_map(|f| f.points())
    }

    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut PointRef> {
        self.figures.iter_mut().flat_map(|f| f.points_mut())
    }

    /// Convert to a kurbo path for rendering and hit testing.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for figure in &self.figures {
            figure.append_to(&mut path);
        }
        path
    }

    /// Path containing only the figures that enclose a fillable area.
    pub fn fill_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for figure in self.figures.iter().filter(|f| f.is_filled && f.is_closed) {
            figure.append_to(&mut path);
        }
        path
    }

    /// Whether `point` lies inside a filled, closed figure under the fill rule.
    pub fn fill_contains(&self, point: Point) -> bool {
        let path = self.fill_path();
        if path.elements().is_empty() {
            return false;
        }
        self.fill_rule.is_inside(kurbo::Shape::winding(&path, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Size};

    fn triangle() -> Geometry {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(PointRef::new(0.0, 0.0), true, true);
        ctx.line_to(PointRef::new(10.0, 0.0), SegmentFlags::default()).unwrap();
        ctx.line_to(PointRef::new(0.0, 10.0), SegmentFlags::default()).unwrap();
        geometry
    }

    #[test]
    fn test_figure_points_count_and_order() {
        let mut geometry = Geometry::default();
        let start = PointRef::new(0.0, 0.0);
        {
            let mut ctx = GeometryContext::new(&mut geometry);
            ctx.begin_figure(start.clone(), false, false);
            ctx.line_to(PointRef::new(1.0, 0.0), SegmentFlags::default()).unwrap();
            ctx.cubic_bezier_to(
                PointRef::new(2.0, 0.0),
                PointRef::new(3.0, 0.0),
                PointRef::new(4.0, 0.0),
                SegmentFlags::default(),
            )
            .unwrap();
            ctx.poly_line_to(
                vec![PointRef::new(5.0, 0.0), PointRef::new(6.0, 0.0)],
                SegmentFlags::default(),
            )
            .unwrap();
        }
        let figure = &geometry.figures[0];
        let xs: Vec<f64> = figure.points().map(|p| p.x()).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(figure.points().next().is_some_and(|p| p.ptr_eq(&start)));
        // Restartable.
        assert_eq!(figure.points().count(), 7);
        assert!((figure.last_point().x() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_geometry() {
        let geometry = Geometry::default();
        assert!(geometry.is_empty());
        assert_eq!(geometry.points().count(), 0);
        assert!(geometry.to_path().elements().is_empty());
        assert!(!geometry.fill_contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_to_path_closes_figure() {
        let path = triangle().to_path();
        let els = path.elements();
        assert!(matches!(els.first(), Some(PathEl::MoveTo(_))));
        assert!(matches!(els.last(), Some(PathEl::ClosePath)));
        assert_eq!(els.len(), 4);
    }

    #[test]
    fn test_fill_contains() {
        let geometry = triangle();
        assert!(geometry.fill_contains(Point::new(2.0, 2.0)));
        assert!(!geometry.fill_contains(Point::new(9.0, 9.0)));
    }

    #[test]
    fn test_arc_segment_converts_to_curves() {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(PointRef::new(0.0, 0.0), false, false);
        ctx.arc_to(
            PointRef::new(20.0, 0.0),
            Size::new(10.0, 10.0),
            0.0,
            false,
            SweepDirection::Clockwise,
            SegmentFlags::default(),
        )
        .unwrap();
        let path = geometry.to_path();
        assert!(path.elements().iter().any(|el| matches!(el, PathEl::CurveTo(..))));
    }

    #[test]
    fn test_degenerate_arc_becomes_line() {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(PointRef::new(0.0, 0.0), false, false);
        ctx.arc_to(
            PointRef::new(20.0, 0.0),
            Size::new(0.0, 0.0),
            0.0,
            false,
            SweepDirection::CounterClockwise,
            SegmentFlags::default(),
        )
        .unwrap();
        let els = geometry.to_path().elements().to_vec();
        assert_eq!(els.len(), 2);
        assert!(matches!(els[1], PathEl::LineTo(p) if (p.x - 20.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_incomplete_poly_cubic_is_tolerated() {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        ctx.begin_figure(PointRef::new(0.0, 0.0), false, false);
        ctx.poly_cubic_bezier_to(
            vec![
                PointRef::new(1.0, 1.0),
                PointRef::new(2.0, 1.0),
                PointRef::new(3.0, 0.0),
                PointRef::new(4.0, 4.0),
            ],
            SegmentFlags::default(),
        )
        .unwrap();
        let els = geometry.to_path().elements().to_vec();
        assert_eq!(els.len(), 2);
        assert_eq!(geometry.points().count(), 5);
    }
}
