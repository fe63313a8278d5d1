//! Builder that appends figures and segments to a [`Geometry`].

use super::{Figure, Geometry, Segment, SegmentFlags, SegmentKind, SweepDirection};
use crate::point::PointRef;
use kurbo::Size;
use thiserror::Error;

/// Geometry construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("No current figure: begin_figure must be called first")]
    NoCurrentFigure,
}

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Stateful builder with at most one current figure.
///
/// Construction is append-only: segments are never removed through the
/// context.
#[derive(Debug)]
pub struct GeometryContext<'g> {
    geometry: &'g mut Geometry,
    current_figure: Option<usize>,
}

impl<'g> GeometryContext<'g> {
    /// Start building into `geometry` with no current figure.
    pub fn new(geometry: &'g mut Geometry) -> Self {
        Self {
            geometry,
            current_figure: None,
        }
    }

    /// Re-open the last figure of `geometry` as the current figure.
    pub fn resume(geometry: &'g mut Geometry) -> Self {
        let current_figure = geometry.figures.len().checked_sub(1);
        Self {
            geometry,
            current_figure,
        }
    }

    /// Append a new figure and make it current.
    pub fn begin_figure(&mut self, start_point: PointRef, is_filled: bool, is_closed: bool) {
        self.geometry.figures.push(Figure {
            start_point,
            segments: Vec::new(),
            is_filled,
            is_closed,
        });
        self.current_figure = Some(self.geometry.figures.len() - 1);
    }

    pub fn set_closed_state(&mut self, is_closed: bool) -> GeometryResult<()> {
        self.current_mut()?.is_closed = is_closed;
        Ok(())
    }

    pub fn line_to(&mut self, point: PointRef, flags: SegmentFlags) -> GeometryResult<()> {
        self.push(SegmentKind::Line { point }, flags)
    }

    /// Append an elliptical arc. `rotation_angle` is in degrees.
    pub fn arc_to(
        &mut self,
        point: PointRef,
        size: Size,
        rotation_angle: f64,
        is_large_arc: bool,
        sweep_direction: SweepDirection,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(
            SegmentKind::Arc {
                point,
                size,
                rotation_angle,
                is_large_arc,
                sweep_direction,
            },
            flags,
        )
    }

    pub fn cubic_bezier_to(
        &mut self,
        point1: PointRef,
        point2: PointRef,
        point3: PointRef,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(
            SegmentKind::CubicBezier {
                point1,
                point2,
                point3,
            },
            flags,
        )
    }

    pub fn quadratic_bezier_to(
        &mut self,
        point1: PointRef,
        point2: PointRef,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(SegmentKind::QuadraticBezier { point1, point2 }, flags)
    }

    pub fn poly_line_to(
        &mut self,
        points: Vec<PointRef>,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(SegmentKind::PolyLine { points }, flags)
    }

    pub fn poly_cubic_bezier_to(
        &mut self,
        points: Vec<PointRef>,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(SegmentKind::PolyCubicBezier { points }, flags)
    }

    pub fn poly_quadratic_bezier_to(
        &mut self,
        points: Vec<PointRef>,
        flags: SegmentFlags,
    ) -> GeometryResult<()> {
        self.push(SegmentKind::PolyQuadraticBezier { points }, flags)
    }

    /// The figure segments are currently appended to.
    pub fn current_figure(&self) -> Option<&Figure> {
        self.current_figure.and_then(|i| self.geometry.figures.get(i))
    }

    fn current_mut(&mut self) -> GeometryResult<&mut Figure> {
        self.current_figure
            .and_then(|i| self.geometry.figures.get_mut(i))
            .ok_or(GeometryError::NoCurrentFigure)
    }

    fn push(&mut self, kind: SegmentKind, flags: SegmentFlags) -> GeometryResult<()> {
        self.current_mut()?.segments.push(Segment::new(kind, flags));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_before_figure_fails() {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::new(&mut geometry);
        assert_eq!(
            ctx.line_to(PointRef::new(1.0, 1.0), SegmentFlags::default()),
            Err(GeometryError::NoCurrentFigure)
        );
        assert_eq!(ctx.set_closed_state(false), Err(GeometryError::NoCurrentFigure));
        assert!(geometry.figures.is_empty());
    }

    #[test]
    fn test_build_two_figures() {
        let mut geometry = Geometry::default();
        {
            let mut ctx = GeometryContext::new(&mut geometry);
            ctx.begin_figure(PointRef::new(0.0, 0.0), true, true);
            ctx.line_to(PointRef::new(10.0, 0.0), SegmentFlags::default()).unwrap();
            ctx.quadratic_bezier_to(
                PointRef::new(10.0, 10.0),
                PointRef::new(0.0, 10.0),
                SegmentFlags::default(),
            )
            .unwrap();
            ctx.begin_figure(PointRef::new(20.0, 20.0), false, false);
            ctx.arc_to(
                PointRef::new(30.0, 20.0),
                Size::new(5.0, 5.0),
                0.0,
                false,
                SweepDirection::Clockwise,
                SegmentFlags::default(),
            )
            .unwrap();
            ctx.set_closed_state(true).unwrap();
        }
        assert_eq!(geometry.figures.len(), 2);
        assert_eq!(geometry.figures[0].segments.len(), 2);
        assert!(geometry.figures[0].is_closed);
        assert_eq!(geometry.figures[1].segments.len(), 1);
        assert!(geometry.figures[1].is_closed);
        assert!(!geometry.figures[1].is_filled);
    }

    #[test]
    fn test_resume_appends_to_last_figure() {
        let mut geometry = Geometry::default();
        GeometryContext::new(&mut geometry).begin_figure(PointRef::new(0.0, 0.0), false, false);

        let mut ctx = GeometryContext::resume(&mut geometry);
        assert!(ctx.current_figure().is_some());
        ctx.poly_line_to(
            vec![PointRef::new(1.0, 0.0), PointRef::new(2.0, 0.0)],
            SegmentFlags::default(),
        )
        .unwrap();
        assert_eq!(geometry.figures[0].segments.len(), 1);
    }

    #[test]
    fn test_resume_empty_geometry_has_no_figure() {
        let mut geometry = Geometry::default();
        let mut ctx = GeometryContext::resume(&mut geometry);
        assert!(ctx.current_figure().is_none());
        assert!(ctx.poly_cubic_bezier_to(Vec::new(), SegmentFlags::default()).is_err());
    }
}
