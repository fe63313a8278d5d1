//! Segment primitives.

use crate::point::PointRef;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Direction in which an elliptical arc is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Stroke and join flags shared by every segment kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentFlags {
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

impl Default for SegmentFlags {
    fn default() -> Self {
        Self {
            is_stroked: true,
            is_smooth_join: true,
        }
    }
}

impl SegmentFlags {
    pub fn new(is_stroked: bool, is_smooth_join: bool) -> Self {
        Self {
            is_stroked,
            is_smooth_join,
        }
    }
}

/// Kind-specific data of a segment.
///
/// The last point of every kind is the segment's end point; the previous
/// segment's end point (or the figure start) is its implicit start.
#[derive(Debug)]
pub enum SegmentKind {
    Line {
        point: PointRef,
    },
    Arc {
        point: PointRef,
        size: Size,
        /// X-axis rotation of the ellipse, in degrees.
        rotation_angle: f64,
        is_large_arc: bool,
        sweep_direction: SweepDirection,
    },
    CubicBezier {
        point1: PointRef,
        point2: PointRef,
        point3: PointRef,
    },
    QuadraticBezier {
        point1: PointRef,
        point2: PointRef,
    },
    PolyLine {
        points: Vec<PointRef>,
    },
    /// Consecutive triples of (control, control, end) points.
    PolyCubicBezier {
        points: Vec<PointRef>,
    },
    /// Consecutive pairs of (control, end) points.
    PolyQuadraticBezier {
        points: Vec<PointRef>,
    },
}

/// One drawing instruction inside a figure.
#[derive(Debug)]
pub struct Segment {
    pub kind: SegmentKind,
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

impl Segment {
    pub fn new(kind: SegmentKind, flags: SegmentFlags) -> Self {
        Self {
            kind,
            is_stroked: flags.is_stroked,
            is_smooth_join: flags.is_smooth_join,
        }
    }

    pub fn flags(&self) -> SegmentFlags {
        SegmentFlags::new(self.is_stroked, self.is_smooth_join)
    }

    /// Points referenced by the segment, in drawing order.
    pub fn points(&self) -> Vec<&PointRef> {
        match &self.kind {
            SegmentKind::Line { point } | SegmentKind::Arc { point, .. } => vec![point],
            SegmentKind::CubicBezier {
                point1,
                point2,
                point3,
            } => vec![point1, point2, point3],
            SegmentKind::QuadraticBezier { point1, point2 } => vec![point1, point2],
            SegmentKind::PolyLine { points }
            | SegmentKind::PolyCubicBezier { points }
            | SegmentKind::PolyQuadraticBezier { points } => points.iter().collect(),
        }
    }

    pub fn points_mut(&mut self) -> Vec<&mut PointRef> {
        match &mut self.kind {
            SegmentKind::Line { point } | SegmentKind::Arc { point, .. } => vec![point],
            SegmentKind::CubicBezier {
                point1,
                point2,
                point3,
            } => vec![point1, point2, point3],
            SegmentKind::QuadraticBezier { point1, point2 } => vec![point1, point2],
            SegmentKind::PolyLine { points }
            | SegmentKind::PolyCubicBezier { points }
            | SegmentKind::PolyQuadraticBezier { points } => points.iter_mut().collect(),
        }
    }

    /// The point where the segment ends. `None` only for an empty poly segment.
    pub fn end_point(&self) -> Option<&PointRef> {
        match &self.kind {
            SegmentKind::Line { point } | SegmentKind::Arc { point, .. } => Some(point),
            SegmentKind::CubicBezier { point3, .. } => Some(point3),
            SegmentKind::QuadraticBezier { point2, .. } => Some(point2),
            SegmentKind::PolyLine { points }
            | SegmentKind::PolyCubicBezier { points }
            | SegmentKind::PolyQuadraticBezier { points } => points.last(),
        }
    }

    pub fn point_count(&self) -> usize {
        match &self.kind {
            SegmentKind::Line { .. } | SegmentKind::Arc { .. } => 1,
            SegmentKind::CubicBezier { .. } => 3,
            SegmentKind::QuadraticBezier { .. } => 2,
            SegmentKind::PolyLine { points }
            | SegmentKind::PolyCubicBezier { points }
            | SegmentKind::PolyQuadraticBezier { points } => points.len(),
        }
    }
}
