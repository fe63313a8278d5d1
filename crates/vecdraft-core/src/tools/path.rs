//! Path tool: builds one open figure segment by segment.
//!
//! Each segment is appended to the working path as soon as it starts, so
//! the preview is always the real geometry. Clicks fix the segment's points
//! one at a time; fixing the end point starts the next segment. Ending on
//! the figure's own start point closes the figure and commits it.

use super::{hover, Tool, ToolKind, ToolState};
use crate::editor::{Editor, ToolResult};
use crate::geometry::{GeometryContext, SegmentKind, SweepDirection};
use crate::point::PointRef;
use crate::shapes::{Path, Shape, ShapeId, ShapeTrait};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Segment kind appended by the path tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PathSegmentMode {
    #[default]
    Line,
    Arc,
    CubicBezier,
    QuadraticBezier,
}

impl PathSegmentMode {
    /// Clicks needed to place one segment of this kind.
    pub fn point_count(self) -> usize {
        match self {
            PathSegmentMode::Line | PathSegmentMode::Arc => 1,
            PathSegmentMode::CubicBezier => 3,
            PathSegmentMode::QuadraticBezier => 2,
        }
    }
}

#[derive(Debug)]
struct Gesture {
    id: ShapeId,
    start: PointRef,
    /// End point of the last complete segment, or the figure start.
    anchor: PointRef,
    mode: PathSegmentMode,
    /// Points of the segment being placed.
    pending: Vec<PointRef>,
    fixed: usize,
}

impl Gesture {
    fn drag(&self, position: Point) {
        for point in &self.pending[self.fixed..] {
            point.set_position(position);
        }
    }
}

#[derive(Debug, Default)]
pub struct PathTool {
    mode: PathSegmentMode,
    state: ToolState,
    gesture: Option<Gesture>,
}

fn working_path(editor: &mut Editor, id: ShapeId) -> ToolResult<Option<&mut Path>> {
    Ok(match editor.working_shape_mut(id)? {
        Some(Shape::Path(path)) => Some(path),
        _ => None,
    })
}

/// Append a segment of `mode` whose points all start at `position`.
fn append_segment(
    editor: &mut Editor,
    id: ShapeId,
    mode: PathSegmentMode,
    position: Point,
) -> ToolResult<Vec<PointRef>> {
    let points: Vec<PointRef> = (0..mode.point_count())
        .map(|_| editor.new_point(position))
        .collect();
    let flags = editor.options.segment_flags();
    if let Some(path) = working_path(editor, id)? {
        let mut ctx = GeometryContext::resume(&mut path.geometry);
        match mode {
            PathSegmentMode::Line => ctx.line_to(points[0].clone(), flags)?,
            PathSegmentMode::Arc => ctx.arc_to(
                points[0].clone(),
                Size::ZERO,
                0.0,
                false,
                SweepDirection::Clockwise,
                flags,
            )?,
            PathSegmentMode::CubicBezier => {
                ctx.cubic_bezier_to(points[0].clone(), points[1].clone(), points[2].clone(), flags)?
            }
            PathSegmentMode::QuadraticBezier => {
                ctx.quadratic_bezier_to(points[0].clone(), points[1].clone(), flags)?
            }
        }
    }
    editor.add_helper(&points[0])?;
    Ok(points)
}

/// Keep an arc segment a half circle over its chord while it is dragged.
fn fit_arc(editor: &mut Editor, gesture: &Gesture, position: Point) -> ToolResult<()> {
    let radius = gesture.anchor.distance_to(position) / 2.0;
    if let Some(path) = working_path(editor, gesture.id)? {
        let last = path
            .geometry
            .figures
            .last_mut()
            .and_then(|f| f.segments.last_mut());
        if let Some(segment) = last {
            if let SegmentKind::Arc { size, .. } = &mut segment.kind {
                *size = Size::new(radius, radius);
            }
        }
    }
    Ok(())
}

impl PathTool {
    pub fn mode(&self) -> PathSegmentMode {
        self.mode
    }

    /// Takes effect from the next segment on.
    pub fn set_mode(&mut self, mode: PathSegmentMode) {
        self.mode = mode;
    }

    fn reset(&mut self) {
        self.state = ToolState::None;
        self.gesture = None;
    }

    fn begin(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let start = editor.connect_or_create(position)?;
        let mut path = Path::empty(editor.options.default_fill_rule);
        path.is_stroked = editor.options.default_is_stroked;
        path.is_filled = editor.options.default_is_filled;
        GeometryContext::new(&mut path.geometry).begin_figure(
            start.clone(),
            editor.options.default_is_filled,
            false,
        );
        let id = editor.begin_working(Shape::Path(path))?;
        editor.add_helper(&start)?;
        let pending = append_segment(editor, id, self.mode, position)?;
        self.gesture = Some(Gesture {
            id,
            start: start.clone(),
            anchor: start,
            mode: self.mode,
            pending,
            fixed: 0,
        });
        self.state = ToolState::One;
        log::debug!("Path: None -> One ({:?})", self.mode);
        Ok(())
    }

    /// Fix the end point of the pending segment. Returns true when the
    /// figure was closed and committed.
    fn complete_segment(&mut self, editor: &mut Editor, position: Point) -> ToolResult<bool> {
        let mode = self.mode;
        let Some(gesture) = &mut self.gesture else {
            return Ok(false);
        };
        let end = gesture.pending[gesture.pending.len() - 1].clone();
        let segment_count = working_path(editor, gesture.id)?
            .and_then(|p| p.geometry.figures.last().map(|f| f.segments.len()))
            .unwrap_or(0);

        // The pending segment counts; closing needs two fixed segments.
        let near_start = gesture.start.distance_to(position) <= editor.options.hit_threshold;
        if segment_count >= 3 && near_start {
            if let Some(path) = working_path(editor, gesture.id)? {
                path.replace_point(&end, &gesture.start);
                GeometryContext::resume(&mut path.geometry).set_closed_state(true)?;
            }
            editor.commit_working(gesture.id)?;
            log::debug!("Path: closed and committed {} segments", segment_count);
            return Ok(true);
        }

        gesture.anchor = editor.connect_working_point(gesture.id, &end, position)?;
        gesture.pending = append_segment(editor, gesture.id, mode, position)?;
        gesture.mode = mode;
        gesture.fixed = 0;
        Ok(false)
    }
}

impl Tool for PathTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Path
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let position = editor.snap(position);
        let Some(gesture) = &mut self.gesture else {
            return self.begin(editor, position);
        };

        gesture.drag(position);
        if gesture.mode == PathSegmentMode::Arc {
            fit_arc(editor, gesture, position)?;
        }
        let next = gesture.fixed + 1;
        if next < gesture.pending.len() {
            editor.add_helper(&gesture.pending[next])?;
            gesture.fixed = next;
            self.state = if next == 1 {
                ToolState::Two
            } else {
                ToolState::Three
            };
            return Ok(());
        }

        if self.complete_segment(editor, position)? {
            self.reset();
        } else {
            self.state = ToolState::One;
        }
        Ok(())
    }

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let Some(gesture) = &self.gesture else {
            return hover(editor, position);
        };
        let position = editor.snap(position);
        gesture.drag(position);
        if gesture.mode == PathSegmentMode::Arc {
            fit_arc(editor, gesture, position)?;
        }
        editor.invalidate();
        Ok(())
    }

    fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()> {
        if self.state != ToolState::None {
            editor.discard_working()?;
            log::debug!("Path: cancelled");
        }
        self.reset();
        Ok(())
    }

    /// Drop the segment being placed and commit what remains.
    fn finish(&mut self, editor: &mut Editor) -> ToolResult<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        let remaining = match working_path(editor, gesture.id)? {
            Some(path) => path
                .geometry
                .figures
                .last_mut()
                .map(|figure| {
                    figure.segments.pop();
                    figure.segments.len()
                })
                .unwrap_or(0),
            None => 0,
        };
        if remaining > 0 {
            editor.commit_working(gesture.id)?;
            log::debug!("Path: finished with {} segments", remaining);
        } else {
            editor.discard_working()?;
            log::debug!("Path: finished empty, discarded");
        }
        self.reset();
        Ok(())
    }
}
