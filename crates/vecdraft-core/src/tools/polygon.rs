//! Polygon tool: a chain of lines kept in one group.
//!
//! Consecutive sides share their corner points, and the group registers
//! those corners as connectors so the polygon moves as one piece.

use super::{hover, Tool, ToolKind, ToolState};
use crate::connection;
use crate::editor::{Editor, ToolResult};
use crate::point::PointRef;
use crate::shapes::{Group, Line, Shape, ShapeId};
use kurbo::Point;

#[derive(Debug)]
struct Gesture {
    id: ShapeId,
    first: PointRef,
    /// Free end of the side being placed.
    end: PointRef,
}

#[derive(Debug, Default)]
pub struct PolygonTool {
    state: ToolState,
    gesture: Option<Gesture>,
}

fn working_group(editor: &mut Editor, id: ShapeId) -> ToolResult<Option<&mut Group>> {
    Ok(editor.working_shape_mut(id)?.and_then(Shape::as_group_mut))
}

fn side(editor: &Editor, start: PointRef, end: PointRef) -> Shape {
    let mut line = Line::new(start, end);
    line.is_stroked = editor.options.default_is_stroked;
    line.style = editor.current_style.clone();
    Shape::Line(line)
}

/// Register every corner shared by two sides as a group connector.
fn register_corners(group: &mut Group) {
    for (point, _) in connection::shared_points(group.children.iter()) {
        group.add_connector(point);
    }
}

impl PolygonTool {
    fn reset(&mut self) {
        self.state = ToolState::None;
        self.gesture = None;
    }

    fn begin(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let first = editor.connect_or_create(position)?;
        let end = editor.new_point(position);
        let group = Group::new(vec![side(editor, first.clone(), end.clone())]);
        let id = editor.begin_working(Shape::Group(group))?;
        editor.add_helper(&first)?;
        editor.add_helper(&end)?;
        self.gesture = Some(Gesture { id, first, end });
        self.state = ToolState::One;
        log::debug!("Polygon: None -> One");
        Ok(())
    }
}

impl Tool for PolygonTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polygon
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let position = editor.snap(position);
        let Some(gesture) = &mut self.gesture else {
            return self.begin(editor, position);
        };

        let sides = working_group(editor, gesture.id)?.map_or(0, |g| g.children.len());
        if sides >= 3 && gesture.first.distance_to(position) <= editor.options.hit_threshold {
            let (end, first) = (gesture.end.clone(), gesture.first.clone());
            if let Some(group) = working_group(editor, gesture.id)? {
                if let Some(Shape::Line(last)) = group.children.last_mut() {
                    if last.end.ptr_eq(&end) {
                        last.end = first;
                    }
                }
                register_corners(group);
            }
            editor.commit_working(gesture.id)?;
            log::debug!("Polygon: closed with {} sides", sides);
            self.reset();
            return Ok(());
        }

        gesture.end.set_position(position);
        let corner = editor.connect_working_point(gesture.id, &gesture.end, position)?;
        let end = editor.new_point(position);
        let next = side(editor, corner, end.clone());
        if let Some(group) = working_group(editor, gesture.id)? {
            group.children.push(next);
        }
        editor.add_helper(&end)?;
        gesture.end = end;
        self.state = ToolState::Two;
        log::debug!("Polygon: side {} fixed", sides);
        Ok(())
    }

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let Some(gesture) = &self.gesture else {
            return hover(editor, position);
        };
        gesture.end.set_position(editor.snap(position));
        editor.invalidate();
        Ok(())
    }

    fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()> {
        if self.state != ToolState::None {
            editor.discard_working()?;
            log::debug!("Polygon: cancelled");
        }
        self.reset();
        Ok(())
    }

    /// Drop the side following the pointer and commit the open chain.
    fn finish(&mut self, editor: &mut Editor) -> ToolResult<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        let remaining = match working_group(editor, gesture.id)? {
            Some(group) => {
                group.children.pop();
                register_corners(group);
                group.children.len()
            }
            None => 0,
        };
        if remaining > 0 {
            editor.commit_working(gesture.id)?;
            log::debug!("Polygon: finished with {} sides", remaining);
        } else {
            editor.discard_working()?;
        }
        self.reset();
        Ok(())
    }
}
