//! Four-click arc tool.
//!
//! Clicks place, in order: one corner of the ellipse bounds, the opposite
//! corner, the start ray point and the end ray point.

use super::{hover, Tool, ToolKind, ToolState};
use crate::editor::{Editor, ToolResult};
use crate::point::PointRef;
use crate::shapes::{Arc, Shape, ShapeId};
use kurbo::Point;

#[derive(Debug)]
struct Gesture {
    id: ShapeId,
    point2: PointRef,
    point3: PointRef,
    point4: PointRef,
}

#[derive(Debug, Default)]
pub struct ArcTool {
    state: ToolState,
    gesture: Option<Gesture>,
}

impl ArcTool {
    fn reset(&mut self) {
        self.state = ToolState::None;
        self.gesture = None;
    }
}

impl Tool for ArcTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Arc
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let position = editor.snap(position);
        if self.gesture.is_none() {
            let point1 = editor.connect_or_create(position)?;
            let point2 = editor.new_point(position);
            let point3 = editor.new_point(position);
            let point4 = editor.new_point(position);
            let mut arc = Arc::new(point1.clone(), point2.clone(), point3.clone(), point4.clone());
            arc.is_stroked = editor.options.default_is_stroked;
            arc.is_filled = editor.options.default_is_filled;
            let id = editor.begin_working(Shape::Arc(arc))?;
            editor.add_helper(&point1)?;
            editor.add_helper(&point2)?;
            self.gesture = Some(Gesture {
                id,
                point2,
                point3,
                point4,
            });
            self.state = ToolState::One;
            log::debug!("Arc: None -> One");
            return Ok(());
        }
        let Some(gesture) = &mut self.gesture else {
            return Ok(());
        };

        match self.state {
            ToolState::One => {
                gesture.point2.set_position(position);
                gesture.point2 =
                    editor.connect_working_point(gesture.id, &gesture.point2, position)?;
                gesture.point3.set_position(position);
                editor.add_helper(&gesture.point3)?;
                self.state = ToolState::Two;
                log::debug!("Arc: One -> Two");
            }
            ToolState::Two => {
                gesture.point3.set_position(position);
                gesture.point3 =
                    editor.connect_working_point(gesture.id, &gesture.point3, position)?;
                gesture.point4.set_position(position);
                editor.add_helper(&gesture.point4)?;
                self.state = ToolState::Three;
                log::debug!("Arc: Two -> Three");
            }
            ToolState::Three => {
                gesture.point4.set_position(position);
                gesture.point4 =
                    editor.connect_working_point(gesture.id, &gesture.point4, position)?;
                editor.commit_working(gesture.id)?;
                self.reset();
                log::debug!("Arc: Three -> None");
            }
            ToolState::None => self.reset(),
        }
        Ok(())
    }

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let Some(gesture) = &self.gesture else {
            return hover(editor, position);
        };
        let position = editor.snap(position);
        match self.state {
            ToolState::One => gesture.point2.set_position(position),
            ToolState::Two => gesture.point3.set_position(position),
            ToolState::Three => gesture.point4.set_position(position),
            ToolState::None => {}
        }
        editor.invalidate();
        Ok(())
    }

    fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()> {
        if self.state != ToolState::None {
            editor.discard_working()?;
            log::debug!("Arc: cancelled");
        }
        self.reset();
        Ok(())
    }
}
