//! Two-click tools: line, rectangle and ellipse.

use super::{hover, Tool, ToolKind, ToolState};
use crate::editor::{Editor, ToolResult};
use crate::options::Options;
use crate::point::PointRef;
use crate::shapes::{Ellipse, Line, Rectangle, Shape, ShapeId};
use kurbo::Point;

type Build = fn(&Options, PointRef, PointRef) -> Shape;

/// Anchor on the first click, drag the second point, commit on the second
/// click.
#[derive(Debug)]
pub struct TwoPointTool {
    kind: ToolKind,
    build: Build,
    state: ToolState,
    /// Working shape and its free point.
    working: Option<(ShapeId, PointRef)>,
}

impl TwoPointTool {
    fn new(kind: ToolKind, build: Build) -> Self {
        Self {
            kind,
            build,
            state: ToolState::None,
            working: None,
        }
    }

    pub fn line() -> Self {
        Self::new(ToolKind::Line, |options, start, end| {
            let mut line = Line::new(start, end);
            line.is_stroked = options.default_is_stroked;
            Shape::Line(line)
        })
    }

    pub fn rectangle() -> Self {
        Self::new(ToolKind::Rectangle, |options, top_left, bottom_right| {
            let mut rect = Rectangle::new(top_left, bottom_right);
            rect.is_stroked = options.default_is_stroked;
            rect.is_filled = options.default_is_filled;
            Shape::Rectangle(rect)
        })
    }

    pub fn ellipse() -> Self {
        Self::new(ToolKind::Ellipse, |options, top_left, bottom_right| {
            let mut ellipse = Ellipse::new(top_left, bottom_right);
            ellipse.is_stroked = options.default_is_stroked;
            ellipse.is_filled = options.default_is_filled;
            Shape::Ellipse(ellipse)
        })
    }

    fn reset(&mut self) {
        self.state = ToolState::None;
        self.working = None;
    }
}

impl Tool for TwoPointTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn state(&self) -> ToolState {
        self.state
    }

    fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        let position = editor.snap(position);
        match (self.state, &self.working) {
            (ToolState::None, _) => {
                let anchor = editor.connect_or_create(position)?;
                let free = editor.new_point(position);
                let shape = (self.build)(&editor.options, anchor.clone(), free.clone());
                let id = editor.begin_working(shape)?;
                editor.add_helper(&anchor)?;
                editor.add_helper(&free)?;
                self.working = Some((id, free));
                self.state = ToolState::One;
                log::debug!("{:?}: None -> One at ({}, {})", self.kind, position.x, position.y);
            }
            (_, Some((id, free))) => {
                let (id, free) = (*id, free.clone());
                free.set_position(position);
                let connected = editor.connect_working_point(id, &free, position)?;
                self.working = Some((id, connected));
                editor.commit_working(id)?;
                self.reset();
                log::debug!("{:?}: One -> None", self.kind);
            }
            (_, None) => {
                editor.discard_working()?;
                self.reset();
            }
        }
        Ok(())
    }

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        match &self.working {
            Some((_, free)) => {
                free.set_position(editor.snap(position));
                editor.invalidate();
                Ok(())
            }
            None => hover(editor, position),
        }
    }

    fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()> {
        if self.state != ToolState::None {
            editor.discard_working()?;
            log::debug!("{:?}: cancelled", self.kind);
        }
        self.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::editor::ToolError;

    #[test]
    fn test_rectangle_round_trip() {
        let mut editor = unsnapped_editor();
        let mut tool = TwoPointTool::rectangle();

        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(tool.state(), ToolState::One);
        assert_eq!(working(&editor).len(), 1);
        assert!(editor.cancel_available);

        tool.pointer_move(&mut editor, Point::new(10.0, 10.0)).unwrap();
        let rect = match &working(&editor)[0] {
            Shape::Rectangle(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(rect.bottom_right.position(), Point::new(10.0, 10.0));

        tool.pointer_down(&mut editor, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(tool.state(), ToolState::None);
        assert!(working(&editor).is_empty());
        assert!(helpers(&editor).is_empty());
        assert!(!editor.cancel_available);
        let shapes = committed(&editor);
        assert_eq!(shapes.len(), 1);
        let rect = shapes[0].as_rectangle().unwrap();
        assert_eq!(rect.top_left.position(), Point::new(0.0, 0.0));
        assert_eq!(rect.bottom_right.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_rectangle_snaps_to_grid() {
        let mut editor = Editor::default();
        let mut tool = TwoPointTool::rectangle();
        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();
        tool.pointer_move(&mut editor, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(working(&editor)[0].points()[1].position(), Point::new(15.0, 15.0));
        tool.pointer_down(&mut editor, Point::new(10.0, 10.0)).unwrap();

        let rect = committed(&editor)[0].as_rectangle().unwrap();
        assert_eq!(rect.top_left.position(), Point::new(0.0, 0.0));
        assert_eq!(rect.bottom_right.position(), Point::new(15.0, 15.0));
    }

    #[test]
    fn test_cancel_leaves_document_untouched() {
        let mut editor = unsnapped_editor();
        let mut tool = TwoPointTool::rectangle();
        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();
        tool.pointer_move(&mut editor, Point::new(40.0, 20.0)).unwrap();
        assert_eq!(helpers(&editor).len(), 2);

        tool.pointer_cancel(&mut editor).unwrap();
        assert_eq!(tool.state(), ToolState::None);
        assert!(working(&editor).is_empty());
        assert!(helpers(&editor).is_empty());
        assert!(committed(&editor).is_empty());
        assert!(!editor.cancel_available);
    }

    #[test]
    fn test_line_connects_to_existing_point() {
        let mut editor = unsnapped_editor();
        editor.options.try_to_connect = true;
        let mut tool = TwoPointTool::line();

        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();
        tool.pointer_down(&mut editor, Point::new(100.0, 0.0)).unwrap();
        // Start the second line near the end of the first one.
        tool.pointer_down(&mut editor, Point::new(102.0, 3.0)).unwrap();
        tool.pointer_down(&mut editor, Point::new(100.0, 100.0)).unwrap();

        let shapes = committed(&editor);
        assert_eq!(shapes.len(), 2);
        let first = shapes[0].as_line().unwrap();
        let second = shapes[1].as_line().unwrap();
        assert!(first.end.ptr_eq(&second.start));

        // Moving the first line drags the shared endpoint of the second.
        let mut first_shape = editor.container_mut().unwrap().layers[0].shapes.remove(0);
        first_shape.move_by(0.0, 10.0);
        let second = committed(&editor)[0].as_line().unwrap();
        assert_eq!(second.start.position(), Point::new(100.0, 10.0));
    }

    #[test]
    fn test_end_point_connects_on_commit() {
        let mut editor = unsnapped_editor();
        editor.options.try_to_connect = true;
        let target = PointRef::new(50.0, 50.0);
        editor
            .current_layer_mut()
            .unwrap()
            .add(Shape::Line(Line::new(target.clone(), PointRef::new(80.0, 80.0))));

        let mut tool = TwoPointTool::ellipse();
        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();
        tool.pointer_down(&mut editor, Point::new(49.0, 52.0)).unwrap();
        let shapes = committed(&editor);
        assert_eq!(shapes.len(), 2);
        assert!(shapes[1].references(&target));
    }

    #[test]
    fn test_hover_while_idle() {
        let mut editor = unsnapped_editor();
        editor.options.try_to_connect = true;
        editor
            .current_layer_mut()
            .unwrap()
            .add(Shape::Line(Line::new(PointRef::new(0.0, 0.0), PointRef::new(80.0, 0.0))));
        let mut tool = TwoPointTool::line();
        tool.pointer_move(&mut editor, Point::new(1.0, 1.0)).unwrap();
        assert!(editor.hovered.is_some());
        assert_eq!(tool.state(), ToolState::None);
    }

    #[test]
    fn test_missing_container_fails_without_state_change() {
        let mut editor = Editor::without_container(Options::default());
        let mut tool = TwoPointTool::line();
        let err = tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err, ToolError::NoCurrentContainer);
        assert_eq!(tool.state(), ToolState::None);
    }

    #[test]
    fn test_failed_commit_keeps_gesture_for_retry() {
        let mut editor = unsnapped_editor();
        let mut tool = TwoPointTool::rectangle();
        tool.pointer_down(&mut editor, Point::new(0.0, 0.0)).unwrap();

        editor.container_mut().unwrap().current_layer = 9;
        let err = tool.pointer_down(&mut editor, Point::new(10.0, 10.0)).unwrap_err();
        assert_eq!(err, ToolError::NoCurrentLayer);
        assert_eq!(tool.state(), ToolState::One);
        assert_eq!(working(&editor).len(), 1);
        assert_eq!(helpers(&editor).len(), 2);
        assert!(editor.cancel_available);

        editor.container_mut().unwrap().current_layer = 0;
        tool.pointer_down(&mut editor, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(tool.state(), ToolState::None);
        assert!(working(&editor).is_empty());
        assert!(helpers(&editor).is_empty());
        assert!(!editor.cancel_available);
        let rect = committed(&editor)[0].as_rectangle().unwrap();
        assert_eq!(rect.bottom_right.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_rectangle_is_committed() {
        let mut editor = unsnapped_editor();
        let mut tool = TwoPointTool::rectangle();
        tool.pointer_down(&mut editor, Point::new(5.0, 5.0)).unwrap();
        tool.pointer_down(&mut editor, Point::new(5.0, 5.0)).unwrap();
        let rect = committed(&editor)[0].as_rectangle().unwrap();
        assert!(rect.width().abs() < f64::EPSILON);
    }
}
