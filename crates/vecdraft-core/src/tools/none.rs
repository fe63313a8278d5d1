//! The idle tool: hover feedback only.

use super::{Tool, ToolKind, ToolState};
use crate::editor::{Editor, ToolResult};
use kurbo::Point;

#[derive(Debug, Default)]
pub struct NoneTool;

impl Tool for NoneTool {
    fn kind(&self) -> ToolKind {
        ToolKind::None
    }

    fn state(&self) -> ToolState {
        ToolState::None
    }

    fn pointer_down(&mut self, _editor: &mut Editor, _position: Point) -> ToolResult<()> {
        Ok(())
    }

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
        editor.try_to_hover_shape(position)?;
        Ok(())
    }

    fn pointer_cancel(&mut self, _editor: &mut Editor) -> ToolResult<()> {
        Ok(())
    }
}
