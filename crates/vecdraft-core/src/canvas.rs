//! Canvas: editor state, tools and input wired together.

use crate::editor::{Editor, ToolResult};
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::options::Options;
use crate::render::ShapeRenderer;
use crate::tools::{PathSegmentMode, ToolKind, ToolManager};

/// The interactive editing surface. Routes pointer events to the active
/// tool, one event at a time.
#[derive(Debug, Default)]
pub struct Canvas {
    pub editor: Editor,
    pub tool_manager: ToolManager,
    pub input: InputState,
}

impl Canvas {
    /// Create a new canvas with an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            editor: Editor::new(options),
            ..Self::default()
        }
    }

    /// Set the current tool. An unfinished gesture is cancelled.
    pub fn set_tool(&mut self, tool: ToolKind) -> ToolResult<()> {
        self.tool_manager.set_tool(&mut self.editor, tool)
    }

    pub fn set_path_mode(&mut self, mode: PathSegmentMode) {
        self.tool_manager.set_path_mode(mode);
    }

    /// Dispatch one pointer event.
    ///
    /// Left clicks drive the active tool, a right click cancels it. Button
    /// releases and middle clicks carry no meaning for the tools.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> ToolResult<()> {
        self.input.handle_pointer_event(event);
        let tool = self.tool_manager.active_mut();
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => tool.pointer_down(&mut self.editor, position),
            PointerEvent::Down {
                button: MouseButton::Right,
                ..
            }
            | PointerEvent::Cancel => tool.pointer_cancel(&mut self.editor),
            PointerEvent::Move { position } => tool.pointer_move(&mut self.editor, position),
            PointerEvent::Finish => tool.finish(&mut self.editor),
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => Ok(()),
        }
    }

    /// Draw the document, then in-progress shapes, then helper markers.
    pub fn draw(&self, renderer: &mut dyn ShapeRenderer) {
        if let Some(container) = &self.editor.container {
            container.draw(renderer);
        }
    }

    /// Return and reset the pending redraw request.
    pub fn needs_redraw(&mut self) -> bool {
        self.editor.take_invalidated()
    }
}
