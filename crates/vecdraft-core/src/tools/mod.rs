//! Tool state machines.
//!
//! Every tool turns a stream of pointer events into a shape. While a
//! gesture is in progress the shape lives in the working layer and its
//! control points are shown in the helper layer; on completion the shape
//! moves into the current document layer. Tools never commit anything on
//! cancel.

mod arc;
mod bezier;
mod none;
mod path;
mod polygon;
mod two_point;

pub use arc::ArcTool;
pub use bezier::{CubicBezierTool, QuadraticBezierTool};
pub use none::NoneTool;
pub use path::{PathSegmentMode, PathTool};
pub use polygon::PolygonTool;
pub use two_point::TwoPointTool;

use crate::editor::{Editor, ToolResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    None,
    Line,
    Rectangle,
    Ellipse,
    Arc,
    CubicBezier,
    QuadraticBezier,
    Path,
    Polygon,
}

/// Progress of a gesture; the number of clicks consumed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolState {
    /// Idle, waiting for the first click.
    #[default]
    None,
    One,
    Two,
    Three,
}

/// A shape-creation state machine.
///
/// Events are handled strictly one at a time; every handler finishes its
/// commit or discard before returning.
pub trait Tool: std::fmt::Debug {
    fn kind(&self) -> ToolKind;

    fn state(&self) -> ToolState;

    fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()>;

    fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()>;

    /// Discard the gesture in progress and return to [`ToolState::None`].
    fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()>;

    /// Complete an open-ended gesture. Tools with a fixed click count
    /// ignore it.
    fn finish(&mut self, _editor: &mut Editor) -> ToolResult<()> {
        Ok(())
    }
}

/// Idle hover feedback: highlight what a click would connect to.
fn hover(editor: &mut Editor, position: Point) -> ToolResult<()> {
    if editor.options.try_to_connect {
        let position = editor.snap(position);
        editor.try_to_hover_shape(position)?;
    }
    Ok(())
}

/// Owns one instance of every tool and tracks the active one.
#[derive(Debug)]
pub struct ToolManager {
    current_tool: ToolKind,
    none: NoneTool,
    line: TwoPointTool,
    rectangle: TwoPointTool,
    ellipse: TwoPointTool,
    arc: ArcTool,
    cubic_bezier: CubicBezierTool,
    quadratic_bezier: QuadraticBezierTool,
    path: PathTool,
    polygon: PolygonTool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            none: NoneTool::default(),
            line: TwoPointTool::line(),
            rectangle: TwoPointTool::rectangle(),
            ellipse: TwoPointTool::ellipse(),
            arc: ArcTool::default(),
            cubic_bezier: CubicBezierTool::default(),
            quadratic_bezier: QuadraticBezierTool::default(),
            path: PathTool::default(),
            polygon: PolygonTool::default(),
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Switch tools, cancelling the active gesture first.
    pub fn set_tool(&mut self, editor: &mut Editor, tool: ToolKind) -> ToolResult<()> {
        if self.current_tool == tool {
            return Ok(());
        }
        if self.active().state() != ToolState::None {
            self.active_mut().pointer_cancel(editor)?;
        }
        log::debug!("tool {:?} -> {:?}", self.current_tool, tool);
        self.current_tool = tool;
        Ok(())
    }

    /// The segment kind the path tool appends.
    pub fn set_path_mode(&mut self, mode: PathSegmentMode) {
        self.path.set_mode(mode);
    }

    pub fn tool(&self, kind: ToolKind) -> &dyn Tool {
        match kind {
            ToolKind::None => &self.none,
            ToolKind::Line => &self.line,
            ToolKind::Rectangle => &self.rectangle,
            ToolKind::Ellipse => &self.ellipse,
            ToolKind::Arc => &self.arc,
            ToolKind::CubicBezier => &self.cubic_bezier,
            ToolKind::QuadraticBezier => &self.quadratic_bezier,
            ToolKind::Path => &self.path,
            ToolKind::Polygon => &self.polygon,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut dyn Tool {
        match kind {
            ToolKind::None => &mut self.none,
            ToolKind::Line => &mut self.line,
            ToolKind::Rectangle => &mut self.rectangle,
            ToolKind::Ellipse => &mut self.ellipse,
            ToolKind::Arc => &mut self.arc,
            ToolKind::CubicBezier => &mut self.cubic_bezier,
            ToolKind::QuadraticBezier => &mut self.quadratic_bezier,
            ToolKind::Path => &mut self.path,
            ToolKind::Polygon => &mut self.polygon,
        }
    }

    pub fn active(&self) -> &dyn Tool {
        self.tool(self.current_tool)
    }

    pub fn active_mut(&mut self) -> &mut dyn Tool {
        self.tool_mut(self.current_tool)
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active().state() != ToolState::None
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::editor::Editor;
    use crate::options::Options;
    use crate::shapes::Shape;

    /// Editor with grid snapping disabled.
    pub fn unsnapped_editor() -> Editor {
        let mut options = Options::default();
        options.snap_to_grid = false;
        Editor::new(options)
    }

    pub fn committed(editor: &Editor) -> &[Shape] {
        &editor.container().unwrap().layers[0].shapes
    }

    pub fn working(editor: &Editor) -> &[Shape] {
        &editor.container().unwrap().working_layer.shapes
    }

    pub fn helpers(editor: &Editor) -> &[Shape] {
        &editor.container().unwrap().helper_layer.shapes
    }
}
