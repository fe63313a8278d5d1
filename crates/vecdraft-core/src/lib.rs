//! VecDraft Core Library
//!
//! Platform-agnostic editing core for the VecDraft vector editor: shared
//! points, shapes, path geometry, containers and the shape-creation tools.

pub mod canvas;
pub mod connection;
pub mod container;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod options;
pub mod point;
pub mod render;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use canvas::Canvas;
pub use container::{Container, Layer};
pub use editor::{Editor, ToolError, ToolResult};
pub use geometry::{
    FillRule, Figure, Geometry, GeometryContext, GeometryError, Segment, SegmentFlags, SegmentKind,
    SweepDirection,
};
pub use hit_test::HitResult;
pub use input::{InputState, MouseButton, PointerEvent};
pub use options::Options;
pub use point::{PointMarker, PointRef};
pub use render::ShapeRenderer;
pub use shapes::{Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use snap::{snap_point, snap_to_grid, SnapResult};
pub use tools::{PathSegmentMode, Tool, ToolKind, ToolManager, ToolState};
