//! Multi-click Bézier tools.
//!
//! The first click anchors the curve. Every following click fixes the next
//! control point; until then the pointer drags that point together with
//! every later one, so the preview always ends under the cursor.

use super::{hover, Tool, ToolKind, ToolState};
use crate::editor::{Editor, ToolResult};
use crate::point::PointRef;
use crate::shapes::{CubicBezier, QuadraticBezier, Shape, ShapeId};
use kurbo::Point;

/// Control points after the anchor, in click order.
#[derive(Debug)]
struct Gesture {
    id: ShapeId,
    controls: Vec<PointRef>,
    /// Number of controls already fixed.
    fixed: usize,
}

impl Gesture {
    fn drag(&self, position: Point) {
        for point in &self.controls[self.fixed..] {
            point.set_position(position);
        }
    }
}

fn state_for(fixed: usize) -> ToolState {
    match fixed {
        0 => ToolState::One,
        1 => ToolState::Two,
        _ => ToolState::Three,
    }
}

/// Shared click handling once the anchor is placed. Returns true when the
/// gesture was committed. `fixed` only advances once the click has taken
/// effect, so a failed click can be repeated.
fn advance(editor: &mut Editor, gesture: &mut Gesture, position: Point) -> ToolResult<bool> {
    gesture.drag(position);
    let index = gesture.fixed;
    if index + 1 >= gesture.controls.len() {
        let end = editor.connect_working_point(gesture.id, &gesture.controls[index], position)?;
        gesture.controls[index] = end;
        editor.commit_working(gesture.id)?;
        return Ok(true);
    }
    editor.add_helper(&gesture.controls[index + 1])?;
    gesture.fixed = index + 1;
    Ok(false)
}

macro_rules! bezier_tool {
    ($name:ident, $kind:expr, $label:literal, $controls:literal, $build:expr) => {
        #[derive(Debug, Default)]
        pub struct $name {
            state: ToolState,
            gesture: Option<Gesture>,
        }

        impl $name {
            fn reset(&mut self) {
                self.state = ToolState::None;
                self.gesture = None;
            }
        }

        impl Tool for $name {
            fn kind(&self) -> ToolKind {
                $kind
            }

            fn state(&self) -> ToolState {
                self.state
            }

            fn pointer_down(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
                let position = editor.snap(position);
                if let Some(gesture) = &mut self.gesture {
                    if advance(editor, gesture, position)? {
                        self.reset();
                        log::debug!("{}: committed", $label);
                    } else {
                        self.state = state_for(gesture.fixed);
                        log::debug!("{}: -> {:?}", $label, self.state);
                    }
                    return Ok(());
                }

                let start = editor.connect_or_create(position)?;
                let controls: Vec<PointRef> =
                    (0..$controls).map(|_| editor.new_point(position)).collect();
                let shape = ($build)(&*editor, start.clone(), &controls);
                let id = editor.begin_working(shape)?;
                editor.add_helper(&start)?;
                editor.add_helper(&controls[0])?;
                self.gesture = Some(Gesture {
                    id,
                    controls,
                    fixed: 0,
                });
                self.state = ToolState::One;
                log::debug!("{}: None -> One", $label);
                Ok(())
            }

            fn pointer_move(&mut self, editor: &mut Editor, position: Point) -> ToolResult<()> {
                let Some(gesture) = &self.gesture else {
                    return hover(editor, position);
                };
                gesture.drag(editor.snap(position));
                editor.invalidate();
                Ok(())
            }

            fn pointer_cancel(&mut self, editor: &mut Editor) -> ToolResult<()> {
                if self.state != ToolState::None {
                    editor.discard_working()?;
                    log::debug!("{}: cancelled", $label);
                }
                self.reset();
                Ok(())
            }
        }
    };
}

bezier_tool!(
    CubicBezierTool,
    ToolKind::CubicBezier,
    "CubicBezier",
    3,
    |editor: &Editor, start: PointRef, controls: &[PointRef]| {
        let mut curve = CubicBezier::new(
            start,
            controls[0].clone(),
            controls[1].clone(),
            controls[2].clone(),
        );
        curve.is_stroked = editor.options.default_is_stroked;
        curve.is_filled = editor.options.default_is_filled;
        Shape::CubicBezier(curve)
    }
);

bezier_tool!(
    QuadraticBezierTool,
    ToolKind::QuadraticBezier,
    "QuadraticBezier",
    2,
    |editor: &Editor, start: PointRef, controls: &[PointRef]| {
        let mut curve = QuadraticBezier::new(start, controls[0].clone(), controls[1].clone());
        curve.is_stroked = editor.options.default_is_stroked;
        curve.is_filled = editor.options.default_is_filled;
        Shape::QuadraticBezier(curve)
    }
);
