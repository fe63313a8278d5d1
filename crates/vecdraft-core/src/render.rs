//! Rendering contract.
//!
//! The core never rasterizes anything itself. A backend implements
//! [`ShapeRenderer`] and is handed resolved paths and point glyphs by
//! [`Shape::draw`](crate::shapes::Shape::draw) and
//! [`Container::draw`](crate::container::Container::draw).

use crate::point::PointMarker;
use crate::shapes::ShapeStyle;
use kurbo::{BezPath, Point};

/// Drawing backend for resolved shapes.
pub trait ShapeRenderer {
    /// Draw an outline. `is_stroked` and `is_filled` decide which of the
    /// style's colors apply.
    fn draw_path(&mut self, path: &BezPath, style: &ShapeStyle, is_stroked: bool, is_filled: bool);

    /// Draw a point glyph centred on `position`.
    fn draw_point(&mut self, position: Point, marker: PointMarker, style: &ShapeStyle);
}
