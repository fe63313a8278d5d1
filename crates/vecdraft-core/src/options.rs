//! Editor options shared by tools and hit testing.

use crate::geometry::{FillRule, SegmentFlags};
use crate::point::PointMarker;
use crate::shapes::{SerializableColor, ShapeStyle};
use serde::{Deserialize, Serialize};

/// Per-document editing configuration.
///
/// Read by every tool on every event; changed only through explicit
/// settings updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Quantize pointer coordinates to the grid.
    pub snap_to_grid: bool,
    /// Horizontal grid step.
    pub snap_x: f64,
    /// Vertical grid step.
    pub snap_y: f64,
    /// Maximum distance at which a point or shape counts as hit.
    pub hit_threshold: f64,
    /// Reuse existing points under the cursor when placing endpoints.
    pub try_to_connect: bool,
    pub default_is_stroked: bool,
    pub default_is_filled: bool,
    pub default_is_closed: bool,
    pub default_is_smooth_join: bool,
    pub default_fill_rule: FillRule,
    /// Glyph given to points created by tools.
    pub point_shape: PointMarker,
    pub point_style: ShapeStyle,
    pub selection_style: ShapeStyle,
    /// Style of the helper markers shown while a gesture is in progress.
    pub helper_style: ShapeStyle,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            snap_x: 15.0,
            snap_y: 15.0,
            hit_threshold: 7.0,
            try_to_connect: false,
            default_is_stroked: true,
            default_is_filled: false,
            default_is_closed: true,
            default_is_smooth_join: true,
            default_fill_rule: FillRule::EvenOdd,
            point_shape: PointMarker::default(),
            point_style: ShapeStyle::new(
                SerializableColor::new(0, 0, 0, 255),
                SerializableColor::new(0, 0, 0, 255),
                1.0,
            ),
            selection_style: ShapeStyle::new(
                SerializableColor::new(0, 120, 215, 255),
                SerializableColor::new(0, 120, 215, 64),
                1.0,
            ),
            helper_style: ShapeStyle::new(
                SerializableColor::new(0, 191, 255, 255),
                SerializableColor::new(0, 191, 255, 255),
                1.0,
            ),
        }
    }
}

impl Options {
    /// Parse options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Segment flags for segments created by tools.
    pub fn segment_flags(&self) -> SegmentFlags {
        SegmentFlags::new(self.default_is_stroked, self.default_is_smooth_join)
    }
}
