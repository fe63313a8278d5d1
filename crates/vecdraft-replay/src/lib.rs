//! Scripted pointer sessions for the VecDraft editor core.
//!
//! A script selects tools and feeds pointer events to a [`Canvas`], one
//! event at a time, exactly as an interactive host would. The resulting
//! document is summarized as plain serializable data.

use anyhow::Context;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vecdraft_core::connection;
use vecdraft_core::{
    Canvas, Layer, Options, PathSegmentMode, PointerEvent, Shape, ToolKind, ToolResult,
};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tool(ToolKind),
    PathMode(PathSegmentMode),
    Pointer(PointerEvent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Editor options. Defaults apply when absent.
    #[serde(default)]
    pub options: Option<Options>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Read and parse a script file.
pub fn load_script(path: &Path) -> anyhow::Result<Script> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    Script::from_json(&json).with_context(|| format!("Failed to parse script {}", path.display()))
}

/// Replay every step against a fresh canvas.
pub fn run_script(script: &Script) -> ToolResult<Canvas> {
    let mut canvas = Canvas::with_options(script.options.clone().unwrap_or_default());
    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("step {}: {:?}", index, step);
        match step {
            Step::Tool(kind) => canvas.set_tool(*kind)?,
            Step::PathMode(mode) => canvas.set_path_mode(*mode),
            Step::Pointer(event) => canvas.handle_pointer(event)?,
        }
    }
    Ok(canvas)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSummary {
    pub id: String,
    pub kind: String,
    /// Control points in shape order. Shared points appear in every shape
    /// holding them.
    pub points: Vec<Point>,
    /// SVG path data of the outline.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: String,
    pub shapes: Vec<ShapeSummary>,
    /// Number of points held by two or more shapes.
    pub shared_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub layers: Vec<LayerSummary>,
    /// Whether a gesture was still in progress when the script ended.
    pub gesture_in_progress: bool,
}

fn summarize_shape(shape: &Shape) -> ShapeSummary {
    ShapeSummary {
        id: shape.id().to_string(),
        kind: shape.kind_name().to_string(),
        points: shape.points().iter().map(|p| p.position()).collect(),
        path: shape.to_path().to_svg(),
    }
}

fn summarize_layer(layer: &Layer) -> LayerSummary {
    LayerSummary {
        name: layer.name.clone(),
        shapes: layer.shapes.iter().map(summarize_shape).collect(),
        shared_points: connection::shared_points(layer.shapes.iter()).len(),
    }
}

/// Summarize the committed document layers of `canvas`.
pub fn summarize(canvas: &Canvas) -> DocumentSummary {
    let layers = canvas
        .editor
        .container
        .as_ref()
        .map(|c| c.layers.iter().map(summarize_layer).collect())
        .unwrap_or_default();
    DocumentSummary {
        layers,
        gesture_in_progress: canvas.tool_manager.is_active(),
    }
}
