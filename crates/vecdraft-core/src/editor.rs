//! Editor host state shared by all tools.

use crate::container::{Container, Layer};
use crate::geometry::GeometryError;
use crate::hit_test::{self, HitResult};
use crate::options::Options;
use crate::point::PointRef;
use crate::shapes::{PointShape, Shape, ShapeId, ShapeStyle};
use crate::snap::snap_point;
use kurbo::Point;
use thiserror::Error;

/// Contract violations raised while dispatching tool events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("No current container to edit")]
    NoCurrentContainer,
    #[error("Current container has no current layer")]
    NoCurrentLayer,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Everything a tool reads or mutates besides its own gesture state.
#[derive(Debug)]
pub struct Editor {
    /// The container being edited. Tools require one.
    pub container: Option<Container>,
    pub options: Options,
    /// Style given to shapes created by tools.
    pub current_style: ShapeStyle,
    /// Whether a gesture is in progress that can be cancelled.
    pub cancel_available: bool,
    /// Result of the last hover query.
    pub hovered: Option<HitResult>,
    invalidated: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Editor {
    /// Create an editor with an empty container.
    pub fn new(options: Options) -> Self {
        Self {
            container: Some(Container::default()),
            options,
            current_style: ShapeStyle::default(),
            cancel_available: false,
            hovered: None,
            invalidated: false,
        }
    }

    /// Create an editor with no container; every tool gesture fails until
    /// one is set.
    pub fn without_container(options: Options) -> Self {
        Self {
            container: None,
            ..Self::new(options)
        }
    }

    pub fn container(&self) -> ToolResult<&Container> {
        self.container.as_ref().ok_or(ToolError::NoCurrentContainer)
    }

    pub fn container_mut(&mut self) -> ToolResult<&mut Container> {
        self.container.as_mut().ok_or(ToolError::NoCurrentContainer)
    }

    pub fn current_layer(&self) -> ToolResult<&Layer> {
        self.container()?.current_layer().ok_or(ToolError::NoCurrentLayer)
    }

    pub fn current_layer_mut(&mut self) -> ToolResult<&mut Layer> {
        self.container_mut()?
            .current_layer_mut()
            .ok_or(ToolError::NoCurrentLayer)
    }

    /// Request a redraw.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Return and reset the pending redraw request.
    pub fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    /// Apply grid snapping according to the options.
    pub fn snap(&self, position: Point) -> Point {
        snap_point(position, &self.options).point
    }

    /// Create a fresh point carrying the configured point glyph.
    pub fn new_point(&self, position: Point) -> PointRef {
        PointRef::with_marker(position.x, position.y, self.options.point_shape)
    }

    /// Existing point of the current layer within the hit threshold of
    /// `position`, when connecting is enabled.
    pub fn connection_target(&self, position: Point) -> ToolResult<Option<PointRef>> {
        if !self.options.try_to_connect {
            return Ok(None);
        }
        let layer = self.current_layer()?;
        Ok(hit_test::hit_test_point(&layer.shapes, position, self.options.hit_threshold))
    }

    /// Reuse an existing point under `position` or create a fresh one.
    pub fn connect_or_create(&self, position: Point) -> ToolResult<PointRef> {
        match self.connection_target(position)? {
            Some(existing) => {
                log::debug!("connected to existing point at ({}, {})", existing.x(), existing.y());
                Ok(existing)
            }
            None => Ok(self.new_point(position)),
        }
    }

    /// Try to swap `point` of the working shape `id` for an existing point
    /// under `position`. Helper markers follow the swap. Returns the point
    /// the shape now holds.
    pub fn connect_working_point(
        &mut self,
        id: ShapeId,
        point: &PointRef,
        position: Point,
    ) -> ToolResult<PointRef> {
        let Some(existing) = self.connection_target(position)? else {
            return Ok(point.clone());
        };
        if existing.ptr_eq(point) {
            return Ok(existing);
        }
        let container = self.container_mut()?;
        if let Some(shape) = container.working_layer.get_mut(id) {
            shape.replace_point(point, &existing);
        }
        for helper in &mut container.helper_layer.shapes {
            helper.replace_point(point, &existing);
        }
        log::debug!("connected working shape {} to existing point", id);
        Ok(existing)
    }

    /// Hover highlight for the current layer. Read-only on the document.
    /// Returns true when something is under the cursor.
    pub fn try_to_hover_shape(&mut self, position: Point) -> ToolResult<bool> {
        let layer = self.current_layer()?;
        let hit = hit_test::hit_test(&layer.shapes, position, self.options.hit_threshold);
        let changed = match (&self.hovered, &hit) {
            (None, None) => false,
            (Some(HitResult::Point(a)), Some(HitResult::Point(b))) => !a.ptr_eq(b),
            (Some(HitResult::Shape(a)), Some(HitResult::Shape(b))) => a != b,
            _ => true,
        };
        let found = hit.is_some();
        self.hovered = hit;
        if changed {
            log::trace!("hover changed: {:?}", self.hovered);
            self.invalidate();
        }
        Ok(found)
    }

    /// Place a new in-progress shape in the working layer.
    pub fn begin_working(&mut self, mut shape: Shape) -> ToolResult<ShapeId> {
        *shape.style_mut() = self.current_style.clone();
        let id = self.container_mut()?.working_layer.add(shape);
        self.cancel_available = true;
        self.invalidate();
        Ok(id)
    }

    /// Show a helper marker sharing `point`.
    pub fn add_helper(&mut self, point: &PointRef) -> ToolResult<()> {
        let style = self.options.helper_style.clone();
        let marker = Shape::Point(PointShape::new(point.clone(), style));
        self.container_mut()?.helper_layer.add(marker);
        Ok(())
    }

    pub fn working_shape_mut(&mut self, id: ShapeId) -> ToolResult<Option<&mut Shape>> {
        Ok(self.container_mut()?.working_layer.get_mut(id))
    }

    /// Move the working shape `id` into the current layer and drop all
    /// helper markers. Returns false when the shape is not in the working
    /// layer.
    pub fn commit_working(&mut self, id: ShapeId) -> ToolResult<bool> {
        let container = self.container_mut()?;
        if container.current_layer().is_none() {
            return Err(ToolError::NoCurrentLayer);
        }
        let shape = container.working_layer.remove(id);
        container.helper_layer.clear();
        let committed = match (shape, container.current_layer_mut()) {
            (Some(shape), Some(layer)) => {
                log::debug!("committed {} {} to layer {}", shape.kind_name(), id, layer.name);
                layer.add(shape);
                true
            }
            _ => false,
        };
        self.cancel_available = false;
        self.invalidate();
        Ok(committed)
    }

    /// Drop every in-progress shape and helper marker.
    pub fn discard_working(&mut self) -> ToolResult<()> {
        self.container_mut()?.clear_transient();
        self.cancel_available = false;
        self.invalidate();
        log::debug!("discarded working shapes");
        Ok(())
    }
}
