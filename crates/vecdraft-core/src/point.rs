//! Shared, mutable points.
//!
//! A [`PointRef`] is a handle to a single point entity. Cloning the handle
//! never copies coordinates: every clone observes and mutates the same
//! point. Shapes that hold clones of one handle are *connected*, so moving
//! the point through any of them moves all of them.
//!
//! Points are freed when the last handle is dropped, which makes deletion
//! of a shape a pure reference removal.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Decorative glyph drawn at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointMarker {
    /// Axis-aligned square centred on the point.
    Rectangle { half_size: f64 },
    /// Circle centred on the point.
    Ellipse { radius: f64 },
    /// Two diagonal strokes crossing at the point.
    Cross { half_size: f64 },
}

impl Default for PointMarker {
    fn default() -> Self {
        PointMarker::Rectangle { half_size: 3.0 }
    }
}

impl PointMarker {
    /// Half of the marker's extent along either axis.
    pub fn half_extent(&self) -> f64 {
        match *self {
            PointMarker::Rectangle { half_size } => half_size,
            PointMarker::Ellipse { radius } => radius,
            PointMarker::Cross { half_size } => half_size,
        }
    }
}

#[derive(Debug)]
struct PointData {
    x: f64,
    y: f64,
    marker: Option<PointMarker>,
    connector: bool,
}

/// Handle to a shared point.
#[derive(Clone)]
pub struct PointRef(Rc<RefCell<PointData>>);

impl PointRef {
    /// Create a fresh, unshared point.
    pub fn new(x: f64, y: f64) -> Self {
        Self(Rc::new(RefCell::new(PointData {
            x,
            y,
            marker: None,
            connector: false,
        })))
    }

    /// Create a fresh point carrying a marker glyph.
    pub fn with_marker(x: f64, y: f64, marker: PointMarker) -> Self {
        let point = Self::new(x, y);
        point.set_marker(Some(marker));
        point
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.x, point.y)
    }

    pub fn x(&self) -> f64 {
        self.0.borrow().x
    }

    pub fn y(&self) -> f64 {
        self.0.borrow().y
    }

    /// Current coordinates.
    pub fn position(&self) -> Point {
        let data = self.0.borrow();
        Point::new(data.x, data.y)
    }

    pub fn set(&self, x: f64, y: f64) {
        let mut data = self.0.borrow_mut();
        data.x = x;
        data.y = y;
    }

    pub fn set_position(&self, point: Point) {
        self.set(point.x, point.y);
    }

    /// Translate the point. Every shape holding this point observes the move.
    pub fn move_by(&self, dx: f64, dy: f64) {
        let mut data = self.0.borrow_mut();
        data.x += dx;
        data.y += dy;
    }

    pub fn marker(&self) -> Option<PointMarker> {
        self.0.borrow().marker
    }

    pub fn set_marker(&self, marker: Option<PointMarker>) {
        self.0.borrow_mut().marker = marker;
    }

    /// Whether the point is moved by its owning group rather than by the
    /// shapes that reference it.
    pub fn is_connector(&self) -> bool {
        self.0.borrow().connector
    }

    pub fn set_connector(&self, connector: bool) {
        self.0.borrow_mut().connector = connector;
    }

    /// Identity comparison: `true` when both handles refer to the same point.
    pub fn ptr_eq(&self, other: &PointRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity key, stable for as long as any handle is alive.
    pub fn key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Number of live handles to this point.
    pub fn reference_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Distance from the point to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        self.position().distance(other)
    }

    /// Create an independent point at the same position with the same marker.
    pub fn detached_copy(&self) -> PointRef {
        let data = self.0.borrow();
        Self(Rc::new(RefCell::new(PointData {
            x: data.x,
            y: data.y,
            marker: data.marker,
            connector: false,
        })))
    }
}

impl fmt::Debug for PointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("PointRef")
            .field("x", &data.x)
            .field("y", &data.y)
            .field("connector", &data.connector)
            .finish()
    }
}

impl From<Point> for PointRef {
    fn from(point: Point) -> Self {
        Self::from_point(point)
    }
}
