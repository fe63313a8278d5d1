//! Snap functionality for aligning points to the grid.

use crate::options::Options;
use kurbo::Point;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Round `value` to the nearest multiple of `step`.
/// A step of zero or less leaves the value unchanged.
pub fn snap(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

/// Snap a point to the grid, each axis with its own step.
pub fn snap_to_grid(point: Point, snap_x: f64, snap_y: f64) -> SnapResult {
    SnapResult {
        point: Point::new(snap(point.x, snap_x), snap(point.y, snap_y)),
        snapped_x: snap_x > 0.0,
        snapped_y: snap_y > 0.0,
    }
}

/// Snap a point according to the editor options.
pub fn snap_point(point: Point, options: &Options) -> SnapResult {
    if options.snap_to_grid {
        snap_to_grid(point, options.snap_x, options.snap_y)
    } else {
        SnapResult::none(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(23.0, 37.0), 20.0, 20.0);
        assert!((result.point.x - 20.0).abs() < f64::EPSILON);
        assert!((result.point.y - 40.0).abs() < f64::EPSILON);
        assert!(result.is_snapped());
    }

    #[test]
    fn test_snap_to_grid_exact() {
        let result = snap_to_grid(Point::new(45.0, 30.0), 15.0, 15.0);
        assert_eq!(result.point, Point::new(45.0, 30.0));
    }

    #[test]
    fn test_snap_round_up() {
        assert!((snap(10.0, 15.0) - 15.0).abs() < f64::EPSILON);
        assert!((snap(7.0, 15.0)).abs() < f64::EPSILON);
        assert!((snap(-8.0, 15.0) + 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_positive_step_is_identity() {
        assert!((snap(7.3, 0.0) - 7.3).abs() < f64::EPSILON);
        assert!((snap(7.3, -5.0) - 7.3).abs() < f64::EPSILON);
        let result = snap_to_grid(Point::new(7.3, 8.0), 0.0, 5.0);
        assert!(!result.snapped_x);
        assert!(result.snapped_y);
        assert_eq!(result.point, Point::new(7.3, 10.0));
    }

    #[test]
    fn test_snap_idempotent() {
        for step in [0.5, 1.0, 7.0, 15.0, 20.0] {
            for i in -200..200 {
                let v = i as f64 * 0.37;
                let once = snap(v, step);
                assert_eq!(snap(once, step), once);
            }
        }
    }

    #[test]
    fn test_snap_monotonic() {
        for step in [1.0, 7.0, 15.0] {
            let values: Vec<f64> = (-300..300).map(|i| i as f64 * 0.25).collect();
            for pair in values.windows(2) {
                assert!(snap(pair[0], step) <= snap(pair[1], step));
            }
        }
    }

    #[test]
    fn test_snap_point_respects_options() {
        let mut options = Options::default();
        let result = snap_point(Point::new(10.0, 10.0), &options);
        assert_eq!(result.point, Point::new(15.0, 15.0));

        options.snap_to_grid = false;
        let result = snap_point(Point::new(10.0, 10.0), &options);
        assert_eq!(result.point, Point::new(10.0, 10.0));
        assert!(!result.is_snapped());
    }
}
