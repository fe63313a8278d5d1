//! Group shape for combining multiple shapes.

use super::{Shape, ShapeId, ShapeStyle, ShapeTrait};
use crate::point::PointRef;
use kurbo::{BezPath, Point, Rect};
use std::collections::HashSet;
use uuid::Uuid;

/// An ordered collection of shapes manipulated as a single unit.
///
/// Points shared between children are registered as connectors: they are
/// flagged so that children skip them when moving, and the group moves each
/// of them exactly once.
#[derive(Debug)]
pub struct Group {
    pub(crate) id: ShapeId,
    /// Child shapes in this group.
    pub children: Vec<Shape>,
    /// Points moved by the group itself.
    pub connectors: Vec<PointRef>,
    /// Style properties (not directly used, but kept for consistency).
    style: ShapeStyle,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(children: Vec<Shape>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            connectors: Vec::new(),
            style: ShapeStyle::default(),
        }
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Register `point` as a connector of this group.
    pub fn add_connector(&mut self, point: PointRef) {
        point.set_connector(true);
        if !self.connectors.iter().any(|p| p.ptr_eq(&point)) {
            self.connectors.push(point);
        }
    }

    /// Dissolve this group and return its children. Connector flags are
    /// cleared so the children move their points on their own again.
    pub fn ungroup(self) -> Vec<Shape> {
        for connector in &self.connectors {
            connector.set_connector(false);
        }
        self.children
    }
}

impl ShapeTrait for Group {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        for child in &self.children {
            let b = child.bounds();
            bounds = Some(bounds.map_or(b, |r| r.union(b)));
        }
        for connector in &self.connectors {
            let p = connector.position();
            bounds = Some(bounds.map_or(Rect::from_points(p, p), |r| r.union_pt(p)));
        }
        bounds.unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        // Hit if any child is hit
        self.children.iter().any(|child| child.hit_test(point, tolerance))
    }

    fn to_path(&self) -> BezPath {
        // Combine all children's paths
        let mut path = BezPath::new();
        for child in &self.children {
            path.extend(child.to_path());
        }
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn is_stroked(&self) -> bool {
        false
    }

    fn is_filled(&self) -> bool {
        false
    }

    fn points(&self) -> Vec<&PointRef> {
        self.connectors
            .iter()
            .chain(self.children.iter().flat_map(|c| c.points()))
            .collect()
    }

    fn points_mut(&mut self) -> Vec<&mut PointRef> {
        self.connectors
            .iter_mut()
            .chain(self.children.iter_mut().flat_map(|c| c.points_mut()))
            .collect()
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        for child in &mut self.children {
            child.move_by(dx, dy);
        }
        let mut moved = HashSet::new();
        for connector in &self.connectors {
            if moved.insert(connector.key()) {
                connector.move_by(dx, dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(PointRef::new(x0, y0), PointRef::new(x1, y1)))
    }

    #[test]
    fn test_group_bounds() {
        let group = Group::new(vec![rect(0.0, 0.0, 100.0, 50.0), rect(200.0, 200.0, 250.0, 300.0)]);
        let bounds = group.bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 250.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_hit_test() {
        let group = Group::new(vec![rect(0.0, 0.0, 100.0, 50.0), rect(200.0, 200.0, 250.0, 300.0)]);
        assert!(group.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(group.hit_test(Point::new(225.0, 250.0), 0.0));
        assert!(!group.hit_test(Point::new(150.0, 100.0), 0.0));
    }

    #[test]
    fn test_nested_groups() {
        let inner_group = Group::new(vec![rect(0.0, 0.0, 100.0, 50.0)]);
        let outer_group = Group::new(vec![
            Shape::Group(inner_group),
            rect(200.0, 200.0, 250.0, 300.0),
        ]);
        assert!(outer_group.hit_test(Point::new(50.0, 25.0), 0.0));
        assert_eq!(outer_group.points().len(), 4);
    }

    #[test]
    fn test_connector_moves_once() {
        let a = PointRef::new(0.0, 0.0);
        let shared = PointRef::new(10.0, 0.0);
        let b = PointRef::new(20.0, 0.0);
        let mut group = Group::new(vec![
            Shape::Line(Line::new(a.clone(), shared.clone())),
            Shape::Line(Line::new(shared.clone(), b.clone())),
        ]);
        group.add_connector(shared.clone());
        group.add_connector(shared.clone());
        assert_eq!(group.connectors.len(), 1);

        group.move_by(5.0, 5.0);
        assert_eq!(a.position(), Point::new(5.0, 5.0));
        assert_eq!(shared.position(), Point::new(15.0, 5.0));
        assert_eq!(b.position(), Point::new(25.0, 5.0));
    }

    #[test]
    fn test_ungroup_clears_connector_flags() {
        let shared = PointRef::new(10.0, 0.0);
        let line = Line::new(PointRef::new(0.0, 0.0), shared.clone());
        let mut group = Group::new(vec![Shape::Line(line)]);
        group.add_connector(shared.clone());
        assert!(shared.is_connector());
        let children = group.ungroup();
        assert_eq!(children.len(), 1);
        assert!(!shared.is_connector());
    }
}
