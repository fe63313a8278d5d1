//! Layers and containers: the document model tools edit.

use crate::connection;
use crate::render::ShapeRenderer;
use crate::shapes::{Group, Shape, ShapeId};

/// An ordered shape list. Later shapes are drawn on top.
#[derive(Debug)]
pub struct Layer {
    pub name: String,
    pub is_visible: bool,
    /// Shapes in z-order (back to front).
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_visible: true,
            shapes: Vec::new(),
        }
    }

    /// Add a shape on top of the layer.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Insert a shape at a z-order position, clamped to the layer size.
    pub fn insert(&mut self, index: usize, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.insert(index.min(self.shapes.len()), shape);
        id
    }

    /// Remove a shape. Its points stay alive for as long as other shapes
    /// still reference them.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Group the given shapes into a single group placed at the position of
    /// the frontmost member. Points shared by two or more members become
    /// connectors of the group.
    ///
    /// Returns the new group's ID, or None if less than 2 shapes were found.
    pub fn group_shapes(&mut self, shape_ids: &[ShapeId]) -> Option<ShapeId> {
        let positions: Vec<usize> = self
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| shape_ids.contains(&s.id()))
            .map(|(i, _)| i)
            .collect();
        if positions.len() < 2 {
            return None;
        }

        let insert_at = positions[positions.len() - 1] + 1 - positions.len();
        let mut children = Vec::with_capacity(positions.len());
        for &pos in positions.iter().rev() {
            children.push(self.shapes.remove(pos));
        }
        children.reverse();

        let shared = connection::shared_points(children.iter());
        let mut group = Group::new(children);
        for (point, _) in shared {
            group.add_connector(point);
        }
        let group_id = self.insert(insert_at, Shape::Group(group));
        log::debug!("grouped {} shapes into {}", positions.len(), group_id);
        Some(group_id)
    }

    /// Replace a group with its children, at the group's position.
    /// Returns the children IDs, or None if the shape is not a group.
    pub fn ungroup_shape(&mut self, group_id: ShapeId) -> Option<Vec<ShapeId>> {
        let pos = self.index_of(group_id)?;
        if !self.shapes[pos].is_group() {
            return None;
        }
        let Shape::Group(group) = self.shapes.remove(pos) else {
            return None;
        };
        let children = group.ungroup();
        let ids = children.iter().map(|c| c.id()).collect();
        for (i, child) in children.into_iter().enumerate() {
            self.shapes.insert(pos + i, child);
        }
        Some(ids)
    }

    /// Draw every shape, back to front.
    pub fn draw(&self, renderer: &mut dyn ShapeRenderer) {
        for shape in &self.shapes {
            shape.draw(renderer);
        }
    }
}

/// A drawing page: document layers plus the two transient layers used
/// while a gesture is in progress.
#[derive(Debug)]
pub struct Container {
    pub name: String,
    pub layers: Vec<Layer>,
    /// Index into `layers` of the layer tools commit into.
    pub current_layer: usize,
    /// Holds the in-progress shape of a gesture.
    pub working_layer: Layer,
    /// Holds helper markers of a gesture.
    pub helper_layer: Layer,
}

impl Default for Container {
    fn default() -> Self {
        Self::new("Container")
    }
}

impl Container {
    /// Create a container with a single empty layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: vec![Layer::new("Layer1")],
            current_layer: 0,
            working_layer: Layer::new("Working"),
            helper_layer: Layer::new("Helper"),
        }
    }

    /// Append a layer and return its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(Layer::new(name));
        self.layers.len() - 1
    }

    /// Make `index` the current layer. Returns false when out of range.
    pub fn set_current_layer(&mut self, index: usize) -> bool {
        if index < self.layers.len() {
            self.current_layer = index;
            true
        } else {
            false
        }
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        self.layers.get(self.current_layer)
    }

    pub fn current_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.current_layer)
    }

    /// Empty the working and helper layers.
    pub fn clear_transient(&mut self) {
        self.working_layer.clear();
        self.helper_layer.clear();
    }

    /// Draw visible document layers, then the working and helper layers.
    pub fn draw(&self, renderer: &mut dyn ShapeRenderer) {
        for layer in self.layers.iter().filter(|l| l.is_visible) {
            layer.draw(renderer);
        }
        self.working_layer.draw(renderer);
        self.helper_layer.draw(renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{PointMarker, PointRef};
    use crate::shapes::{Line, Rectangle, ShapeStyle};
    use kurbo::{BezPath, Point};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(PointRef::new(x0, y0), PointRef::new(x1, y1)))
    }

    #[test]
    fn test_add_remove() {
        let mut layer = Layer::new("L");
        let id = layer.add(rect(0.0, 0.0, 1.0, 1.0));
        assert_eq!(layer.len(), 1);
        assert!(layer.get(id).is_some());
        assert!(layer.remove(id).is_some());
        assert!(layer.is_empty());
        assert!(layer.remove(id).is_none());
    }

    #[test]
    fn test_remove_keeps_shared_point_alive() {
        let shared = PointRef::new(5.0, 5.0);
        let mut layer = Layer::new("L");
        let a = layer.add(Shape::Line(Line::new(PointRef::new(0.0, 0.0), shared.clone())));
        layer.add(Shape::Line(Line::new(shared.clone(), PointRef::new(9.0, 9.0))));
        drop(shared);

        let removed = layer.remove(a).unwrap();
        drop(removed);
        let survivor = &layer.shapes[0];
        assert_eq!(survivor.points()[0].position(), Point::new(5.0, 5.0));
        assert_eq!(survivor.points()[0].reference_count(), 1);
    }

    #[test]
    fn test_group_registers_shared_points() {
        let shared = PointRef::new(10.0, 0.0);
        let mut layer = Layer::new("L");
        let a = layer.add(Shape::Line(Line::new(PointRef::new(0.0, 0.0), shared.clone())));
        let other = layer.add(rect(50.0, 50.0, 60.0, 60.0));
        let b = layer.add(Shape::Line(Line::new(shared.clone(), PointRef::new(20.0, 0.0))));

        let group_id = layer.group_shapes(&[a, b]).unwrap();
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.index_of(other), Some(0));
        assert_eq!(layer.index_of(group_id), Some(1));

        let group = layer.get(group_id).and_then(|s| s.as_group()).unwrap();
        assert_eq!(group.connectors.len(), 1);
        assert!(group.connectors[0].ptr_eq(&shared));
        assert!(shared.is_connector());

        layer.get_mut(group_id).unwrap().move_by(1.0, 0.0);
        assert_eq!(shared.position(), Point::new(11.0, 0.0));
    }

    #[test]
    fn test_group_needs_two_shapes() {
        let mut layer = Layer::new("L");
        let a = layer.add(rect(0.0, 0.0, 1.0, 1.0));
        assert!(layer.group_shapes(&[a]).is_none());
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_ungroup_restores_order() {
        let mut layer = Layer::new("L");
        let a = layer.add(rect(0.0, 0.0, 1.0, 1.0));
        let b = layer.add(rect(2.0, 2.0, 3.0, 3.0));
        let group_id = layer.group_shapes(&[a, b]).unwrap();
        let ids = layer.ungroup_shape(group_id).unwrap();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(layer.index_of(a), Some(0));
        assert_eq!(layer.index_of(b), Some(1));
        assert!(layer.ungroup_shape(a).is_none());
    }

    #[derive(Default)]
    struct Counter {
        paths: usize,
        points: usize,
    }

    impl ShapeRenderer for Counter {
        fn draw_path(
            &mut self,
            _path: &BezPath,
            _style: &ShapeStyle,
            _stroked: bool,
            _filled: bool,
        ) {
            self.paths += 1;
        }

        fn draw_point(&mut self, _position: Point, _marker: PointMarker, _style: &ShapeStyle) {
            self.points += 1;
        }
    }

    #[test]
    fn test_container_draw_skips_hidden_layers() {
        let mut container = Container::new("C");
        container.layers[0].add(rect(0.0, 0.0, 1.0, 1.0));
        let hidden = container.add_layer("Hidden");
        container.layers[hidden].add(rect(0.0, 0.0, 1.0, 1.0));
        container.layers[hidden].is_visible = false;
        container.working_layer.add(rect(0.0, 0.0, 1.0, 1.0));
        let marker = crate::shapes::PointShape::new(PointRef::new(0.0, 0.0), ShapeStyle::default());
        container.helper_layer.add(Shape::Point(marker));

        let mut counter = Counter::default();
        container.draw(&mut counter);
        assert_eq!(counter.paths, 2);
        assert_eq!(counter.points, 1);
    }

    #[test]
    fn test_current_layer() {
        let mut container = Container::default();
        assert!(container.current_layer().is_some());
        assert!(!container.set_current_layer(3));
        let second = container.add_layer("Second");
        assert!(container.set_current_layer(second));
        assert_eq!(container.current_layer().unwrap().name, "Second");
    }
}
