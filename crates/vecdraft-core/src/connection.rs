//! Queries and edits over the shared-point connection graph.
//!
//! Two shapes are connected when they hold handles to the same point.
//! Nothing records ownership explicitly; the graph is read off the shapes.

use crate::container::Layer;
use crate::point::PointRef;
use crate::shapes::{Line, Shape, ShapeId};
use kurbo::Point;
use std::collections::{HashMap, HashSet};

/// Every distinct point of `shapes`, in first-seen order.
pub fn unique_points<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Vec<PointRef> {
    let mut seen = HashSet::new();
    let mut points = Vec::new();
    for shape in shapes {
        for point in shape.points() {
            if seen.insert(point.key()) {
                points.push(point.clone());
            }
        }
    }
    points
}

/// Points referenced by two or more of `shapes`, with the number of shapes
/// referencing each. A shape holding a point twice counts once.
pub fn shared_points<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Vec<(PointRef, usize)> {
    let mut index: HashMap<usize, usize> = HashMap::new();
    let mut counts: Vec<(PointRef, usize)> = Vec::new();
    for shape in shapes {
        let mut in_shape = HashSet::new();
        for point in shape.points() {
            if !in_shape.insert(point.key()) {
                continue;
            }
            match index.get(&point.key()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(point.key(), counts.len());
                    counts.push((point.clone(), 1));
                }
            }
        }
    }
    counts.retain(|(_, count)| *count > 1);
    counts
}

/// IDs of the shapes holding `point`.
pub fn connected_shapes(shapes: &[Shape], point: &PointRef) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|shape| shape.references(point))
        .map(|shape| shape.id())
        .collect()
}

/// Translate a selection of shapes, moving each distinct point exactly once
/// even when several selected shapes share it. Returns the number of points
/// moved.
pub fn move_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>, dx: f64, dy: f64) -> usize {
    let points = unique_points(shapes);
    for point in &points {
        point.move_by(dx, dy);
    }
    points.len()
}

/// Give `shape` private copies of every point it shares with `others`.
/// Returns the number of points detached.
pub fn disconnect<'a>(shape: &mut Shape, others: impl IntoIterator<Item = &'a Shape>) -> usize {
    let foreign: HashSet<usize> = unique_points(others).iter().map(|p| p.key()).collect();
    let shared: Vec<PointRef> = unique_points(std::iter::once(&*shape))
        .into_iter()
        .filter(|p| foreign.contains(&p.key()))
        .collect();
    for point in &shared {
        shape.replace_point(point, &point.detached_copy());
    }
    if !shared.is_empty() {
        log::debug!("disconnected {} points from {}", shared.len(), shape.id());
    }
    shared.len()
}

/// Split the line `id` at the point nearest to `at`. The original line is
/// shortened to end at the new point and a second line from the new point
/// to the old end is inserted right above it; both share the new point.
///
/// Returns the ID of the inserted line, or None if `id` is not a line of
/// `layer`.
pub fn split_line(layer: &mut Layer, id: ShapeId, at: Point) -> Option<ShapeId> {
    let index = layer.index_of(id)?;
    let Shape::Line(line) = &mut layer.shapes[index] else {
        return None;
    };
    let split = PointRef::from_point(line.nearest_point(at));
    split.set_marker(line.end.marker());
    let old_end = std::mem::replace(&mut line.end, split.clone());

    let mut tail = Line::new(split, old_end);
    tail.is_stroked = line.is_stroked;
    tail.style = line.style.clone();
    let tail_id = layer.insert(index + 1, Shape::Line(tail));
    log::debug!("split line {} into {}", id, tail_id);
    Some(tail_id)
}
