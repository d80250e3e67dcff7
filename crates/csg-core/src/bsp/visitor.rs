//! Tree traversal visitor (spec.md §4.D).
//!
//! Generalized from the teacher's polygon-slice visitor: the spec's
//! traversal walks nodes ("apply fn(node) then recurse front/back"), so
//! [`BspVisitor::visit`] receives a whole [`CsgNode`] rather than a
//! polygon batch.

use super::node::CsgNode;
use crate::arena::PolygonId;

/// Receives each node of a tree during a pre-order [`super::tree::CsgTree::traverse`].
pub trait BspVisitor {
    fn visit(&mut self, node: &CsgNode);
}

/// A [`BspVisitor`] that collects the ids of every polygon in the tree.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    ids: Vec<PolygonId>,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the visitor, returning the polygon ids in traversal order.
    pub fn into_ids(self) -> Vec<PolygonId> {
        self.ids
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, node: &CsgNode) {
        self.ids.extend_from_slice(node.polygons());
    }
}

/// Adapts a closure into a [`BspVisitor`].
pub struct FnVisitor<F: FnMut(&CsgNode)> {
    f: F,
}

impl<F: FnMut(&CsgNode)> FnVisitor<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(&CsgNode)> BspVisitor for FnVisitor<F> {
    fn visit(&mut self, node: &CsgNode) {
        (self.f)(node)
    }
}

/// Pre-order traversal: visit `node`, then recurse into front, then back.
pub(crate) fn traverse<V: BspVisitor>(node: &CsgNode, visitor: &mut V) {
    visitor.visit(node);
    if let Some(front) = node.front() {
        traverse(front, visitor);
    }
    if let Some(back) = node.back() {
        traverse(back, visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, PolygonEntry};
    use crate::plane::Plane3D;
    use nalgebra::{Point3, Vector3};

    fn leaf_with(ids: Vec<PolygonId>) -> CsgNode {
        CsgNode::new(Plane3D::new(Vector3::new(0.0, 1.0, 0.0), 0.0), ids)
    }

    fn sample_id(arena: &mut Arena) -> PolygonId {
        arena.alloc(PolygonEntry {
            color: 0,
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            flipped: false,
            parent: None,
        })
    }

    #[test]
    fn collecting_visitor_gathers_in_pre_order() {
        let mut arena = Arena::default();
        let a = sample_id(&mut arena);
        let b = sample_id(&mut arena);
        let c = sample_id(&mut arena);

        let mut root = leaf_with(vec![a]);
        root.set_front(Some(leaf_with(vec![b])));
        root.set_back(Some(leaf_with(vec![c])));

        let mut visitor = CollectingVisitor::new();
        traverse(&root, &mut visitor);
        assert_eq!(visitor.into_ids(), vec![a, b, c]);
    }

    #[test]
    fn fn_visitor_counts_nodes() {
        let mut arena = Arena::default();
        let a = sample_id(&mut arena);
        let mut root = leaf_with(vec![a]);
        root.set_front(Some(leaf_with(vec![])));

        let mut count = 0;
        let mut visitor = FnVisitor::new(|_: &CsgNode| count += 1);
        traverse(&root, &mut visitor);
        drop(visitor);
        assert_eq!(count, 2);
    }
}
