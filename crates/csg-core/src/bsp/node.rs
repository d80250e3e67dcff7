//! BSP tree node (spec.md §3's "CSGNode").

use crate::arena::PolygonId;
use crate::plane::Plane3D;

/// A node in the BSP tree.
///
/// Each node carries a splitting plane, a non-empty bundle of polygons
/// coplanar with that plane (spec.md §3 invariant 1), and optional
/// front/back subtrees holding polygons strictly in front of / behind the
/// plane (invariants 2–3).
#[derive(Debug, Clone)]
pub struct CsgNode {
    plane: Plane3D,
    polygons: Vec<PolygonId>,
    front: Option<Box<CsgNode>>,
    back: Option<Box<CsgNode>>,
}

impl CsgNode {
    pub(crate) fn new(plane: Plane3D, polygons: Vec<PolygonId>) -> Self {
        Self {
            plane,
            polygons,
            front: None,
            back: None,
        }
    }

    /// Returns this node's splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the bundle of polygons coplanar with this node's plane.
    #[inline]
    pub fn polygons(&self) -> &[PolygonId] {
        &self.polygons
    }

    pub(crate) fn polygons_mut(&mut self) -> &mut Vec<PolygonId> {
        &mut self.polygons
    }

    /// Returns the front child subtree, if any.
    #[inline]
    pub fn front(&self) -> Option<&CsgNode> {
        self.front.as_deref()
    }

    /// Returns the back child subtree, if any.
    #[inline]
    pub fn back(&self) -> Option<&CsgNode> {
        self.back.as_deref()
    }

    pub(crate) fn front_mut(&mut self) -> Option<&mut CsgNode> {
        self.front.as_deref_mut()
    }

    pub(crate) fn back_mut(&mut self) -> Option<&mut CsgNode> {
        self.back.as_deref_mut()
    }

    pub(crate) fn set_front(&mut self, node: Option<CsgNode>) {
        self.front = node.map(Box::new);
    }

    pub(crate) fn set_back(&mut self, node: Option<CsgNode>) {
        self.back = node.map(Box::new);
    }

    /// Negates this node's plane in place (spec.md §4.E).
    pub(crate) fn flip_plane(&mut self) {
        self.plane.flip_in_place();
    }

    /// Swaps the front and back children in place (spec.md §4.E).
    pub(crate) fn swap_children(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Returns `true` if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree, including descendants.
    pub fn polygon_count(&self) -> usize {
        let mut count = self.polygons.len();
        if let Some(front) = &self.front {
            count += front.polygon_count();
        }
        if let Some(back) = &self.back {
            count += back.polygon_count();
        }
        count
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front.as_ref().map_or(0, |n| n.depth());
        let back_depth = self.back.as_ref().map_or(0, |n| n.depth());
        1 + front_depth.max(back_depth)
    }
}
