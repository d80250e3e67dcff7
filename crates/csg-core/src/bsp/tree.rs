//! BSP tree container: incremental insertion, flip, clip, and merge
//! (spec.md §4.C, §4.E, §4.F, §4.G).

use crate::arena::{ArenaHandle, PolygonEntry, PolygonId};
use crate::plane::Classification;
use crate::split::{classify, split};

use super::node::CsgNode;
use super::visitor::{traverse, BspVisitor, CollectingVisitor};

/// Past this insertion depth, a warning is logged once per operation —
/// degenerate or highly coplanar input can otherwise recurse unboundedly.
const MAX_SOFT_DEPTH: usize = 1000;

/// A BSP tree: a possibly-empty root node plus a handle to the arena that
/// owns every polygon reachable from it (spec.md §3's "CSGNode" rooted
/// structure, together with the shared storage spec.md §9 recommends).
#[derive(Debug)]
pub struct CsgTree {
    pub(crate) arena: ArenaHandle,
    root: Option<CsgNode>,
}

impl CsgTree {
    /// Creates an empty tree backed by `arena`.
    pub(crate) fn empty(arena: ArenaHandle) -> Self {
        Self { arena, root: None }
    }

    /// Allocates `entry` in this tree's arena and returns its id, without
    /// inserting it into the tree.
    pub(crate) fn alloc(&self, entry: PolygonEntry) -> PolygonId {
        self.arena.borrow_mut().alloc(entry)
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&CsgNode> {
        self.root.as_ref()
    }

    /// Returns the total number of polygons stored in the tree.
    pub fn polygon_count(&self) -> usize {
        self.root.as_ref().map_or(0, CsgNode::polygon_count)
    }

    /// Returns the tree's depth (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, CsgNode::depth)
    }

    /// Inserts the already-allocated polygon `id` into the tree (spec.md
    /// §4.C): if the tree is empty, `id` becomes the root's splitting
    /// plane; otherwise it is classified against the current node and
    /// recurses, coplanar polygons join the node's bundle, and spanning
    /// polygons are split first.
    pub(crate) fn insert(&mut self, id: PolygonId) {
        match &mut self.root {
            None => {
                let plane = self.arena.borrow().get(id).plane();
                self.root = Some(CsgNode::new(plane, vec![id]));
            }
            Some(root) => insert_into(root, &self.arena, id, 0),
        }
    }

    /// Visits every node of the tree in pre-order (spec.md §4.D).
    pub fn traverse<V: BspVisitor>(&self, visitor: &mut V) {
        if let Some(root) = &self.root {
            traverse(root, visitor);
        }
    }

    /// Inverts the tree in place: every plane is negated and every node's
    /// children are swapped (spec.md §4.E). This exchanges the solid's
    /// interior and exterior without touching stored point order — the
    /// `flipped` bit on each polygon is what defers the visible effect to
    /// output time.
    pub fn flip(&mut self) {
        if let Some(root) = &mut self.root {
            flip_node(root, &self.arena);
        }
    }

    /// Removes, from this tree, every polygon (or fragment) lying inside
    /// `bsp` (spec.md §4.F).
    pub fn clip_to(&mut self, bsp: &CsgTree) {
        if let Some(bsp_root) = &bsp.root {
            if let Some(root) = &mut self.root {
                clip_node(root, bsp_root, &self.arena);
            }
        }
    }

    /// Merges every polygon of `source` into this tree by re-inserting it
    /// (spec.md §4.G). Requires `source` to share this tree's arena —
    /// callers that merge trees from different top-level operations must
    /// re-import via [`crate::ops::into_tree`] first.
    pub fn add_tree(&mut self, source: &CsgTree) {
        debug_assert!(
            std::rc::Rc::ptr_eq(&self.arena, &source.arena),
            "add_tree requires both trees to share an arena"
        );
        for id in collect_all(source) {
            self.insert(id);
        }
    }

    /// Extracts the tree's current polygon set (spec.md §4.I), coalescing
    /// sibling fragments produced by splitting back toward their parent
    /// where both sides of a split survived.
    pub fn polygons(&self) -> Vec<crate::Polygon> {
        crate::extract::extract(self)
    }
}

fn insert_into(node: &mut CsgNode, arena: &ArenaHandle, id: PolygonId, depth: usize) {
    if depth == MAX_SOFT_DEPTH {
        log::warn!("BSP insertion exceeded {MAX_SOFT_DEPTH} levels; input may be pathological");
    }

    let classification = {
        let a = arena.borrow();
        classify(a.get(id), node.plane())
    };

    match classification {
        Classification::Coplanar => node.polygons_mut().push(id),
        Classification::Front => insert_side(node, arena, id, depth, true),
        Classification::Back => insert_side(node, arena, id, depth, false),
        Classification::Spanning => {
            let plane = node.plane().clone();
            let (front_id, back_id) = split(arena, id, &plane);
            if let Some(f) = front_id {
                insert_side(node, arena, f, depth, true);
            }
            if let Some(b) = back_id {
                insert_side(node, arena, b, depth, false);
            }
        }
    }
}

fn insert_side(node: &mut CsgNode, arena: &ArenaHandle, id: PolygonId, depth: usize, front: bool) {
    let existing = if front { node.front_mut() } else { node.back_mut() };
    if let Some(child) = existing {
        insert_into(child, arena, id, depth + 1);
    } else {
        let plane = arena.borrow().get(id).plane();
        let child = CsgNode::new(plane, vec![id]);
        if front {
            node.set_front(Some(child));
        } else {
            node.set_back(Some(child));
        }
    }
}

fn flip_node(node: &mut CsgNode, arena: &ArenaHandle) {
    for &id in node.polygons() {
        arena.borrow_mut().get_mut(id).flipped ^= true;
    }
    node.flip_plane();
    node.swap_children();
    if let Some(front) = node.front_mut() {
        flip_node(front, arena);
    }
    if let Some(back) = node.back_mut() {
        flip_node(back, arena);
    }
}

/// Clips `polygons` against the subtree rooted at `node` (spec.md §4.F's
/// inner `clipPolygons` routine): classifies each against `node`'s plane,
/// splitting spanning polygons first, then recurses front polygons into
/// `node.front` (dropped if absent — nothing there removes them, so they
/// pass through unchanged) and back polygons into `node.back` (dropped
/// entirely if absent, since past the deepest back branch everything is
/// interior to the clipping solid).
fn clip_polygons(node: &CsgNode, arena: &ArenaHandle, ids: Vec<PolygonId>) -> Vec<PolygonId> {
    let mut front_ids = Vec::new();
    let mut back_ids = Vec::new();

    for id in ids {
        let classification = {
            let a = arena.borrow();
            classify(a.get(id), node.plane())
        };
        match classification {
            Classification::Front => front_ids.push(id),
            Classification::Back => back_ids.push(id),
            Classification::Coplanar => {
                // Tie-break by normal alignment (spec.md §4.F): a coplanar
                // polygon facing the same way as the node's plane is kept
                // on the front side, otherwise the back. Flip is deferred
                // (§9): `entry.plane()` reflects stored vertex order only,
                // so a flipped polygon's true facing normal is its negation.
                let same_direction = {
                    let a = arena.borrow();
                    let entry = a.get(id);
                    let n = entry.plane().normal();
                    let facing_normal = if entry.flipped { -n } else { n };
                    node.plane().normal().dot(&facing_normal) > 0.0
                };
                if same_direction {
                    front_ids.push(id);
                } else {
                    back_ids.push(id);
                }
            }
            Classification::Spanning => {
                let plane = node.plane().clone();
                let (front_id, back_id) = split(arena, id, &plane);
                if let Some(f) = front_id {
                    front_ids.push(f);
                }
                if let Some(b) = back_id {
                    back_ids.push(b);
                }
            }
        }
    }

    let front_ids = match node.front() {
        Some(front_node) => clip_polygons(front_node, arena, front_ids),
        None => front_ids,
    };
    let back_ids = match node.back() {
        Some(back_node) => clip_polygons(back_node, arena, back_ids),
        None => Vec::new(),
    };

    let mut result = front_ids;
    result.extend(back_ids);
    result
}

fn clip_node(node: &mut CsgNode, bsp_root: &CsgNode, arena: &ArenaHandle) {
    let ids = std::mem::take(node.polygons_mut());
    *node.polygons_mut() = clip_polygons(bsp_root, arena, ids);

    if let Some(front) = node.front_mut() {
        clip_node(front, bsp_root, arena);
    }
    if let Some(back) = node.back_mut() {
        clip_node(back, bsp_root, arena);
    }
}

// Re-exported so `extract.rs` and `add_tree` can walk the tree without
// duplicating the pre-order collection logic.
pub(crate) fn collect_all(tree: &CsgTree) -> Vec<PolygonId> {
    let mut visitor = CollectingVisitor::new();
    tree.traverse(&mut visitor);
    visitor.into_ids()
}
