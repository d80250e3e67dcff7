//! Arena storage for in-tree polygons, with integer-indexed parent tracking.
//!
//! spec.md §9 ("Cyclic/shared references") asks for exactly this shape in a
//! systems language: "an arena of CSGPolygon entries with integer indices;
//! `parent` becomes an optional index." One [`Arena`] is shared (via
//! [`ArenaHandle`]) by every [`crate::CsgTree`] built within a single
//! top-level boolean operation, so splitting (during insertion or clipping)
//! and merging never need to translate indices across arenas.

use std::cell::RefCell;
use std::rc::Rc;

use nalgebra::Point3;

use crate::plane::Plane3D;

/// Opaque handle to a polygon stored in an [`Arena`].
///
/// Two ids are only comparable if they were allocated from the same arena;
/// nothing checks that invariant since it holds by construction — arenas
/// are never merged, only grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolygonId(usize);

/// One polygon living inside a tree: its geometry plus the two bits of
/// bookkeeping the CSG pipeline needs (spec.md §3's "CSGPolygon"):
///
/// - `flipped`: the polygon's logical orientation is the reverse of its
///   stored point order. The flip is deferred — point order is only
///   reversed at output time (spec.md §4.I) so that clipping, which only
///   cares about planes and positions, never needs to touch it.
/// - `parent`: the polygon this one was produced from by splitting, if any.
///   Root polygons (straight from caller input) have no parent.
#[derive(Debug, Clone)]
pub(crate) struct PolygonEntry {
    pub color: u32,
    pub vertices: Vec<Point3<f64>>,
    pub flipped: bool,
    pub parent: Option<PolygonId>,
}

impl PolygonEntry {
    /// The plane this entry's vertices lie on, derived from the first three.
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_three_points(self.vertices[0], self.vertices[1], self.vertices[2])
    }
}

/// Append-only storage for [`PolygonEntry`] values, indexed by [`PolygonId`].
#[derive(Debug, Default)]
pub(crate) struct Arena {
    entries: Vec<PolygonEntry>,
}

impl Arena {
    pub fn alloc(&mut self, entry: PolygonEntry) -> PolygonId {
        let id = PolygonId(self.entries.len());
        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: PolygonId) -> &PolygonEntry {
        &self.entries[id.0]
    }

    pub fn get_mut(&mut self, id: PolygonId) -> &mut PolygonEntry {
        &mut self.entries[id.0]
    }
}

/// Shared ownership of an [`Arena`] across every tree in one top-level operation.
///
/// Single-threaded and synchronous (spec.md §5), so `Rc<RefCell<_>>` is the
/// simplest correct choice — no atomics or locking are needed, and a tree
/// never outlives the operation that allocated its arena.
pub(crate) type ArenaHandle = Rc<RefCell<Arena>>;
