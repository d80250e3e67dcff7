//! Boolean operations over CSG trees (spec.md §4.H) and the crate's
//! external entry points (spec.md §6).

use std::cell::RefCell;
use std::rc::Rc;

use crate::arena::{Arena, ArenaHandle, PolygonEntry};
use crate::bsp::CsgTree;
use crate::Polygon;

/// Either a flat polygon list or an already-built tree — the two input
/// shapes the external interface accepts (spec.md §6).
pub enum CsgSource {
    Polygons(Vec<Polygon>),
    Tree(CsgTree),
}

impl From<Vec<Polygon>> for CsgSource {
    fn from(polygons: Vec<Polygon>) -> Self {
        CsgSource::Polygons(polygons)
    }
}

impl From<CsgTree> for CsgSource {
    fn from(tree: CsgTree) -> Self {
        CsgSource::Tree(tree)
    }
}

fn new_arena() -> ArenaHandle {
    Rc::new(RefCell::new(Arena::default()))
}

/// Materializes a [`CsgSource`] into a tree backed by `arena`, re-importing
/// via its extracted polygons when the source tree was built under a
/// different arena (this loses that tree's original parent-coalescence
/// chain, which is harmless — coalescence is a within-operation output
/// optimization, not part of a tree's logical polygon set).
fn into_tree(source: CsgSource, arena: &ArenaHandle) -> CsgTree {
    match source {
        CsgSource::Polygons(polygons) => build_tree(polygons, arena),
        CsgSource::Tree(tree) => {
            if Rc::ptr_eq(&tree.arena, arena) {
                tree
            } else {
                build_tree(tree.polygons(), arena)
            }
        }
    }
}

fn build_tree(polygons: Vec<Polygon>, arena: &ArenaHandle) -> CsgTree {
    let mut tree = CsgTree::empty(arena.clone());
    for polygon in polygons {
        let id = tree.alloc(PolygonEntry {
            color: polygon.color(),
            vertices: polygon.points().to_vec(),
            flipped: false,
            parent: None,
        });
        insert_into_tree(&mut tree, id);
    }
    tree
}

fn insert_into_tree(tree: &mut CsgTree, id: crate::arena::PolygonId) {
    tree.insert(id);
}

/// The five-step clip/flip/merge dance spec.md §4.H lays out for union:
/// `a.clipTo(b); b.clipTo(a); b.flip(); b.clipTo(a); b.flip(); a.addTree(b);`
fn pairwise_union(a: &mut CsgTree, b: &mut CsgTree) {
    a.clip_to(b);
    b.clip_to(a);
    b.flip();
    b.clip_to(a);
    b.flip();
    a.add_tree(b);
}

/// Computes the union of two CSG sources (spec.md §4.H, §6).
pub fn union(a: impl Into<CsgSource>, b: impl Into<CsgSource>) -> CsgTree {
    let arena = new_arena();
    let mut a = into_tree(a.into(), &arena);
    let mut b = into_tree(b.into(), &arena);
    pairwise_union(&mut a, &mut b);
    a
}

/// Left-folds [`union`] over a list of sources. Returns an empty tree for
/// an empty list.
pub fn union_all(sources: Vec<CsgSource>) -> CsgTree {
    let arena = new_arena();
    let mut iter = sources.into_iter();
    let Some(first) = iter.next() else {
        return CsgTree::empty(arena);
    };
    let mut acc = into_tree(first, &arena);
    for source in iter {
        let mut next = into_tree(source, &arena);
        pairwise_union(&mut acc, &mut next);
    }
    acc
}

/// Computes `a - b` (spec.md §4.H): `a.flip(); union-dance(a, b); a.flip();`
pub fn subtract(a: impl Into<CsgSource>, b: impl Into<CsgSource>) -> CsgTree {
    let arena = new_arena();
    let mut a = into_tree(a.into(), &arena);
    let mut b = into_tree(b.into(), &arena);

    a.flip();
    pairwise_union(&mut a, &mut b);
    a.flip();
    a
}

/// Computes the intersection of two CSG sources (spec.md §4.H):
/// `a.flip(); b.clipTo(a); b.flip(); a.clipTo(b); b.clipTo(a); a.addTree(b); a.flip();`
pub fn intersect(a: impl Into<CsgSource>, b: impl Into<CsgSource>) -> CsgTree {
    let arena = new_arena();
    let mut a = into_tree(a.into(), &arena);
    let mut b = into_tree(b.into(), &arena);

    a.flip();
    b.clip_to(&a);
    b.flip();
    a.clip_to(&b);
    b.clip_to(&a);
    a.add_tree(&b);
    a.flip();
    a
}

/// Extracts the flat polygon list of a tree (spec.md §6's named external
/// interface).
pub fn polygons(tree: &CsgTree) -> Vec<Polygon> {
    tree.polygons()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// A closed, outward-winding unit-ish cube centered at `(cx, cy, cz)`
    /// with half-extent `h`, the same 6-quad shape spec.md §8's worked
    /// examples use.
    fn cube(cx: f64, cy: f64, cz: f64, h: f64) -> Vec<Polygon> {
        let p = |x: f64, y: f64, z: f64| Point3::new(cx + x * h, cy + y * h, cz + z * h);
        let v000 = p(-1.0, -1.0, -1.0);
        let v100 = p(1.0, -1.0, -1.0);
        let v110 = p(1.0, 1.0, -1.0);
        let v010 = p(-1.0, 1.0, -1.0);
        let v001 = p(-1.0, -1.0, 1.0);
        let v101 = p(1.0, -1.0, 1.0);
        let v111 = p(1.0, 1.0, 1.0);
        let v011 = p(-1.0, 1.0, 1.0);

        vec![
            Polygon::new(0, vec![v001, v101, v111, v011]), // +z
            Polygon::new(0, vec![v100, v000, v010, v110]), // -z
            Polygon::new(0, vec![v100, v110, v111, v101]), // +x
            Polygon::new(0, vec![v000, v001, v011, v010]), // -x
            Polygon::new(0, vec![v010, v011, v111, v110]), // +y
            Polygon::new(0, vec![v000, v100, v101, v001]), // -y
        ]
    }

    #[test]
    fn union_of_disjoint_cubes_keeps_all_twelve_faces() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        let b = cube(10.0, 0.0, 0.0, 1.0);
        let tree = union(a, b);
        assert_eq!(polygons(&tree).len(), 12);
    }

    #[test]
    fn intersect_of_disjoint_cubes_is_empty() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        let b = cube(10.0, 0.0, 0.0, 1.0);
        let tree = intersect(a, b);
        assert!(polygons(&tree).is_empty());
    }

    #[test]
    fn subtract_of_disjoint_cube_leaves_original_unchanged() {
        let a = cube(0.0, 0.0, 0.0, 1.0);
        let b = cube(10.0, 0.0, 0.0, 1.0);
        let tree = subtract(a, b);
        assert_eq!(polygons(&tree).len(), 6);
    }

    #[test]
    fn union_all_with_no_sources_is_empty() {
        let tree = union_all(vec![]);
        assert!(polygons(&tree).is_empty());
    }
}
