//! Output extraction: turns a tree's internal polygon fragments back into
//! the public [`Polygon`](crate::Polygon) representation (spec.md §4.I).
//!
//! Splitting (during insertion or clipping) can leave both halves of an
//! originally-whole polygon surviving in the final tree, only because
//! each landed on a different side of some plane that, for the *current*
//! operation, never actually separated them (one of the split fragments
//! was simply never removed by a subsequent clip). Coalescing such pairs
//! back into their shared parent avoids emitting visibly-torn output.
//!
//! This only fires when *both* siblings of a split are still present at
//! extraction time — a single surviving fragment is left as-is, since
//! there is no sibling to recombine it with.

use std::collections::HashMap;

use crate::arena::PolygonId;
use crate::bsp::{collect_all, CsgTree};
use crate::Polygon;

pub(crate) fn extract(tree: &CsgTree) -> Vec<Polygon> {
    let ids = collect_all(tree);

    let mut by_parent: HashMap<PolygonId, PolygonId> = HashMap::new();
    let mut chosen: Vec<PolygonId> = Vec::new();

    for id in ids {
        emit(tree, id, &mut by_parent, &mut chosen);
    }

    chosen
        .into_iter()
        .map(|id| to_output_polygon(tree, id))
        .collect()
}

fn emit(
    tree: &CsgTree,
    id: PolygonId,
    by_parent: &mut HashMap<PolygonId, PolygonId>,
    chosen: &mut Vec<PolygonId>,
) {
    let parent = tree.arena.borrow().get(id).parent;
    match parent {
        None => {
            chosen.push(id);
        }
        Some(parent_id) => match by_parent.remove(&parent_id) {
            Some(sibling) => {
                if let Some(pos) = chosen.iter().position(|&x| x == sibling) {
                    chosen.remove(pos);
                }
                emit(tree, parent_id, by_parent, chosen);
            }
            None => {
                by_parent.insert(parent_id, id);
                chosen.push(id);
            }
        },
    }
}

fn to_output_polygon(tree: &CsgTree, id: PolygonId) -> Polygon {
    let arena = tree.arena.borrow();
    let entry = arena.get(id);
    let mut points = entry.vertices.clone();
    if entry.flipped {
        points.reverse();
    }
    Polygon::new(entry.color, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, PolygonEntry};
    use nalgebra::Point3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn triangle(z: f64) -> PolygonEntry {
        PolygonEntry {
            color: 1,
            vertices: vec![
                Point3::new(0.0, 0.0, z),
                Point3::new(1.0, 0.0, z),
                Point3::new(0.0, 1.0, z),
            ],
            flipped: false,
            parent: None,
        }
    }

    #[test]
    fn single_root_polygon_extracts_unchanged() {
        let arena = Rc::new(RefCell::new(Arena::default()));
        let mut tree = CsgTree::empty(arena);
        let id = tree.alloc(triangle(0.0));
        tree.insert(id);

        let out = extract(&tree);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].color(), 1);
    }

    #[test]
    fn both_split_siblings_present_coalesce_to_parent() {
        let arena = Rc::new(RefCell::new(Arena::default()));
        let mut tree = CsgTree::empty(arena.clone());
        let parent = tree.alloc(triangle(0.0));

        let mut child_a = triangle(0.0);
        child_a.parent = Some(parent);
        let mut child_b = triangle(0.0);
        child_b.parent = Some(parent);
        let a = tree.alloc(child_a);
        let b = tree.alloc(child_b);

        tree.insert(a);
        tree.insert(b);

        let out = extract(&tree);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn single_surviving_fragment_is_not_coalesced_away() {
        let arena = Rc::new(RefCell::new(Arena::default()));
        let mut tree = CsgTree::empty(arena.clone());
        let parent = tree.alloc(triangle(0.0));

        let mut child_a = triangle(1.0);
        child_a.parent = Some(parent);
        let a = tree.alloc(child_a);

        tree.insert(a);

        let out = extract(&tree);
        assert_eq!(out.len(), 1);
    }
}
