//! Polygon classification and splitting (spec.md §4.A, §4.B).
//!
//! Grounded on the teacher's `cuttable.rs` edge walk — which already
//! implements the "≥ −ε / ≤ +ε dual emission, straddling edge →
//! interpolate" rule — generalized to thread `color`, `flipped`, and
//! `parent` through each emitted fragment (spec.md §3's CSGPolygon).

use crate::arena::{ArenaHandle, PolygonEntry, PolygonId};
use crate::plane::{Classification, Plane3D, PLANE_EPSILON};

/// Classifies an in-arena polygon against `plane` (spec.md §4.B,
/// "classification pass"): walks its vertices once, tallying how many are
/// strictly front/back/on-plane.
pub(crate) fn classify(entry: &PolygonEntry, plane: &Plane3D) -> Classification {
    let mut front = 0usize;
    let mut back = 0usize;
    let mut on_plane = 0usize;

    for vertex in &entry.vertices {
        match plane.classify_point(*vertex) {
            crate::plane::PlaneSide::Front => front += 1,
            crate::plane::PlaneSide::Back => back += 1,
            crate::plane::PlaneSide::OnPlane => on_plane += 1,
        }
    }

    if on_plane == entry.vertices.len() {
        Classification::Coplanar
    } else if back == 0 {
        Classification::Front
    } else if front == 0 {
        Classification::Back
    } else {
        Classification::Spanning
    }
}

/// Splits the polygon `id` by `plane` (spec.md §4.B, "spanning split").
///
/// Returns the ids of freshly allocated front/back fragments. Each
/// fragment inherits `color` and `flipped` from `id` and has `parent =
/// Some(id)`. A side is `None` if its fragment would have fewer than 3
/// vertices (degenerate fragments are silently dropped, per spec.md §4.B
/// "Failure" — logged at `trace` level so a caller can diagnose an
/// unexpectedly low output polygon count).
pub(crate) fn split(
    arena: &ArenaHandle,
    id: PolygonId,
    plane: &Plane3D,
) -> (Option<PolygonId>, Option<PolygonId>) {
    let (color, flipped, vertices) = {
        let a = arena.borrow();
        let e = a.get(id);
        (e.color, e.flipped, e.vertices.clone())
    };
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    for i in 0..n {
        let current = vertices[i];
        let d = plane.signed_distance(current);

        if d >= -PLANE_EPSILON {
            front_verts.push(current);
        }
        if d <= PLANE_EPSILON {
            back_verts.push(current);
        }

        let next = vertices[(i + 1) % n];
        let d_next = plane.signed_distance(next);
        let straddles =
            (d < -PLANE_EPSILON && d_next > PLANE_EPSILON) || (d > PLANE_EPSILON && d_next < -PLANE_EPSILON);
        if straddles {
            let denom = plane.normal().dot(&(next - current));
            let t = -d / denom;
            let point = current + t * (next - current);
            front_verts.push(point);
            back_verts.push(point);
        }
    }

    let mut a = arena.borrow_mut();
    let front_id = if front_verts.len() >= 3 {
        Some(a.alloc(PolygonEntry {
            color,
            vertices: front_verts,
            flipped,
            parent: Some(id),
        }))
    } else {
        if !front_verts.is_empty() {
            log::trace!("split dropped a {}-vertex front fragment", front_verts.len());
        }
        None
    };
    let back_id = if back_verts.len() >= 3 {
        Some(a.alloc(PolygonEntry {
            color,
            vertices: back_verts,
            flipped,
            parent: Some(id),
        }))
    } else {
        if !back_verts.is_empty() {
            log::trace!("split dropped a {}-vertex back fragment", back_verts.len());
        }
        None
    };

    (front_id, back_id)
}
