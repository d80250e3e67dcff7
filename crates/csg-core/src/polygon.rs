//! The public, arena-free polygon representation at the boundary of the engine.

use nalgebra::{Point3, Vector3};

use crate::error::CsgError;
use crate::plane::{Plane3D, PlaneSide};

/// A convex, planar polygon: a color/material tag plus an ordered loop of
/// points (spec.md §3). Winding implies orientation — the outward normal
/// is `normalize((p1-p0) x (p2-p0))`.
///
/// This type carries no parent or flip bookkeeping; that lives on the
/// internal arena entries the engine allocates while a polygon is inside a
/// tree (see `crate::arena`). A `Polygon` is always a fresh, independent
/// allocation — output polygons never alias a tree's vertex storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    color: u32,
    points: Vec<Point3<f64>>,
}

impl Polygon {
    /// Creates a new polygon from a color tag and a list of points.
    ///
    /// # Panics
    /// Panics if fewer than 3 points are given or the first three are
    /// collinear. Use [`Polygon::try_new`] to handle this without panicking.
    pub fn new(color: u32, points: Vec<Point3<f64>>) -> Self {
        Self::try_new(color, points).expect("invalid polygon")
    }

    /// Fallible constructor: rejects too-few-vertex or degenerate-normal input.
    ///
    /// Planarity of points beyond the first three is only checked in debug
    /// builds (`debug_assert!`), matching the engine's contract that the
    /// caller is responsible for supplying well-formed convex planar input.
    pub fn try_new(color: u32, points: Vec<Point3<f64>>) -> Result<Self, CsgError> {
        if points.len() < 3 {
            return Err(CsgError::TooFewVertices(points.len()));
        }
        if raw_normal(&points).norm() <= f64::EPSILON {
            return Err(CsgError::DegenerateNormal);
        }
        debug_assert!(
            are_coplanar(&points),
            "Polygon vertices must be coplanar"
        );
        Ok(Self { color, points })
    }

    /// Returns the color/material tag.
    #[inline]
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Returns the polygon's points in winding order.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no points (never true for a
    /// polygon built through [`Polygon::new`]/[`Polygon::try_new`]).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Computes the (unnormalized) normal via the first three points.
    pub fn normal(&self) -> Vector3<f64> {
        raw_normal(&self.points)
    }

    /// Computes the unit normal, or `None` if the first three points are collinear.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal();
        let len = n.norm();
        (len > f64::EPSILON).then(|| n / len)
    }

    /// Returns the plane this polygon lies on.
    ///
    /// # Panics
    /// Panics if the first three points are collinear — impossible for a
    /// polygon constructed via [`Polygon::new`]/[`Polygon::try_new`].
    pub fn plane(&self) -> Plane3D {
        Plane3D::from_three_points(self.points[0], self.points[1], self.points[2])
    }

    /// Computes the centroid (mean of all points).
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.points.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.points.len() as f64)
    }
}

fn raw_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let ab = points[1] - points[0];
    let ac = points[2] - points[0];
    ab.cross(&ac)
}

fn are_coplanar(points: &[Point3<f64>]) -> bool {
    if points.len() <= 3 {
        return true;
    }
    let plane = Plane3D::from_three_points(points[0], points[1], points[2]);
    points[3..]
        .iter()
        .all(|p| plane.classify_point(*p) == PlaneSide::OnPlane)
}
