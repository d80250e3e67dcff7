//! Plane representation and signed-distance classification for the BSP engine.

use nalgebra::{Point3, Vector3};

/// Absolute tolerance for signed-distance classification against a plane.
///
/// Assumes input coordinates are O(1) in magnitude; scenes at a much larger
/// scale should scale this (or classify with a relative tolerance) via the
/// `*_with_epsilon` methods below instead of the default.
pub const PLANE_EPSILON: f64 = 8e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal).
    Front,
    /// Point is behind the plane (negative side of normal).
    Back,
    /// Point lies on the plane (within epsilon tolerance).
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every vertex is in front of the plane.
    Front,
    /// Every vertex is behind the plane.
    Back,
    /// Every vertex lies on the plane.
    Coplanar,
    /// Vertices lie on both sides — the polygon spans the plane.
    Spanning,
}

/// A plane in 3D space, represented as `normal · point = offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    ///
    /// The normal is normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        let unit_normal = normal / norm;
        let offset = unit_normal.dot(&point.coords);
        Self {
            normal: unit_normal,
            offset,
        }
    }

    /// Creates a plane from three points, following the right-hand rule:
    /// `normal = (b - a) × (c - a)`.
    ///
    /// # Panics
    /// Panics if the points are collinear (or nearly so).
    pub fn from_three_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let normal = ab.cross(&ac);
        Self::from_point_and_normal(a, normal)
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the plane's offset along its normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Computes the signed distance from a point to the plane.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies a point using the default [`PLANE_EPSILON`] tolerance.
    #[inline]
    pub fn classify_point(&self, point: Point3<f64>) -> PlaneSide {
        self.classify_point_with_epsilon(point, PLANE_EPSILON)
    }

    /// Classifies a point using a caller-supplied tolerance.
    pub fn classify_point_with_epsilon(&self, point: Point3<f64>, epsilon: f64) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal (and offset) flipped.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Flips this plane in place: negates the normal and offset.
    ///
    /// Used by tree flip (spec.md §4.E), which must invert every node's
    /// plane as part of exchanging a solid's interior and exterior.
    #[inline]
    pub(crate) fn flip_in_place(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }
}
