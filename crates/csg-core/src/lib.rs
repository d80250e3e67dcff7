//! Constructive solid geometry via Binary Space Partitioning trees.
//!
//! Polygons go in ([`Polygon`]), boolean combinations come out
//! ([`union`], [`subtract`], [`intersect`]) by way of a [`CsgTree`] built
//! from plane splitting, clipping, and merging.

mod arena;
mod bsp;
mod error;
mod extract;
mod ops;
mod plane;
mod polygon;
mod split;

pub use arena::PolygonId;
pub use bsp::{BspVisitor, CollectingVisitor, CsgNode, CsgTree, FnVisitor};
pub use error::CsgError;
pub use ops::{intersect, polygons, subtract, union, union_all, CsgSource};
pub use plane::{Classification, Plane3D, PlaneSide, PLANE_EPSILON};
pub use polygon::Polygon;
