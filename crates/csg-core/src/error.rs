//! Error types for the fallible boundary of the engine.
//!
//! The BSP/CSG machinery itself performs no validation (spec.md §7: "the
//! engine does not re-validate planarity"); these errors only guard the
//! entry point where caller-supplied coordinates become a [`Polygon`](crate::Polygon).

use thiserror::Error;

/// Errors raised when constructing a [`Polygon`](crate::Polygon) from raw input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CsgError {
    /// Fewer than 3 points were supplied.
    #[error("polygon must have at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    /// The first three points are collinear, so no normal can be derived.
    #[error("polygon's first three vertices are collinear (degenerate normal)")]
    DegenerateNormal,
}
