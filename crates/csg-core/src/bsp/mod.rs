//! Binary Space Partitioning tree: the core structure the boolean
//! operations (spec.md §4.H) are built from.

mod node;
mod tree;
mod visitor;

pub use node::CsgNode;
pub use tree::CsgTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};

pub(crate) use tree::collect_all;
