//! Descriptor trees: nodes, merge points, the builder DSL, and merging.

pub mod builder;
pub mod merge;
pub mod merge_point;
pub mod node;
pub mod query;

pub use builder::{Builder, IntoName, IntoProperties};
pub use merge::MergeConfig;
pub use merge_point::{Budget, MergePoint, MergePointError, MergePointList};
pub use node::Descriptor;
