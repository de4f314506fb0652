//! Styleable model assembly.
//!
//! Two stages, both reporting into the `ErrorAggregator` instead of failing
//! the round:
//! - [`builder`]: groups a round's records by owning declaration and turns
//!   each styleable marker into a resolved `StyleableInfo`
//! - [`tree`]: links local and external styleables into the inheritance
//!   graph the emitter walks

pub mod builder;
pub mod tree;

pub use builder::{fold_external, ModelBuilder};
pub use tree::{build_tree, StyleableNode, StyleablesTree};
