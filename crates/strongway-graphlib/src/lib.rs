//! Mixed-graph container APIs used by `strongway`.
//!
//! Nodes and arcs are keyed by string ids and kept in insertion order, so every traversal in
//! this crate (and in the orientation engine built on it) is deterministic for a given input.

mod graph;

pub use graph::{ArcKey, Graph, GraphError, alg};
