//! In-memory graph object and its supporting types.
//!
//! The attribute graph is the algorithmic face of a network graph: node
//! identifiers with attribute maps, an ordered edge list, and a shape
//! drawn from the closed set {directed, undirected, directed_multi,
//! undirected_multi}.

pub mod key;
pub mod object;
pub mod shape;

pub use key::NodeKey;
pub use object::{AttrGraph, AttrMap, GraphEdge};
pub use shape::GraphShape;
