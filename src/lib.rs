//! Netgraph
//!
//! A network-graph data type for data-orchestration pipelines: a graph is a
//! validated pairing of an edges table and a nodes table plus graph-shape
//! metadata, serializable as a flat chunk map and analyzable through a set
//! of stateless operations (centrality measures, cut points, modularity
//! communities, weight assignment).
//!
//! The heavy topology work lives in the `netgraph-algorithms` workspace
//! crate; this crate owns the data model, validation, serialization, graph
//! file import and the operation layer.
//!
//! ## Example Usage
//!
//! ```rust
//! use netgraph::graph::GraphShape;
//! use netgraph::ops::degree_ranking;
//! use netgraph::record::NetworkGraph;
//! use netgraph::table::{AttrValue, Column, Table};
//!
//! // An edges table is all it takes; the nodes table is derived.
//! let edges = Table::new([
//!     (
//!         "source".to_string(),
//!         Column::Str(vec![Some("a".into()), Some("a".into())]),
//!     ),
//!     (
//!         "target".to_string(),
//!         Column::Str(vec![Some("b".into()), Some("c".into())]),
//!     ),
//! ])
//! .unwrap();
//! let network = NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap();
//! assert_eq!(network.num_nodes(), 3);
//!
//! // Score every node and get a ranked table back.
//! let out = degree_ranking(&network, None).unwrap();
//! assert_eq!(out.ranking.cell(0, "Node"), AttrValue::Str("a".to_string()));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod defaults;
pub mod error;
pub mod graph;
pub mod host;
pub mod io;
pub mod ops;
pub mod record;
pub mod table;

// Re-export main types for convenience
pub use error::{
    FormatError, NetworkGraphError, NetworkGraphResult, ProcessingError, SchemaError,
    UnsupportedGraphTypeError,
};
pub use graph::{AttrGraph, AttrMap, GraphEdge, GraphShape, NodeKey};
pub use host::QueryEngine;
pub use record::serialize::{Chunk, SerializedGraph};
pub use record::{ColumnBindings, GraphProperties, NetworkGraph};
pub use table::{AttrValue, Column, Table};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
