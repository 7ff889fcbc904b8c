//! Reserved names and default column bindings.

/// Fixed id of the edges table on a network graph.
pub const EDGES_TABLE_NAME: &str = "edges";

/// Fixed id of the nodes table on a network graph.
pub const NODES_TABLE_NAME: &str = "nodes";

/// Default name of the edges column holding the source node id.
pub const DEFAULT_SOURCE_COLUMN_NAME: &str = "source";

/// Default name of the edges column holding the target node id.
pub const DEFAULT_TARGET_COLUMN_NAME: &str = "target";

/// Default name of the nodes column holding the node id.
pub const DEFAULT_NODE_ID_COLUMN_NAME: &str = "node_id";

/// Reserved delimiter separating table id from column name in flat
/// serialization keys. Table ids must never contain it.
pub const TABLE_COLUMN_SPLIT_MARKER: &str = "::";

/// Serialization key of the inline graph metadata chunk.
pub const GRAPH_METADATA_KEY: &str = "graph_metadata";

/// Edge attribute consulted by weighted operations.
pub const WEIGHT_ATTRIBUTE_NAME: &str = "weight";
