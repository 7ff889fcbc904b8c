//! The network graph record: a validated pairing of an edges table and a
//! nodes table with graph-shape metadata.
//!
//! A record is immutable once built; operations produce new records. The
//! three factory paths are table assembly ([`NetworkGraph::from_tables`]),
//! projection from an in-memory graph object ([`NetworkGraph::from_graph`])
//! and file import ([`NetworkGraph::from_file`]).

pub mod serialize;

use crate::defaults::{
    DEFAULT_NODE_ID_COLUMN_NAME, DEFAULT_SOURCE_COLUMN_NAME, DEFAULT_TARGET_COLUMN_NAME,
    EDGES_TABLE_NAME, NODES_TABLE_NAME,
};
use crate::error::{NetworkGraphResult, ProcessingError, SchemaError};
use crate::graph::{AttrGraph, AttrMap, GraphShape, NodeKey};
use crate::host::QueryEngine;
use crate::table::{AttrValue, Column, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Names binding a record's tables to graph roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBindings {
    /// Edges column holding the source node id.
    pub source: String,
    /// Edges column holding the target node id.
    pub target: String,
    /// Nodes column holding the node id.
    pub node_id: String,
}

impl Default for ColumnBindings {
    fn default() -> Self {
        ColumnBindings {
            source: DEFAULT_SOURCE_COLUMN_NAME.to_string(),
            target: DEFAULT_TARGET_COLUMN_NAME.to_string(),
            node_id: DEFAULT_NODE_ID_COLUMN_NAME.to_string(),
        }
    }
}

/// A validated edges/nodes table pair with graph-shape metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkGraph {
    graph_type: GraphShape,
    source_column_name: String,
    target_column_name: String,
    node_id_column_name: String,
    edges: Table,
    nodes: Table,
}

/// On-demand row counts of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphProperties {
    pub number_of_nodes: usize,
    pub number_of_edges: usize,
}

impl NetworkGraph {
    /// Assemble a record from tables using the default column bindings.
    pub fn from_tables(
        graph_type: GraphShape,
        edges: Table,
        nodes: Option<Table>,
    ) -> NetworkGraphResult<NetworkGraph> {
        Self::from_tables_with_bindings(graph_type, edges, nodes, ColumnBindings::default())
    }

    /// Assemble a record from tables.
    ///
    /// The edges table must contain the bound source and target columns. A
    /// supplied nodes table must contain the bound node-id column; when no
    /// nodes table is given one is derived as the sorted distinct union of
    /// the edge endpoint values.
    pub fn from_tables_with_bindings(
        graph_type: GraphShape,
        edges: Table,
        nodes: Option<Table>,
        bindings: ColumnBindings,
    ) -> NetworkGraphResult<NetworkGraph> {
        for column in [&bindings.source, &bindings.target] {
            if !edges.has_column(column) {
                return Err(SchemaError::MissingColumn {
                    table: EDGES_TABLE_NAME.to_string(),
                    column: column.clone(),
                    available: edges.column_names().iter().map(|s| s.to_string()).collect(),
                }
                .into());
            }
        }

        let nodes = match nodes {
            Some(table) => {
                if !table.has_column(&bindings.node_id) {
                    return Err(SchemaError::MissingColumn {
                        table: NODES_TABLE_NAME.to_string(),
                        column: bindings.node_id.clone(),
                        available: table.column_names().iter().map(|s| s.to_string()).collect(),
                    }
                    .into());
                }
                table
            }
            None => {
                let derived = derive_node_table(&edges, &bindings)?;
                debug!(nodes = derived.num_rows(), "derived implicit node table");
                derived
            }
        };

        Ok(NetworkGraph {
            graph_type,
            source_column_name: bindings.source,
            target_column_name: bindings.target,
            node_id_column_name: bindings.node_id,
            edges,
            nodes,
        })
    }

    /// Build a record from an in-memory graph object with default bindings.
    pub fn from_graph(graph: &AttrGraph) -> NetworkGraphResult<NetworkGraph> {
        Self::from_graph_with_bindings(graph, ColumnBindings::default())
    }

    /// Build a record from an in-memory graph object.
    ///
    /// Node and edge attribute maps are flattened into table rows with a
    /// column-union merge; the node id and the edge endpoints are added
    /// under the bound column names. The graph type is taken from the
    /// object's shape (a directed multigraph is always classified as
    /// `directed_multi`, never plain `directed`).
    pub fn from_graph_with_bindings(
        graph: &AttrGraph,
        bindings: ColumnBindings,
    ) -> NetworkGraphResult<NetworkGraph> {
        let node_rows: Vec<AttrMap> = graph
            .nodes()
            .map(|(key, attrs)| {
                let mut row = AttrMap::new();
                row.insert(bindings.node_id.clone(), key.to_cell());
                for (name, value) in attrs {
                    if name != &bindings.node_id {
                        row.insert(name.clone(), value.clone());
                    }
                }
                row
            })
            .collect();
        let mut nodes = Table::from_rows(&node_rows)?;
        if nodes.num_columns() == 0 {
            // empty graph still needs the id column
            nodes = Table::single_column(bindings.node_id.clone(), Column::Str(Vec::new()))?;
        }

        let edge_rows: Vec<AttrMap> = graph
            .edges()
            .iter()
            .map(|edge| {
                let mut row = AttrMap::new();
                row.insert(bindings.source.clone(), edge.source.to_cell());
                row.insert(bindings.target.clone(), edge.target.to_cell());
                for (name, value) in &edge.attrs {
                    if name != &bindings.source && name != &bindings.target {
                        row.insert(name.clone(), value.clone());
                    }
                }
                row
            })
            .collect();
        let mut edges = Table::from_rows(&edge_rows)?;
        if edges.num_columns() == 0 {
            // edgeless graph still needs the endpoint columns
            edges = Table::new([
                (bindings.source.clone(), Column::Str(Vec::new())),
                (bindings.target.clone(), Column::Str(Vec::new())),
            ])?;
        }

        Self::from_tables_with_bindings(graph.shape(), edges, Some(nodes), bindings)
    }

    /// Import a graph file, dispatching on the file extension, then build a
    /// record from the resulting graph object.
    ///
    /// Supported extensions: gml, gexf, graphml, pajek/net, leda,
    /// graph6/g6, sparse6/s6.
    pub fn from_file(path: &Path) -> NetworkGraphResult<NetworkGraph> {
        let graph = crate::io::read_graph_file(path)?;
        Self::from_graph(&graph)
    }

    pub fn graph_type(&self) -> GraphShape {
        self.graph_type
    }

    pub fn source_column_name(&self) -> &str {
        &self.source_column_name
    }

    pub fn target_column_name(&self) -> &str {
        &self.target_column_name
    }

    pub fn node_id_column_name(&self) -> &str {
        &self.node_id_column_name
    }

    /// The column bindings of this record.
    pub fn bindings(&self) -> ColumnBindings {
        ColumnBindings {
            source: self.source_column_name.clone(),
            target: self.target_column_name.clone(),
            node_id: self.node_id_column_name.clone(),
        }
    }

    pub fn edges(&self) -> &Table {
        &self.edges
    }

    pub fn nodes(&self) -> &Table {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.num_rows()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.num_rows()
    }

    pub fn properties(&self) -> GraphProperties {
        GraphProperties {
            number_of_nodes: self.num_nodes(),
            number_of_edges: self.num_edges(),
        }
    }

    /// Run an ad hoc query against the two tables through a host-provided
    /// engine. The tables are bound under the fixed names `edges` and
    /// `nodes`; the underlying tables are never mutated.
    pub fn query(&self, engine: &dyn QueryEngine, sql: &str) -> NetworkGraphResult<Table> {
        engine.execute(
            sql,
            &[(EDGES_TABLE_NAME, &self.edges), (NODES_TABLE_NAME, &self.nodes)],
        )
    }

    /// Materialize the record as an in-memory graph object.
    ///
    /// Every node row becomes a node keyed by the node-id column with the
    /// remaining columns as attributes; every edge row becomes an edge
    /// keyed by the endpoint columns. This is a full materialization and
    /// only suitable for modest graph sizes.
    pub fn to_graph(&self) -> NetworkGraphResult<AttrGraph> {
        let mut graph = AttrGraph::new(self.graph_type);

        for row_idx in 0..self.nodes.num_rows() {
            let id_cell = self.nodes.cell(row_idx, &self.node_id_column_name);
            let key = NodeKey::from_cell(&id_cell).ok_or_else(|| {
                ProcessingError::new(format!(
                    "nodes table row {} has a null '{}' value",
                    row_idx, self.node_id_column_name
                ))
            })?;
            let mut attrs = self.nodes.row(row_idx);
            attrs.shift_remove(&self.node_id_column_name);
            graph.add_node(key, attrs);
        }

        for row_idx in 0..self.edges.num_rows() {
            let source_cell = self.edges.cell(row_idx, &self.source_column_name);
            let target_cell = self.edges.cell(row_idx, &self.target_column_name);
            let source = NodeKey::from_cell(&source_cell).ok_or_else(|| {
                ProcessingError::new(format!(
                    "edges table row {} has a null '{}' value",
                    row_idx, self.source_column_name
                ))
            })?;
            let target = NodeKey::from_cell(&target_cell).ok_or_else(|| {
                ProcessingError::new(format!(
                    "edges table row {} has a null '{}' value",
                    row_idx, self.target_column_name
                ))
            })?;
            let mut attrs = self.edges.row(row_idx);
            attrs.shift_remove(&self.source_column_name);
            attrs.shift_remove(&self.target_column_name);
            graph.add_edge(source, target, attrs);
        }

        Ok(graph)
    }
}

/// Derive the implicit node table: the sorted distinct union of the values
/// in the edges table's source and target columns, as a single column named
/// by the node-id binding.
///
/// The sort is the total order on node keys (integers numerically, then
/// strings lexicographically), so the derivation is deterministic for a
/// fixed edge set.
fn derive_node_table(edges: &Table, bindings: &ColumnBindings) -> Result<Table, SchemaError> {
    let mut keys: BTreeSet<NodeKey> = BTreeSet::new();
    for column in [&bindings.source, &bindings.target] {
        if let Some(col) = edges.column(column) {
            for idx in 0..col.len() {
                if let Some(key) = NodeKey::from_cell(&col.get(idx)) {
                    keys.insert(key);
                }
            }
        }
    }
    let cells: Vec<AttrValue> = keys.iter().map(NodeKey::to_cell).collect();
    Table::single_column(bindings.node_id.clone(), Column::from_values(&cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkGraphError;

    fn edges_table() -> Table {
        Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("b".into()), Some("a".into()), Some("a".into())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("c".into()), Some("b".into()), Some("c".into())]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_tables_derives_sorted_nodes() {
        let record =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        assert_eq!(record.nodes().column_names(), vec!["node_id"]);
        let ids = record.nodes().column("node_id").unwrap().values();
        assert_eq!(
            ids,
            vec![
                AttrValue::Str("a".to_string()),
                AttrValue::Str("b".to_string()),
                AttrValue::Str("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        let second =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        assert_eq!(first.nodes(), second.nodes());
    }

    #[test]
    fn test_missing_source_column_fails_with_schema_error() {
        let edges = Table::new([(
            "from".to_string(),
            Column::Str(vec![Some("a".into())]),
        )])
        .unwrap();
        let err =
            NetworkGraph::from_tables(GraphShape::Directed, edges, None).unwrap_err();
        match err {
            NetworkGraphError::Schema(SchemaError::MissingColumn {
                table,
                column,
                available,
            }) => {
                assert_eq!(table, "edges");
                assert_eq!(column, "source");
                assert_eq!(available, vec!["from".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_supplied_nodes_table_must_have_id_column() {
        let nodes = Table::new([(
            "name".to_string(),
            Column::Str(vec![Some("a".into())]),
        )])
        .unwrap();
        let err =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), Some(nodes))
                .unwrap_err();
        assert!(matches!(
            err,
            NetworkGraphError::Schema(SchemaError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_graph_round_trip_preserves_bindings() {
        let edges = Table::new([
            ("from".to_string(), Column::Int(vec![Some(1), Some(2)])),
            ("to".to_string(), Column::Int(vec![Some(2), Some(3)])),
            (
                "weight".to_string(),
                Column::Float(vec![Some(0.5), Some(1.5)]),
            ),
        ])
        .unwrap();
        let bindings = ColumnBindings {
            source: "from".to_string(),
            target: "to".to_string(),
            node_id: "id".to_string(),
        };
        let record = NetworkGraph::from_tables_with_bindings(
            GraphShape::Directed,
            edges,
            None,
            bindings.clone(),
        )
        .unwrap();

        let graph = record.to_graph().unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let rebuilt = NetworkGraph::from_graph_with_bindings(&graph, bindings).unwrap();
        assert_eq!(rebuilt.graph_type(), GraphShape::Directed);
        assert_eq!(rebuilt.edges().column_names(), vec!["from", "to", "weight"]);
        assert_eq!(rebuilt.edges(), record.edges());
    }

    #[test]
    fn test_empty_graph_round_trips() {
        let record = NetworkGraph::from_graph(&AttrGraph::new(GraphShape::Undirected)).unwrap();
        assert_eq!(record.num_nodes(), 0);
        assert_eq!(record.num_edges(), 0);
        assert_eq!(record.nodes().column_names(), vec!["node_id"]);
        assert_eq!(record.edges().column_names(), vec!["source", "target"]);

        let graph = record.to_graph().unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_to_graph_excludes_id_columns_from_attrs() {
        let record =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        let graph = record.to_graph().unwrap();
        let (_, attrs) = graph.nodes().next().unwrap();
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_properties() {
        let record =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        let props = record.properties();
        assert_eq!(props.number_of_nodes, 3);
        assert_eq!(props.number_of_edges, 3);
    }

    #[test]
    fn test_query_binds_fixed_table_names() {
        struct EchoEngine;
        impl QueryEngine for EchoEngine {
            fn execute(
                &self,
                sql: &str,
                tables: &[(&str, &Table)],
            ) -> NetworkGraphResult<Table> {
                assert_eq!(tables[0].0, "edges");
                assert_eq!(tables[1].0, "nodes");
                let col = Column::Str(vec![Some(sql.to_string())]);
                Ok(Table::single_column("sql", col)?)
            }
        }

        let record =
            NetworkGraph::from_tables(GraphShape::Undirected, edges_table(), None).unwrap();
        let result = record.query(&EchoEngine, "select count(*) from edges").unwrap();
        assert_eq!(
            result.cell(0, "sql"),
            AttrValue::Str("select count(*) from edges".to_string())
        );
    }

    #[test]
    fn test_derived_int_keys_sort_numerically() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Int(vec![Some(10), Some(2)]),
            ),
            ("target".to_string(), Column::Int(vec![Some(2), Some(1)])),
        ])
        .unwrap();
        let record = NetworkGraph::from_tables(GraphShape::Directed, edges, None).unwrap();
        assert_eq!(
            record.nodes().column("node_id").unwrap().values(),
            vec![AttrValue::Int(1), AttrValue::Int(2), AttrValue::Int(10)]
        );
    }
}
