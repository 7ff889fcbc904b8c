//! Chunked serialization of a network graph record.
//!
//! Serialization flattens the record into an ordered map of flat keys. Each
//! table column becomes a `<table>::<column>` key pointing at a raw column
//! file inside a temporary working directory, and the record's metadata
//! becomes a single inline JSON chunk under the `graph_metadata` key. The
//! working directory lives exactly as long as the returned
//! [`SerializedGraph`]; dropping the value removes the files.

use crate::defaults::{
    EDGES_TABLE_NAME, GRAPH_METADATA_KEY, NODES_TABLE_NAME, TABLE_COLUMN_SPLIT_MARKER,
};
use crate::error::{FormatError, NetworkGraphResult, SchemaError};
use crate::graph::GraphShape;
use crate::record::{ColumnBindings, NetworkGraph};
use crate::table::{storage, Column, Table};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::debug;

/// One storage chunk of a serialized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Chunk {
    /// A column persisted as a raw codec file.
    File { file: PathBuf, codec: String },
    /// Small metadata embedded directly in the chunk map.
    InlineJson {
        inline_data: serde_json::Value,
        codec: String,
    },
}

/// The `graph_metadata` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GraphMetadata {
    graph_type: String,
    source_column_name: String,
    target_column_name: String,
    node_id_column_name: String,
}

/// A serialized record: the chunk map plus the temporary directory holding
/// the column files. The directory is removed when this value is dropped.
#[derive(Debug)]
pub struct SerializedGraph {
    chunks: IndexMap<String, Chunk>,
    workdir: TempDir,
}

impl SerializedGraph {
    /// The flat chunk map, keys in serialization order.
    pub fn chunks(&self) -> &IndexMap<String, Chunk> {
        &self.chunks
    }

    pub fn chunk(&self, key: &str) -> Option<&Chunk> {
        self.chunks.get(key)
    }

    /// Path of the working directory holding the column files.
    pub fn workdir(&self) -> &std::path::Path {
        self.workdir.path()
    }
}

impl NetworkGraph {
    /// Serialize the record into a chunk map backed by a fresh temporary
    /// directory.
    ///
    /// Table ids and column names are re-validated against the split marker
    /// before any file is written; a violation fails the whole operation.
    pub fn serialize(&self) -> NetworkGraphResult<SerializedGraph> {
        let tables = [
            (EDGES_TABLE_NAME, self.edges()),
            (NODES_TABLE_NAME, self.nodes()),
        ];
        for (table_id, table) in &tables {
            validate_table_id(table_id)?;
            for name in table.column_names() {
                if name.is_empty() {
                    return Err(SchemaError::EmptyColumnName {
                        table: table_id.to_string(),
                    }
                    .into());
                }
            }
        }

        let workdir = TempDir::new()?;
        let mut chunks: IndexMap<String, Chunk> = IndexMap::new();

        let metadata = GraphMetadata {
            graph_type: self.graph_type().as_str().to_string(),
            source_column_name: self.source_column_name().to_string(),
            target_column_name: self.target_column_name().to_string(),
            node_id_column_name: self.node_id_column_name().to_string(),
        };
        chunks.insert(
            GRAPH_METADATA_KEY.to_string(),
            Chunk::InlineJson {
                inline_data: serde_json::to_value(&metadata)?,
                codec: "json".to_string(),
            },
        );

        for (table_id, table) in &tables {
            for (idx, (name, column)) in table.iter().enumerate() {
                // file names are positional so column names never have to
                // be path-safe
                let path = workdir.path().join(format!("{}_{}", table_id, idx));
                storage::store_column(column, &path)?;
                let key = format!("{}{}{}", table_id, TABLE_COLUMN_SPLIT_MARKER, name);
                chunks.insert(
                    key,
                    Chunk::File {
                        file: path,
                        codec: "raw".to_string(),
                    },
                );
            }
        }

        debug!(
            chunks = chunks.len(),
            workdir = %workdir.path().display(),
            "serialized network graph"
        );
        Ok(SerializedGraph { chunks, workdir })
    }

    /// Reconstruct a record from a chunk map.
    ///
    /// The `graph_metadata` chunk is read first to recover the graph type
    /// and column bindings; every other key must split on the table/column
    /// marker and point at exactly one column file.
    pub fn deserialize(chunks: &IndexMap<String, Chunk>) -> NetworkGraphResult<NetworkGraph> {
        let metadata = match chunks.get(GRAPH_METADATA_KEY) {
            Some(Chunk::InlineJson { inline_data, .. }) => {
                serde_json::from_value::<GraphMetadata>(inline_data.clone())?
            }
            Some(Chunk::File { .. }) | None => {
                return Err(FormatError::MissingMetadata(GRAPH_METADATA_KEY).into())
            }
        };
        let graph_type: GraphShape = metadata.graph_type.parse()?;

        let mut tables: IndexMap<&str, IndexMap<&str, Column>> = IndexMap::new();
        for (key, chunk) in chunks {
            if key == GRAPH_METADATA_KEY {
                continue;
            }
            let (table_id, column_name) =
                key.split_once(TABLE_COLUMN_SPLIT_MARKER)
                    .ok_or_else(|| FormatError::MissingSplitMarker {
                        key: key.clone(),
                        marker: TABLE_COLUMN_SPLIT_MARKER,
                    })?;
            let column = match chunk {
                Chunk::File { file, .. } => storage::load_column(file)?,
                Chunk::InlineJson { .. } => {
                    return Err(FormatError::Malformed {
                        format: "chunk map",
                        reason: format!("column chunk '{}' is not a file chunk", key),
                    }
                    .into())
                }
            };
            let columns = tables.entry(table_id).or_default();
            if columns.insert(column_name, column).is_some() {
                return Err(FormatError::MultipleChunks {
                    table: table_id.to_string(),
                    column: column_name.to_string(),
                }
                .into());
            }
        }

        let edges = match tables.shift_remove(EDGES_TABLE_NAME) {
            Some(columns) => build_table(columns)?,
            None => {
                return Err(FormatError::Malformed {
                    format: "chunk map",
                    reason: format!("no '{}' table chunks present", EDGES_TABLE_NAME),
                }
                .into())
            }
        };
        let nodes = tables
            .shift_remove(NODES_TABLE_NAME)
            .map(build_table)
            .transpose()?;

        let bindings = ColumnBindings {
            source: metadata.source_column_name,
            target: metadata.target_column_name,
            node_id: metadata.node_id_column_name,
        };
        NetworkGraph::from_tables_with_bindings(graph_type, edges, nodes, bindings)
    }
}

fn validate_table_id(table_id: &str) -> Result<(), SchemaError> {
    if table_id.is_empty() {
        return Err(SchemaError::EmptyTableId);
    }
    if table_id.contains(TABLE_COLUMN_SPLIT_MARKER) {
        return Err(SchemaError::TableIdContainsMarker(
            table_id.to_string(),
            TABLE_COLUMN_SPLIT_MARKER,
        ));
    }
    Ok(())
}

fn build_table(columns: IndexMap<&str, Column>) -> Result<Table, SchemaError> {
    Table::new(columns.into_iter().map(|(n, c)| (n.to_string(), c)))
}
