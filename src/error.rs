//! Error taxonomy for network graph construction, serialization and
//! operations.
//!
//! Every failure is surfaced immediately at the point of detection and
//! propagates to the caller; there is no local recovery or partial result
//! anywhere in this crate.

use thiserror::Error;

/// A table violates the network-graph schema contract.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("'{table}' table does not contain a '{column}' column. Available columns: {}", available.join(", "))]
    MissingColumn {
        table: String,
        column: String,
        available: Vec<String>,
    },

    #[error("table id must not be empty")]
    EmptyTableId,

    #[error("table id '{0}' must not contain '{1}'")]
    TableIdContainsMarker(String, &'static str),

    #[error("column name for table '{table}' is empty")]
    EmptyColumnName { table: String },

    #[error("column '{column}' has {rows} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        rows: usize,
        expected: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

/// A serialized representation or graph file is malformed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid serialized network graph data, key must contain '{marker}': {key}")]
    MissingSplitMarker { key: String, marker: &'static str },

    #[error("multiple storage chunks found for column '{column}' of table '{table}'")]
    MultipleChunks { table: String, column: String },

    #[error("missing '{0}' entry in serialized network graph data")]
    MissingMetadata(&'static str),

    #[error("unsupported format of file: {file}. Supported file extensions: {}", supported.join(", "))]
    UnsupportedExtension {
        file: String,
        supported: Vec<&'static str>,
    },

    #[error("malformed {format} data: {reason}")]
    Malformed { format: &'static str, reason: String },
}

/// A graph-type string does not name one of the four recognized shapes.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid graph type: {0}")]
pub struct UnsupportedGraphTypeError(pub String);

/// Parameter-level misconfiguration surfaced while running an operation.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("{0}")]
pub struct ProcessingError(pub String);

impl ProcessingError {
    pub fn new(msg: impl Into<String>) -> Self {
        ProcessingError(msg.into())
    }
}

/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum NetworkGraphError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    UnsupportedGraphType(#[from] UnsupportedGraphTypeError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chunk codec error: {0}")]
    Codec(#[from] bincode::Error),
}

pub type NetworkGraphResult<T> = Result<T, NetworkGraphError>;

impl From<netgraph_algorithms::AlgoError> for NetworkGraphError {
    fn from(err: netgraph_algorithms::AlgoError) -> Self {
        NetworkGraphError::Processing(ProcessingError(err.to_string()))
    }
}
