//! File-backed column chunks.
//!
//! One column is stored as one bincode-encoded file. The encoding is the
//! serde representation of [`Column`], so nulls and the element type travel
//! with the data.

use super::column::Column;
use crate::error::NetworkGraphResult;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;

/// Write `column` to `path` as a single chunk file.
pub fn store_column(column: &Column, path: &Path) -> NetworkGraphResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, column)?;
    debug!(path = %path.display(), rows = column.len(), "stored column chunk");
    Ok(())
}

/// Read a column chunk written by [`store_column`].
pub fn load_column(path: &Path) -> NetworkGraphResult<Column> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let column = bincode::deserialize_from(reader)?;
    Ok(column)
}
