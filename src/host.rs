//! Capabilities the embedding host supplies.

use crate::error::NetworkGraphResult;
use crate::table::Table;

/// A host-provided SQL engine for ad hoc queries over a record's tables.
///
/// [`NetworkGraph::query`](crate::record::NetworkGraph::query) binds the
/// record's tables under the names `edges` and `nodes` and forwards the
/// statement here. Implementations must treat the bound tables as
/// read-only.
pub trait QueryEngine {
    fn execute(&self, sql: &str, tables: &[(&str, &Table)]) -> NetworkGraphResult<Table>;
}
