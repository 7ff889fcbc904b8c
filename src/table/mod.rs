//! In-memory column-oriented tables.
//!
//! A [`Table`] is an ordered set of equally long, named, typed columns. It
//! is the unit the network-graph data type is assembled from and serialized
//! to. Column order is preserved (insertion order) so round trips through
//! storage keep the original layout.

pub mod column;
pub mod storage;

pub use column::{AttrValue, Column};

use crate::error::SchemaError;
use indexmap::IndexMap;

/// An immutable column-oriented table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    num_rows: usize,
}

impl Table {
    /// Build a table from named columns, preserving their order.
    ///
    /// Fails when a column name is empty, duplicated, or the columns are
    /// not all the same length.
    pub fn new(columns: impl IntoIterator<Item = (String, Column)>) -> Result<Table, SchemaError> {
        let mut map: IndexMap<String, Column> = IndexMap::new();
        let mut num_rows: Option<usize> = None;
        for (name, column) in columns {
            if name.is_empty() {
                return Err(SchemaError::EmptyColumnName {
                    table: String::new(),
                });
            }
            let expected = *num_rows.get_or_insert(column.len());
            if column.len() != expected {
                return Err(SchemaError::ColumnLengthMismatch {
                    column: name,
                    rows: column.len(),
                    expected,
                });
            }
            if map.insert(name.clone(), column).is_some() {
                return Err(SchemaError::DuplicateColumn(name));
            }
        }
        Ok(Table {
            columns: map,
            num_rows: num_rows.unwrap_or(0),
        })
    }

    /// A table holding a single column.
    pub fn single_column(name: impl Into<String>, column: Column) -> Result<Table, SchemaError> {
        Table::new([(name.into(), column)])
    }

    /// Build a table from row-oriented attribute maps.
    ///
    /// Performs an explicit column-union merge: the column set is the union
    /// of all row keys in first-seen order, rows missing a key contribute a
    /// null, and each column's type is unified over its values.
    pub fn from_rows(rows: &[IndexMap<String, AttrValue>]) -> Result<Table, SchemaError> {
        let mut names: Vec<String> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !names.iter().any(|n| n == key) {
                    names.push(key.clone());
                }
            }
        }
        let columns = names.into_iter().map(|name| {
            let values: Vec<AttrValue> = rows
                .iter()
                .map(|row| row.get(&name).cloned().unwrap_or(AttrValue::Null))
                .collect();
            let column = Column::from_values(&values);
            (name, column)
        });
        let mut table = Table::new(columns)?;
        if table.columns.is_empty() {
            table.num_rows = rows.len();
        }
        Ok(table)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Cell at (`row`, `name`); null for unknown columns or rows.
    pub fn cell(&self, row: usize, name: &str) -> AttrValue {
        self.columns
            .get(name)
            .map(|c| c.get(row))
            .unwrap_or(AttrValue::Null)
    }

    /// Iterate `(name, column)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Row `idx` as an ordered attribute map.
    pub fn row(&self, idx: usize) -> IndexMap<String, AttrValue> {
        self.columns
            .iter()
            .map(|(name, column)| (name.clone(), column.get(idx)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_rows() -> Vec<IndexMap<String, AttrValue>> {
        let mut r1 = IndexMap::new();
        r1.insert("a".to_string(), AttrValue::Int(1));
        r1.insert("b".to_string(), AttrValue::Str("x".to_string()));
        let mut r2 = IndexMap::new();
        r2.insert("a".to_string(), AttrValue::Int(2));
        r2.insert("c".to_string(), AttrValue::Float(0.5));
        vec![r1, r2]
    }

    #[test]
    fn test_from_rows_column_union() {
        let table = Table::from_rows(&abc_rows()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.num_rows(), 2);
        // missing keys become nulls
        assert_eq!(table.cell(1, "b"), AttrValue::Null);
        assert_eq!(table.cell(0, "c"), AttrValue::Null);
        assert_eq!(table.cell(1, "a"), AttrValue::Int(2));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = Table::new([
            ("a".to_string(), Column::Int(vec![Some(1)])),
            ("b".to_string(), Column::Int(vec![Some(1), Some(2)])),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_new_rejects_empty_column_name() {
        let err = Table::new([(String::new(), Column::Int(vec![]))]).unwrap_err();
        assert!(matches!(err, SchemaError::EmptyColumnName { .. }));
    }

    #[test]
    fn test_new_rejects_duplicate_column() {
        let err = Table::new([
            ("a".to_string(), Column::Int(vec![Some(1)])),
            ("a".to_string(), Column::Int(vec![Some(2)])),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_row_round_trip() {
        let table = Table::from_rows(&abc_rows()).unwrap();
        let row = table.row(0);
        assert_eq!(row["a"], AttrValue::Int(1));
        assert_eq!(row["b"], AttrValue::Str("x".to_string()));
        assert_eq!(row["c"], AttrValue::Null);
    }
}
