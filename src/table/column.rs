//! Typed nullable columns and the scalar cell value type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell or attribute value.
///
/// This is the value domain of table cells and of node/edge attributes on
/// the in-memory graph object. Nested collections are deliberately absent:
/// a table cell holds exactly one scalar or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view: integers promote to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            AttrValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => write!(f, "{}", s),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// A single typed column of nullable values.
///
/// One column is exactly one storage chunk: the serde representation is what
/// gets bincode-encoded into a chunk file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `idx`, null when out of range.
    pub fn get(&self, idx: usize) -> AttrValue {
        match self {
            Column::Int(v) => v
                .get(idx)
                .and_then(|&o| o)
                .map(AttrValue::Int)
                .unwrap_or(AttrValue::Null),
            Column::Float(v) => v
                .get(idx)
                .and_then(|&o| o)
                .map(AttrValue::Float)
                .unwrap_or(AttrValue::Null),
            Column::Str(v) => v
                .get(idx)
                .and_then(|o| o.as_ref())
                .map(|s| AttrValue::Str(s.clone()))
                .unwrap_or(AttrValue::Null),
            Column::Bool(v) => v
                .get(idx)
                .and_then(|&o| o)
                .map(AttrValue::Bool)
                .unwrap_or(AttrValue::Null),
        }
    }

    /// Build a column from cell values, unifying the element type.
    ///
    /// Type unification over the non-null values: any string makes a string
    /// column (other scalars are rendered), otherwise any float makes a
    /// float column (integers promote), otherwise integer, otherwise bool.
    /// An all-null sequence becomes a string column of nulls.
    pub fn from_values(values: &[AttrValue]) -> Column {
        let mut has_str = false;
        let mut has_float = false;
        let mut has_int = false;
        let mut has_bool = false;
        for v in values {
            match v {
                AttrValue::Str(_) => has_str = true,
                AttrValue::Float(_) => has_float = true,
                AttrValue::Int(_) => has_int = true,
                AttrValue::Bool(_) => has_bool = true,
                AttrValue::Null => {}
            }
        }
        // bools mixed with numbers degrade to strings
        if has_bool && (has_float || has_int) {
            has_str = true;
        }

        if has_str {
            Column::Str(
                values
                    .iter()
                    .map(|v| match v {
                        AttrValue::Null => None,
                        other => Some(other.to_string()),
                    })
                    .collect(),
            )
        } else if has_float {
            Column::Float(values.iter().map(AttrValue::as_f64).collect())
        } else if has_int {
            Column::Int(values.iter().map(AttrValue::as_int).collect())
        } else if has_bool {
            Column::Bool(values.iter().map(AttrValue::as_bool).collect())
        } else {
            Column::Str(vec![None; values.len()])
        }
    }

    /// All cells in order.
    pub fn values(&self) -> Vec<AttrValue> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_value_conversions() {
        let v: AttrValue = "hello".into();
        assert_eq!(v.as_str(), Some("hello"));

        let v: AttrValue = 42i64.into();
        assert_eq!(v.as_int(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));

        let v: AttrValue = 2.5.into();
        assert_eq!(v.as_f64(), Some(2.5));

        assert!(AttrValue::Null.is_null());
    }

    #[test]
    fn test_from_values_int_column() {
        let col = Column::from_values(&[1i64.into(), AttrValue::Null, 3i64.into()]);
        assert_eq!(col, Column::Int(vec![Some(1), None, Some(3)]));
    }

    #[test]
    fn test_from_values_int_promotes_to_float() {
        let col = Column::from_values(&[1i64.into(), 2.5.into()]);
        assert_eq!(col, Column::Float(vec![Some(1.0), Some(2.5)]));
    }

    #[test]
    fn test_from_values_mixed_becomes_string() {
        let col = Column::from_values(&["a".into(), 1i64.into()]);
        assert_eq!(
            col,
            Column::Str(vec![Some("a".to_string()), Some("1".to_string())])
        );
    }

    #[test]
    fn test_from_values_all_null() {
        let col = Column::from_values(&[AttrValue::Null, AttrValue::Null]);
        assert_eq!(col, Column::Str(vec![None, None]));
        assert_eq!(col.get(0), AttrValue::Null);
    }

    #[test]
    fn test_get_out_of_range_is_null() {
        let col = Column::Int(vec![Some(1)]);
        assert_eq!(col.get(5), AttrValue::Null);
    }
}
