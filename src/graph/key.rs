//! Node identifiers.

use crate::table::AttrValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node identifier: an integer or a string.
///
/// Keys are hashable and totally ordered (integers before strings, each
/// sorted naturally), which makes derived node tables deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl NodeKey {
    /// Interpret a table cell as a node key.
    ///
    /// Integers and strings map directly; other scalars are rendered to
    /// their display form, and nulls are rejected.
    pub fn from_cell(value: &AttrValue) -> Option<NodeKey> {
        match value {
            AttrValue::Int(i) => Some(NodeKey::Int(*i)),
            AttrValue::Str(s) => Some(NodeKey::Str(s.clone())),
            AttrValue::Float(f) => Some(NodeKey::Str(f.to_string())),
            AttrValue::Bool(b) => Some(NodeKey::Str(b.to_string())),
            AttrValue::Null => None,
        }
    }

    /// The cell value this key materializes as in a table column.
    pub fn to_cell(&self) -> AttrValue {
        match self {
            NodeKey::Int(i) => AttrValue::Int(*i),
            NodeKey::Str(s) => AttrValue::Str(s.clone()),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{}", i),
            NodeKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(i: i64) -> Self {
        NodeKey::Int(i)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey::Str(s.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey::Str(s)
    }
}
