//! The closed set of graph shapes.

use crate::error::UnsupportedGraphTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of a network graph: direction and edge multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphShape {
    Directed,
    Undirected,
    DirectedMulti,
    UndirectedMulti,
}

impl GraphShape {
    /// Classify a shape from its two capabilities. Ordered so that a graph
    /// that is both directed and multi is always `DirectedMulti`, never
    /// plain `Directed`.
    pub fn classify(directed: bool, multi: bool) -> GraphShape {
        match (directed, multi) {
            (true, true) => GraphShape::DirectedMulti,
            (false, true) => GraphShape::UndirectedMulti,
            (true, false) => GraphShape::Directed,
            (false, false) => GraphShape::Undirected,
        }
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, GraphShape::Directed | GraphShape::DirectedMulti)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, GraphShape::DirectedMulti | GraphShape::UndirectedMulti)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphShape::Directed => "directed",
            GraphShape::Undirected => "undirected",
            GraphShape::DirectedMulti => "directed_multi",
            GraphShape::UndirectedMulti => "undirected_multi",
        }
    }
}

impl fmt::Display for GraphShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GraphShape {
    type Err = UnsupportedGraphTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directed" => Ok(GraphShape::Directed),
            "undirected" => Ok(GraphShape::Undirected),
            "directed_multi" => Ok(GraphShape::DirectedMulti),
            "undirected_multi" => Ok(GraphShape::UndirectedMulti),
            other => Err(UnsupportedGraphTypeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        // directed + multi must never classify as plain directed
        assert_eq!(GraphShape::classify(true, true), GraphShape::DirectedMulti);
        assert_eq!(GraphShape::classify(false, true), GraphShape::UndirectedMulti);
        assert_eq!(GraphShape::classify(true, false), GraphShape::Directed);
        assert_eq!(GraphShape::classify(false, false), GraphShape::Undirected);
    }

    #[test]
    fn test_string_round_trip() {
        for shape in [
            GraphShape::Directed,
            GraphShape::Undirected,
            GraphShape::DirectedMulti,
            GraphShape::UndirectedMulti,
        ] {
            assert_eq!(shape.as_str().parse::<GraphShape>().unwrap(), shape);
        }
    }

    #[test]
    fn test_unknown_shape_rejected() {
        let err = "hypergraph".parse::<GraphShape>().unwrap_err();
        assert_eq!(err.to_string(), "invalid graph type: hypergraph");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&GraphShape::DirectedMulti).unwrap();
        assert_eq!(json, "\"directed_multi\"");
    }
}
