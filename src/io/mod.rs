//! Graph file import.
//!
//! [`read_graph_file`] dispatches on the file extension and parses the file
//! into an in-memory graph object. Each reader decides the graph shape the
//! way the format does: formats without an explicit multigraph flag are
//! promoted to a multi shape only when parallel edges are actually present.

mod gexf;
mod gml;
mod graph6;
mod graphml;
mod leda;
mod pajek;

use crate::error::{FormatError, NetworkGraphResult};
use crate::graph::{AttrGraph, AttrMap, GraphShape, NodeKey};
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Extensions [`read_graph_file`] accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "gml", "gexf", "graphml", "pajek", "net", "leda", "graph6", "g6", "sparse6", "s6",
];

/// Parse a graph file, dispatching on its extension.
pub fn read_graph_file(path: &Path) -> NetworkGraphResult<AttrGraph> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let graph = match extension.as_str() {
        "gml" => gml::parse(&fs::read_to_string(path)?)?,
        "gexf" => gexf::parse(&fs::read_to_string(path)?)?,
        "graphml" => graphml::parse(&fs::read_to_string(path)?)?,
        "pajek" | "net" => pajek::parse(&fs::read_to_string(path)?)?,
        "leda" => leda::parse(&fs::read_to_string(path)?)?,
        "graph6" | "g6" => graph6::parse_graph6(&fs::read(path)?)?,
        "sparse6" | "s6" => graph6::parse_sparse6(&fs::read(path)?)?,
        _ => {
            return Err(FormatError::UnsupportedExtension {
                file: path.display().to_string(),
                supported: SUPPORTED_EXTENSIONS.to_vec(),
            }
            .into())
        }
    };
    debug!(
        file = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        shape = %graph.shape(),
        "imported graph file"
    );
    Ok(graph)
}

/// Intermediate parse result shared by the format readers.
pub(crate) struct ParsedGraph {
    pub directed: bool,
    pub nodes: Vec<(NodeKey, AttrMap)>,
    pub edges: Vec<(NodeKey, NodeKey, AttrMap)>,
}

impl ParsedGraph {
    /// Assemble the attribute graph.
    ///
    /// `force_multi` pins a multi shape regardless of content; otherwise
    /// the shape is multi exactly when a parallel endpoint pair exists.
    pub fn into_graph(self, force_multi: bool) -> AttrGraph {
        let multi = force_multi || self.has_parallel_edges();
        let mut graph = AttrGraph::new(GraphShape::classify(self.directed, multi));
        for (key, attrs) in self.nodes {
            graph.add_node(key, attrs);
        }
        for (source, target, attrs) in self.edges {
            graph.add_edge(source, target, attrs);
        }
        graph
    }

    fn has_parallel_edges(&self) -> bool {
        let mut seen: FxHashSet<(&NodeKey, &NodeKey)> = FxHashSet::default();
        for (source, target, _) in &self.edges {
            let pair = if !self.directed && target < source {
                (target, source)
            } else {
                (source, target)
            };
            if !seen.insert(pair) {
                return true;
            }
        }
        false
    }
}

pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> FormatError {
    FormatError::Malformed {
        format,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkGraphError;
    use std::io::Write;

    #[test]
    fn test_unsupported_extension() {
        let err = read_graph_file(Path::new("graph.csv")).unwrap_err();
        match err {
            NetworkGraphError::Format(FormatError::UnsupportedExtension { supported, .. }) => {
                assert!(supported.contains(&"gml"));
                assert!(supported.contains(&"s6"));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_reads_gml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.gml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "graph [\n  directed 1\n  node [ id 0 label \"a\" ]\n  node [ id 1 label \"b\" ]\n  edge [ source 0 target 1 ]\n]"
        )
        .unwrap();
        let graph = read_graph_file(&path).unwrap();
        assert_eq!(graph.shape(), GraphShape::Directed);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_parallel_edges_promote_to_multi() {
        let parsed = ParsedGraph {
            directed: false,
            nodes: vec![],
            edges: vec![
                (NodeKey::from("a"), NodeKey::from("b"), AttrMap::new()),
                (NodeKey::from("b"), NodeKey::from("a"), AttrMap::new()),
            ],
        };
        let graph = parsed.into_graph(false);
        assert_eq!(graph.shape(), GraphShape::UndirectedMulti);
        assert_eq!(graph.edge_count(), 2);
    }
}
