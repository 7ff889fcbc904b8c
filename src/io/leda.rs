//! LEDA.GRAPH reader.
//!
//! The header is four lines (the `LEDA.GRAPH` tag, the node and edge
//! parameter types, and `-1` for directed or `-2` for undirected), followed
//! by the node count, one `|{label}|` line per node, the edge count, and
//! one `source target reversal |{label}|` line per edge. Node indices are
//! 1-based; a non-empty label becomes the node key.

use super::{malformed, ParsedGraph};
use crate::error::NetworkGraphResult;
use crate::graph::{AttrGraph, AttrMap, NodeKey};
use crate::table::AttrValue;

const FORMAT: &str = "leda";

fn braced(line: &str) -> Option<&str> {
    let start = line.find("|{")?;
    let end = line[start..].find("}|")?;
    Some(&line[start + 2..start + end])
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> NetworkGraphResult<&'a str> {
    lines
        .next()
        .ok_or_else(|| malformed(FORMAT, format!("missing {what}")).into())
}

pub fn parse(text: &str) -> NetworkGraphResult<AttrGraph> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let header = next_line(&mut lines, "header")?;
    if header != "LEDA.GRAPH" {
        return Err(malformed(FORMAT, format!("unexpected header '{header}'")).into());
    }
    next_line(&mut lines, "node type")?;
    next_line(&mut lines, "edge type")?;
    let directed = match next_line(&mut lines, "direction flag")? {
        "-1" => true,
        "-2" => false,
        other => {
            return Err(malformed(FORMAT, format!("invalid direction flag '{other}'")).into())
        }
    };

    let node_count: usize = next_line(&mut lines, "node count")?
        .parse()
        .map_err(|_| malformed(FORMAT, "invalid node count"))?;
    let mut keys: Vec<NodeKey> = Vec::with_capacity(node_count);
    let mut nodes = Vec::with_capacity(node_count);
    for idx in 1..=node_count {
        let line = next_line(&mut lines, "node line")?;
        let label = braced(line)
            .ok_or_else(|| malformed(FORMAT, format!("node line without |{{}}|: '{line}'")))?;
        let key = if label.is_empty() {
            NodeKey::Int(idx as i64)
        } else {
            NodeKey::from(label)
        };
        keys.push(key.clone());
        nodes.push((key, AttrMap::new()));
    }

    let edge_count: usize = next_line(&mut lines, "edge count")?
        .parse()
        .map_err(|_| malformed(FORMAT, "invalid edge count"))?;
    let mut edges = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        let line = next_line(&mut lines, "edge line")?;
        let mut fields = line.split_whitespace();
        let mut endpoint = |name: &str| -> NetworkGraphResult<NodeKey> {
            let idx: usize = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| malformed(FORMAT, format!("edge line without {name}: '{line}'")))?;
            keys.get(idx.wrapping_sub(1))
                .cloned()
                .ok_or_else(|| malformed(FORMAT, format!("edge references unknown node {idx}")).into())
        };
        let source = endpoint("source")?;
        let target = endpoint("target")?;
        let mut attrs = AttrMap::new();
        if let Some(label) = braced(line) {
            if !label.is_empty() {
                attrs.insert("label".to_string(), AttrValue::Str(label.to_string()));
            }
        }
        edges.push((source, target, attrs));
    }

    let parsed = ParsedGraph {
        directed,
        nodes,
        edges,
    };
    Ok(parsed.into_graph(false))
}
