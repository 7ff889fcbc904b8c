//! Pajek (.net) reader.
//!
//! Sections start with a `*` keyword: `*vertices` declares nodes (id plus
//! optional quoted label), `*arcs` holds directed and `*edges` undirected
//! edge lines, with `*arcslist`/`*edgeslist` as their adjacency-list forms.
//! Pajek graphs always load as a multi shape; the presence of an `*edges`
//! section makes the whole graph undirected.

use super::{malformed, ParsedGraph};
use crate::error::NetworkGraphResult;
use crate::graph::{AttrGraph, AttrMap, NodeKey};
use crate::table::AttrValue;
use rustc_hash::FxHashMap;

const FORMAT: &str = "pajek";

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            let mut s = String::new();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                s.push(c);
            }
            fields.push(s);
        } else {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                s.push(c);
                chars.next();
            }
            fields.push(s);
        }
    }
    fields
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Vertices,
    Arcs,
    Edges,
    ArcsList,
    EdgesList,
    Other,
}

pub fn parse(text: &str) -> NetworkGraphResult<AttrGraph> {
    let mut keys_by_id: FxHashMap<i64, NodeKey> = FxHashMap::default();
    let mut nodes: Vec<(NodeKey, AttrMap)> = Vec::new();
    let mut edges: Vec<(NodeKey, NodeKey, AttrMap)> = Vec::new();
    let mut saw_undirected_section = false;
    let mut section = Section::Other;

    let lookup = |keys_by_id: &FxHashMap<i64, NodeKey>,
                      field: &str|
     -> NetworkGraphResult<NodeKey> {
        let id: i64 = field
            .parse()
            .map_err(|_| malformed(FORMAT, format!("invalid node reference '{field}'")))?;
        keys_by_id
            .get(&id)
            .cloned()
            .ok_or_else(|| malformed(FORMAT, format!("edge references unknown vertex {id}")).into())
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('*') {
            let keyword = rest
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            section = match keyword.as_str() {
                "vertices" => Section::Vertices,
                "arcs" => Section::Arcs,
                "edges" => Section::Edges,
                "arcslist" => Section::ArcsList,
                "edgeslist" => Section::EdgesList,
                _ => Section::Other,
            };
            if matches!(section, Section::Edges | Section::EdgesList) {
                saw_undirected_section = true;
            }
            continue;
        }

        let fields = split_fields(line);
        if fields.is_empty() {
            continue;
        }
        match section {
            Section::Vertices => {
                let id: i64 = fields[0]
                    .parse()
                    .map_err(|_| malformed(FORMAT, format!("invalid vertex id '{}'", fields[0])))?;
                let key = match fields.get(1) {
                    Some(label) => NodeKey::from(label.clone()),
                    None => NodeKey::Int(id),
                };
                keys_by_id.insert(id, key.clone());
                nodes.push((key, AttrMap::new()));
            }
            Section::Arcs | Section::Edges => {
                if fields.len() < 2 {
                    return Err(malformed(FORMAT, format!("short edge line '{line}'")).into());
                }
                let source = lookup(&keys_by_id, &fields[0])?;
                let target = lookup(&keys_by_id, &fields[1])?;
                let mut attrs = AttrMap::new();
                if let Some(weight) = fields.get(2).and_then(|f| f.parse::<f64>().ok()) {
                    attrs.insert("weight".to_string(), AttrValue::Float(weight));
                }
                edges.push((source, target, attrs));
            }
            Section::ArcsList | Section::EdgesList => {
                let source = lookup(&keys_by_id, &fields[0])?;
                for field in &fields[1..] {
                    let target = lookup(&keys_by_id, field)?;
                    edges.push((source.clone(), target, AttrMap::new()));
                }
            }
            Section::Other => {}
        }
    }

    let parsed = ParsedGraph {
        directed: !saw_undirected_section,
        nodes,
        edges,
    };
    Ok(parsed.into_graph(true))
}
