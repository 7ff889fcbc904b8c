//! GraphML reader.
//!
//! `<key>` declarations map data keys to attribute names and types,
//! `<graph edgedefault=...>` picks the direction, and `<data>` children of
//! nodes and edges carry attribute values. The shape is promoted to multi
//! when parallel edges are present.

use super::{malformed, ParsedGraph};
use crate::error::{FormatError, NetworkGraphResult};
use crate::graph::{AttrGraph, AttrMap, NodeKey};
use crate::table::AttrValue;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;

const FORMAT: &str = "graphml";

fn xml_err(err: quick_xml::Error) -> FormatError {
    malformed(FORMAT, err.to_string())
}

fn attr_of(element: &BytesStart<'_>, name: &str) -> NetworkGraphResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| malformed(FORMAT, e.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(xml_err)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[derive(Debug, Clone)]
struct KeyDecl {
    name: String,
    kind: String,
}

fn convert(kind: &str, raw: &str) -> AttrValue {
    match kind {
        "int" | "long" => raw
            .parse::<i64>()
            .map(AttrValue::Int)
            .unwrap_or_else(|_| AttrValue::Str(raw.to_string())),
        "float" | "double" => raw
            .parse::<f64>()
            .map(AttrValue::Float)
            .unwrap_or_else(|_| AttrValue::Str(raw.to_string())),
        "boolean" => match raw {
            "true" => AttrValue::Bool(true),
            "false" => AttrValue::Bool(false),
            other => AttrValue::Str(other.to_string()),
        },
        _ => AttrValue::Str(raw.to_string()),
    }
}

fn node_key(id: &str) -> NodeKey {
    match id.parse::<i64>() {
        Ok(i) => NodeKey::Int(i),
        Err(_) => NodeKey::from(id),
    }
}

pub fn parse(text: &str) -> NetworkGraphResult<AttrGraph> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut directed = false;
    let mut keys: FxHashMap<String, KeyDecl> = FxHashMap::default();
    let mut nodes: Vec<(NodeKey, AttrMap)> = Vec::new();
    let mut edges: Vec<(NodeKey, NodeKey, AttrMap)> = Vec::new();
    let mut open: Option<(&'static str, usize)> = None;
    // data key of the <data> element whose text is pending
    let mut open_data: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"key" => {
                        let id = attr_of(e, "id")?
                            .ok_or_else(|| malformed(FORMAT, "key without id"))?;
                        let name = attr_of(e, "attr.name")?.unwrap_or_else(|| id.clone());
                        let kind =
                            attr_of(e, "attr.type")?.unwrap_or_else(|| "string".to_string());
                        keys.insert(id, KeyDecl { name, kind });
                    }
                    b"graph" => {
                        directed = attr_of(e, "edgedefault")?.as_deref() == Some("directed");
                    }
                    b"node" => {
                        let id = attr_of(e, "id")?
                            .ok_or_else(|| malformed(FORMAT, "node without id"))?;
                        nodes.push((node_key(&id), AttrMap::new()));
                        if !is_empty {
                            open = Some(("node", nodes.len() - 1));
                        }
                    }
                    b"edge" => {
                        let source = attr_of(e, "source")?
                            .ok_or_else(|| malformed(FORMAT, "edge without source"))?;
                        let target = attr_of(e, "target")?
                            .ok_or_else(|| malformed(FORMAT, "edge without target"))?;
                        edges.push((node_key(&source), node_key(&target), AttrMap::new()));
                        if !is_empty {
                            open = Some(("edge", edges.len() - 1));
                        }
                    }
                    b"data" => {
                        if !is_empty {
                            open_data = attr_of(e, "key")?;
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                if let (Some(key_id), Some((class, idx))) = (&open_data, &open) {
                    let raw = t.unescape().map_err(xml_err)?;
                    let attrs = match *class {
                        "node" => &mut nodes[*idx].1,
                        _ => &mut edges[*idx].2,
                    };
                    match keys.get(key_id.as_str()) {
                        Some(decl) => {
                            attrs.insert(decl.name.clone(), convert(&decl.kind, &raw));
                        }
                        None => {
                            attrs.insert(key_id.clone(), AttrValue::Str(raw.into_owned()));
                        }
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"node" | b"edge" => open = None,
                b"data" => open_data = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let parsed = ParsedGraph {
        directed,
        nodes,
        edges,
    };
    Ok(parsed.into_graph(false))
}
