//! GEXF reader.
//!
//! Reads the node and edge lists of a GEXF document, including declared
//! attributes (`<attributes>`/`<attvalue>`). Direction follows the graph
//! element's `defaultedgetype`; the shape is promoted to multi when the
//! file actually contains parallel edges.

use super::{malformed, ParsedGraph};
use crate::error::{FormatError, NetworkGraphResult};
use crate::graph::{AttrGraph, AttrMap, NodeKey};
use crate::table::AttrValue;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;

const FORMAT: &str = "gexf";

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

/// A declared attribute: its title and value type.
#[derive(Debug, Clone)]
struct AttrDecl {
    title: String,
    kind: String,
}

fn convert(kind: &str, raw: &str) -> AttrValue {
    match kind {
        "integer" | "int" | "long" => raw
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
    let mut decls: FxHashMap<(String, String), AttrDecl> = FxHashMap::default();
    let mut decl_class = String::new();
    let mut nodes: Vec<(NodeKey, AttrMap)> = Vec::new();
    let mut edges: Vec<(NodeKey, NodeKey, AttrMap)> = Vec::new();
    // (class, attrs-index) of the open node or edge element
    let mut open: Option<(&'static str, usize)> = None;

    loop {
        let event = reader.read_event().map_err(xml_err)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"graph" => {
                        directed = attr_of(e, "defaultedgetype")?.as_deref() == Some("directed");
                    }
                    b"attributes" => {
                        decl_class = attr_of(e, "class")?.unwrap_or_default();
                    }
                    b"attribute" => {
                        let id = attr_of(e, "id")?
                            .ok_or_else(|| malformed(FORMAT, "attribute without id"))?;
                        let title = attr_of(e, "title")?.unwrap_or_else(|| id.clone());
                        let kind = attr_of(e, "type")?.unwrap_or_else(|| "string".to_string());
                        decls.insert((decl_class.clone(), id), AttrDecl { title, kind });
                    }
                    b"node" => {
                        let id = attr_of(e, "id")?
                            .ok_or_else(|| malformed(FORMAT, "node without id"))?;
                        let mut attrs = AttrMap::new();
                        if let Some(label) = attr_of(e, "label")? {
                            if label != id {
                                attrs.insert("label".to_string(), AttrValue::Str(label));
                            }
                        }
                        nodes.push((node_key(&id), attrs));
                        if !is_empty {
                            open = Some(("node", nodes.len() - 1));
                        }
                    }
                    b"edge" => {
                        let source = attr_of(e, "source")?
                            .ok_or_else(|| malformed(FORMAT, "edge without source"))?;
                        let target = attr_of(e, "target")?
                            .ok_or_else(|| malformed(FORMAT, "edge without target"))?;
                        let mut attrs = AttrMap::new();
                        if let Some(weight) = attr_of(e, "weight")? {
                            if let Ok(w) = weight.parse::<f64>() {
                                attrs.insert("weight".to_string(), AttrValue::Float(w));
                            }
                        }
                        if let Some(label) = attr_of(e, "label")? {
                            attrs.insert("label".to_string(), AttrValue::Str(label));
                        }
                        edges.push((node_key(&source), node_key(&target), attrs));
                        if !is_empty {
                            open = Some(("edge", edges.len() - 1));
                        }
                    }
                    b"attvalue" => {
                        let id = attr_of(e, "for")?
                            .or(attr_of(e, "id")?)
                            .ok_or_else(|| malformed(FORMAT, "attvalue without 'for'"))?;
                        let raw = attr_of(e, "value")?.unwrap_or_default();
                        if let Some((class, idx)) = &open {
                            let attrs = match *class {
                                "node" => &mut nodes[*idx].1,
                                _ => &mut edges[*idx].2,
                            };
                            match decls.get(&(class.to_string(), id.clone())) {
                                Some(decl) => {
                                    attrs.insert(decl.title.clone(), convert(&decl.kind, &raw));
                                }
                                None => {
                                    attrs.insert(id, AttrValue::Str(raw));
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"node" | b"edge" => open = None,
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
