//! GML (graph modelling language) reader.
//!
//! GML is a list of `key value` pairs where a value is a quoted string, a
//! number, or a bracketed sub-list. The graph lives under the top-level
//! `graph` key; `directed 1` and `multigraph 1` flags pick the shape, and
//! node `label` values (when present) become the node keys.

use super::{malformed, ParsedGraph};
use crate::error::NetworkGraphResult;
use crate::graph::{AttrGraph, AttrMap, NodeKey};
use crate::table::AttrValue;
use rustc_hash::FxHashMap;

const FORMAT: &str = "gml";

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<(String, Value)>),
}

impl Value {
    fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn to_cell(&self) -> Option<AttrValue> {
        match self {
            Value::Int(i) => Some(AttrValue::Int(*i)),
            Value::Float(f) => Some(AttrValue::Float(*f)),
            Value::Str(s) => Some(AttrValue::Str(s.clone())),
            // nested lists do not map onto table cells
            Value::List(_) => None,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Str(String),
    Open,
    Close,
}

fn tokenize(text: &str) -> NetworkGraphResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            _ if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                // comment to end of line
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut s = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => s.push(c),
                        None => return Err(malformed(FORMAT, "unterminated string").into()),
                    }
                }
                tokens.push(Token::Str(s));
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '[' || c == ']' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }
    Ok(tokens)
}

fn parse_list(tokens: &[Token], pos: &mut usize) -> NetworkGraphResult<Vec<(String, Value)>> {
    let mut entries = Vec::new();
    while *pos < tokens.len() {
        let key = match &tokens[*pos] {
            Token::Close => {
                *pos += 1;
                return Ok(entries);
            }
            Token::Word(w) => w.clone(),
            other => return Err(malformed(FORMAT, format!("expected key, found {other:?}")).into()),
        };
        *pos += 1;
        let value = match tokens.get(*pos) {
            Some(Token::Open) => {
                *pos += 1;
                Value::List(parse_list(tokens, pos)?)
            }
            Some(Token::Str(s)) => {
                *pos += 1;
                Value::Str(s.clone())
            }
            Some(Token::Word(w)) => {
                *pos += 1;
                if let Ok(i) = w.parse::<i64>() {
                    Value::Int(i)
                } else if let Ok(f) = w.parse::<f64>() {
                    Value::Float(f)
                } else {
                    Value::Str(w.clone())
                }
            }
            _ => return Err(malformed(FORMAT, format!("key '{key}' has no value")).into()),
        };
        entries.push((key, value));
    }
    Ok(entries)
}

fn attrs_from(entries: &[(String, Value)], skip: &[&str]) -> AttrMap {
    let mut attrs = AttrMap::new();
    for (key, value) in entries {
        if skip.contains(&key.as_str()) {
            continue;
        }
        if let Some(cell) = value.to_cell() {
            attrs.insert(key.clone(), cell);
        }
    }
    attrs
}

pub fn parse(text: &str) -> NetworkGraphResult<AttrGraph> {
    let tokens = tokenize(text)?;
    let mut pos = 0;
    let top = parse_list(&tokens, &mut pos)?;
    let graph_entries = top
        .iter()
        .find_map(|(key, value)| match (key.as_str(), value) {
            ("graph", Value::List(entries)) => Some(entries),
            _ => None,
        })
        .ok_or_else(|| malformed(FORMAT, "no 'graph' list found"))?;

    let flag = |name: &str| {
        graph_entries
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_int())
            == Some(1)
    };
    let directed = flag("directed");
    let multigraph = flag("multigraph");

    let mut keys_by_id: FxHashMap<i64, NodeKey> = FxHashMap::default();
    let mut nodes = Vec::new();
    for (key, value) in graph_entries {
        if key != "node" {
            continue;
        }
        let entries = match value {
            Value::List(entries) => entries,
            _ => return Err(malformed(FORMAT, "'node' is not a list").into()),
        };
        let id = entries
            .iter()
            .find(|(k, _)| k == "id")
            .and_then(|(_, v)| v.as_int())
            .ok_or_else(|| malformed(FORMAT, "node without integer 'id'"))?;
        let node_key = match entries.iter().find(|(k, _)| k == "label") {
            Some((_, Value::Str(label))) => NodeKey::from(label.clone()),
            _ => NodeKey::Int(id),
        };
        keys_by_id.insert(id, node_key.clone());
        nodes.push((node_key, attrs_from(entries, &["id", "label"])));
    }

    let mut edges = Vec::new();
    for (key, value) in graph_entries {
        if key != "edge" {
            continue;
        }
        let entries = match value {
            Value::List(entries) => entries,
            _ => return Err(malformed(FORMAT, "'edge' is not a list").into()),
        };
        let endpoint = |name: &str| -> NetworkGraphResult<NodeKey> {
            let id = entries
                .iter()
                .find(|(k, _)| k == name)
                .and_then(|(_, v)| v.as_int())
                .ok_or_else(|| malformed(FORMAT, format!("edge without integer '{name}'")))?;
            keys_by_id
                .get(&id)
                .cloned()
                .ok_or_else(|| malformed(FORMAT, format!("edge references unknown node {id}")).into())
        };
        let source = endpoint("source")?;
        let target = endpoint("target")?;
        edges.push((source, target, attrs_from(entries, &["source", "target"])));
    }

    let parsed = ParsedGraph {
        directed,
        nodes,
        edges,
    };
    Ok(parsed.into_graph(multigraph))
}
