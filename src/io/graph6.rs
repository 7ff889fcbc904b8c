//! graph6 and sparse6 readers.
//!
//! Both formats pack a graph into printable ASCII: every byte carries six
//! bits after subtracting 63. graph6 stores the upper triangle of a simple
//! undirected graph as a bit vector; sparse6 (prefixed with `:`) stores an
//! edge list in which parallel edges are legal, so it loads as an
//! undirected multigraph. Nodes are the integers `0..n`.

use super::{malformed, ParsedGraph};
use crate::error::NetworkGraphResult;
use crate::graph::{AttrGraph, AttrMap, NodeKey};

const GRAPH6_HEADER: &[u8] = b">>graph6<<";
const SPARSE6_HEADER: &[u8] = b">>sparse6<<";

fn sextets(data: &[u8], format: &'static str) -> NetworkGraphResult<Vec<u8>> {
    data.iter()
        .map(|&b| {
            b.checked_sub(63)
                .filter(|&v| v < 64)
                .ok_or_else(|| malformed(format, format!("byte {b} out of range")).into())
        })
        .collect()
}

/// Decode the leading node count; returns `(n, consumed_sextets)`.
fn decode_n(sextets: &[u8], format: &'static str) -> NetworkGraphResult<(usize, usize)> {
    match sextets {
        [first, ..] if *first < 63 => Ok((*first as usize, 1)),
        [63, second, ..] if *second < 63 => {
            if sextets.len() < 4 {
                return Err(malformed(format, "truncated node count").into());
            }
            let n = sextets[1..4]
                .iter()
                .fold(0usize, |acc, &s| (acc << 6) | s as usize);
            Ok((n, 4))
        }
        [63, 63, ..] => {
            if sextets.len() < 8 {
                return Err(malformed(format, "truncated node count").into());
            }
            let n = sextets[2..8]
                .iter()
                .fold(0usize, |acc, &s| (acc << 6) | s as usize);
            Ok((n, 8))
        }
        _ => Err(malformed(format, "empty data").into()),
    }
}

struct BitReader<'a> {
    sextets: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(sextets: &'a [u8]) -> Self {
        BitReader { sextets, pos: 0 }
    }

    fn read_bit(&mut self) -> Option<u8> {
        let sextet = *self.sextets.get(self.pos / 6)?;
        let bit = (sextet >> (5 - self.pos % 6)) & 1;
        self.pos += 1;
        Some(bit)
    }

    fn read_bits(&mut self, count: usize) -> Option<usize> {
        let mut value = 0usize;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as usize;
        }
        Some(value)
    }
}

fn strip(data: &[u8], header: &[u8]) -> Vec<u8> {
    let data = data.strip_prefix(header).unwrap_or(data);
    // a trailing newline is common in single-graph files
    data.iter()
        .copied()
        .take_while(|&b| b != b'\n' && b != b'\r')
        .collect()
}

fn int_nodes(n: usize) -> Vec<(NodeKey, AttrMap)> {
    (0..n as i64).map(|i| (NodeKey::Int(i), AttrMap::new())).collect()
}

pub fn parse_graph6(data: &[u8]) -> NetworkGraphResult<AttrGraph> {
    let format = "graph6";
    let body = strip(data, GRAPH6_HEADER);
    let sextets = sextets(&body, format)?;
    let (n, consumed) = decode_n(&sextets, format)?;

    let expected_bits = n * n.saturating_sub(1) / 2;
    let mut bits = BitReader::new(&sextets[consumed..]);
    let mut edges = Vec::new();
    for j in 1..n {
        for i in 0..j {
            let bit = bits
                .read_bit()
                .ok_or_else(|| malformed(format, "truncated adjacency bits"))?;
            if bit == 1 {
                edges.push((NodeKey::Int(i as i64), NodeKey::Int(j as i64), AttrMap::new()));
            }
        }
    }
    debug_assert_eq!(bits.pos, expected_bits);

    let parsed = ParsedGraph {
        directed: false,
        nodes: int_nodes(n),
        edges,
    };
    Ok(parsed.into_graph(false))
}

pub fn parse_sparse6(data: &[u8]) -> NetworkGraphResult<AttrGraph> {
    let format = "sparse6";
    let body = strip(data, SPARSE6_HEADER);
    let body = body
        .strip_prefix(b":")
        .ok_or_else(|| malformed(format, "missing ':' prefix"))?;
    let sextets = sextets(body, format)?;
    let (n, consumed) = decode_n(&sextets, format)?;

    // bits needed to address a node index
    let k = std::cmp::max(1, usize::BITS as usize - n.saturating_sub(1).leading_zeros() as usize);
    let mut bits = BitReader::new(&sextets[consumed..]);
    let mut edges = Vec::new();
    let mut v = 0usize;
    loop {
        let b = match bits.read_bit() {
            Some(b) => b,
            None => break,
        };
        let x = match bits.read_bits(k) {
            Some(x) => x,
            None => break,
        };
        if b == 1 {
            v += 1;
        }
        if v >= n || x >= n {
            break;
        }
        if x > v {
            v = x;
        } else {
            edges.push((NodeKey::Int(x as i64), NodeKey::Int(v as i64), AttrMap::new()));
        }
    }

    let parsed = ParsedGraph {
        directed: false,
        nodes: int_nodes(n),
        edges,
    };
    Ok(parsed.into_graph(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphShape;

    #[test]
    fn test_graph6_path_on_four_nodes() {
        // "Ch" is the four-node path: n=4, bits 101001
        let graph = parse_graph6(b"Ch").unwrap();
        assert_eq!(graph.shape(), GraphShape::Undirected);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        let pairs: Vec<(i64, i64)> = graph
            .edges()
            .iter()
            .map(|e| match (&e.source, &e.target) {
                (NodeKey::Int(a), NodeKey::Int(b)) => (*a, *b),
                _ => panic!("non-integer node key"),
            })
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_graph6_complete_graph() {
        // "C~" encodes K4
        let graph = parse_graph6(b"C~").unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_graph6_optional_header_and_newline() {
        let graph = parse_graph6(b">>graph6<<Ch\n").unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_graph6_out_of_range_byte_rejected() {
        assert!(parse_graph6(&[0x20, 0x21]).is_err());
    }

    #[test]
    fn test_sparse6_triangle() {
        // ":BcN" is the triangle on three nodes
        let graph = parse_sparse6(b":BcN").unwrap();
        assert_eq!(graph.shape(), GraphShape::UndirectedMulti);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_sparse6_parallel_edges() {
        // ":Ab" is a double edge between nodes 0 and 1
        let graph = parse_sparse6(b":Ab").unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_sparse6_requires_colon() {
        assert!(parse_sparse6(b"Ch").is_err());
    }
}
