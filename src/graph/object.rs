//! The in-memory attribute graph object.
//!
//! [`AttrGraph`] is the materialized form a network graph takes while an
//! algorithm runs over it: nodes keyed by [`NodeKey`] with attribute maps,
//! edges as an ordered list with attribute maps. Construction order is
//! preserved so projecting a record to a graph and back keeps row order.

use super::key::NodeKey;
use super::shape::GraphShape;
use crate::table::AttrValue;
use indexmap::IndexMap;
use netgraph_algorithms::GraphView;
use rustc_hash::FxHashMap;

/// Ordered attribute map of a node or edge.
pub type AttrMap = IndexMap<String, AttrValue>;

/// One edge with its endpoints and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub attrs: AttrMap,
}

/// An attribute graph of one of the four shapes.
///
/// Non-multi shapes collapse duplicate endpoint pairs (unordered pairs for
/// undirected shapes) by merging the newer attributes into the existing
/// edge. Multi shapes keep every parallel edge.
#[derive(Debug, Clone)]
pub struct AttrGraph {
    shape: GraphShape,
    nodes: IndexMap<NodeKey, AttrMap>,
    edges: Vec<GraphEdge>,
    /// canonical endpoint pair -> index into `edges`; only kept for
    /// non-multi shapes
    edge_lookup: FxHashMap<(NodeKey, NodeKey), usize>,
}

impl AttrGraph {
    pub fn new(shape: GraphShape) -> AttrGraph {
        AttrGraph {
            shape,
            nodes: IndexMap::new(),
            edges: Vec::new(),
            edge_lookup: FxHashMap::default(),
        }
    }

    pub fn shape(&self) -> GraphShape {
        self.shape
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a node, merging `attrs` into any existing attribute map.
    pub fn add_node(&mut self, key: NodeKey, attrs: AttrMap) {
        match self.nodes.get_mut(&key) {
            Some(existing) => existing.extend(attrs),
            None => {
                self.nodes.insert(key, attrs);
            }
        }
    }

    fn canonical_pair(&self, source: &NodeKey, target: &NodeKey) -> (NodeKey, NodeKey) {
        if !self.shape.is_directed() && target < source {
            (target.clone(), source.clone())
        } else {
            (source.clone(), target.clone())
        }
    }

    /// Add an edge. Unknown endpoints are added as attribute-less nodes.
    ///
    /// For non-multi shapes a duplicate endpoint pair updates the existing
    /// edge's attributes instead of adding a parallel edge.
    pub fn add_edge(&mut self, source: NodeKey, target: NodeKey, attrs: AttrMap) {
        if !self.nodes.contains_key(&source) {
            self.nodes.insert(source.clone(), AttrMap::new());
        }
        if !self.nodes.contains_key(&target) {
            self.nodes.insert(target.clone(), AttrMap::new());
        }
        if self.shape.is_multi() {
            self.edges.push(GraphEdge { source, target, attrs });
            return;
        }
        let pair = self.canonical_pair(&source, &target);
        match self.edge_lookup.get(&pair) {
            Some(&idx) => self.edges[idx].attrs.extend(attrs),
            None => {
                self.edge_lookup.insert(pair, self.edges.len());
                self.edges.push(GraphEdge { source, target, attrs });
            }
        }
    }

    /// Node keys in insertion order.
    pub fn node_keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.keys()
    }

    /// `(key, attrs)` pairs in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeKey, &AttrMap)> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Dense index of a node (position in insertion order).
    pub fn node_index(&self, key: &NodeKey) -> Option<usize> {
        self.nodes.get_index_of(key)
    }

    /// Node key at dense index `idx`.
    pub fn node_at(&self, idx: usize) -> Option<&NodeKey> {
        self.nodes.get_index(idx).map(|(k, _)| k)
    }

    /// Set one attribute on the node at dense index `idx`.
    pub fn set_node_attr_at(&mut self, idx: usize, name: &str, value: AttrValue) {
        if let Some((_, attrs)) = self.nodes.get_index_mut(idx) {
            attrs.insert(name.to_string(), value);
        }
    }

    /// Drop every edge whose endpoints coincide.
    pub fn remove_self_loops(&mut self) {
        self.edges.retain(|e| e.source != e.target);
        self.rebuild_lookup();
    }

    fn rebuild_lookup(&mut self) {
        self.edge_lookup.clear();
        if self.shape.is_multi() {
            return;
        }
        for idx in 0..self.edges.len() {
            let pair = self.canonical_pair(&self.edges[idx].source, &self.edges[idx].target);
            self.edge_lookup.insert(pair, idx);
        }
    }

    /// Project to a dense [`GraphView`] for algorithm execution.
    ///
    /// When `weight_attr` is given, each edge contributes that attribute's
    /// numeric value (1.0 when absent or non-numeric).
    pub fn to_view(&self, weight_attr: Option<&str>) -> GraphView {
        let mut view = GraphView::with_nodes(
            self.node_count(),
            self.shape.is_directed(),
            weight_attr.is_some(),
        );
        for edge in &self.edges {
            let u = self.node_index(&edge.source).expect("edge endpoint is a node");
            let v = self.node_index(&edge.target).expect("edge endpoint is a node");
            let w = weight_attr.map(|name| {
                edge.attrs.get(name).and_then(AttrValue::as_f64).unwrap_or(1.0)
            });
            view.add_edge(u, v, w);
        }
        view
    }
}
