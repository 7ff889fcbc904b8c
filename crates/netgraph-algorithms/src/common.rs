//! Shared graph view for algorithm execution
//!
//! Provides a read-only, dense integer-indexed view of a graph topology.
//! Callers map their node identifiers to indices `0..node_count` before
//! building a view and map results back afterwards.

/// A dense, integer-indexed adjacency view of a graph.
///
/// For undirected graphs every edge appears in the `outgoing` lists of both
/// endpoints (and `incoming` mirrors `outgoing`). Parallel edges appear as
/// repeated entries. Weights, when present, are aligned entry-for-entry with
/// `outgoing`.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Outgoing neighbors per node index
    pub outgoing: Vec<Vec<usize>>,
    /// Incoming neighbors per node index
    pub incoming: Vec<Vec<usize>>,
    /// Edge weights aligned with `outgoing`
    pub weights: Option<Vec<Vec<f64>>>,
    /// Whether edge direction is meaningful
    pub directed: bool,
}

impl GraphView {
    /// Create an empty view with `node_count` isolated nodes.
    pub fn with_nodes(node_count: usize, directed: bool, weighted: bool) -> Self {
        GraphView {
            node_count,
            outgoing: vec![Vec::new(); node_count],
            incoming: vec![Vec::new(); node_count],
            weights: if weighted {
                Some(vec![Vec::new(); node_count])
            } else {
                None
            },
            directed,
        }
    }

    /// Add one edge. For undirected views the edge is mirrored.
    pub fn add_edge(&mut self, source: usize, target: usize, weight: Option<f64>) {
        self.outgoing[source].push(target);
        self.incoming[target].push(source);
        if let Some(w) = self.weights.as_mut() {
            w[source].push(weight.unwrap_or(1.0));
        }
        if !self.directed && source != target {
            self.outgoing[target].push(source);
            self.incoming[source].push(target);
            if let Some(w) = self.weights.as_mut() {
                w[target].push(weight.unwrap_or(1.0));
            }
        }
    }

    /// Number of incident edge endpoints at `idx` (out-degree for directed).
    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    /// In-degree of `idx`.
    pub fn in_degree(&self, idx: usize) -> usize {
        self.incoming[idx].len()
    }

    /// Degree used for centrality: out + in for directed views, neighbor
    /// list length for undirected views (edges are already mirrored).
    pub fn degree(&self, idx: usize) -> usize {
        if self.directed {
            self.out_degree(idx) + self.in_degree(idx)
        } else {
            self.out_degree(idx)
        }
    }

    /// Weight of the `i`-th outgoing entry of `idx` (1.0 when unweighted).
    pub fn weight_at(&self, idx: usize, i: usize) -> f64 {
        self.weights.as_ref().map(|w| w[idx][i]).unwrap_or(1.0)
    }

    /// Adjacency with direction ignored: union of out- and in-neighbors.
    /// Undirected views return their (already mirrored) outgoing lists.
    pub fn undirected_adjacency(&self) -> Vec<Vec<usize>> {
        if !self.directed {
            return self.outgoing.clone();
        }
        let mut adj = self.outgoing.clone();
        for source in 0..self.node_count {
            for i in 0..self.outgoing[source].len() {
                let target = self.outgoing[source][i];
                if target != source {
                    adj[target].push(source);
                }
            }
        }
        adj
    }

    /// Total edge count (parallel edges counted, mirrored entries not).
    pub fn edge_count(&self) -> usize {
        let total: usize = self.outgoing.iter().map(Vec::len).sum();
        if self.directed {
            total
        } else {
            // self-loops appear once, other edges twice
            let loops: usize = (0..self.node_count)
                .map(|u| self.outgoing[u].iter().filter(|&&v| v == u).count())
                .sum();
            (total - loops) / 2 + loops
        }
    }
}
