//! Centrality measures
//!
//! Degree, betweenness (Brandes), eigenvector (power iteration) and
//! closeness centrality over a [`GraphView`].
//!
//! All outputs are indexed by node index `0..node_count` of the input view.
//! Self-loop handling is the caller's concern; the operation layer strips
//! self-loops before building a view.

use super::common::GraphView;
use super::{AlgoError, AlgoResult};
use ndarray::Array1;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Degree of every node: number of incident edge endpoints.
pub fn degree(view: &GraphView) -> Vec<f64> {
    (0..view.node_count).map(|i| view.degree(i) as f64).collect()
}

/// Weighted degree: sum of incident edge weights.
///
/// For directed views both incoming and outgoing edges contribute; incoming
/// weights are looked up through the source's outgoing list.
pub fn weighted_degree(view: &GraphView) -> Vec<f64> {
    let mut result = vec![0.0; view.node_count];
    for u in 0..view.node_count {
        for (i, &v) in view.outgoing[u].iter().enumerate() {
            let w = view.weight_at(u, i);
            result[u] += w;
            if view.directed {
                result[v] += w;
            }
        }
    }
    result
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node_idx: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap
        other.cost.partial_cmp(&self.cost).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest-path pass of Brandes' algorithm.
///
/// Returns (visit stack, predecessor lists, path counts).
fn brandes_sssp(
    view: &GraphView,
    source: usize,
    weighted: bool,
) -> (Vec<usize>, Vec<Vec<usize>>, Vec<f64>) {
    let n = view.node_count;
    let mut stack = Vec::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    sigma[source] = 1.0;

    if !weighted {
        let mut dist = vec![-1i64; n];
        dist[source] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            stack.push(u);
            for &v in &view.outgoing[u] {
                if dist[v] < 0 {
                    dist[v] = dist[u] + 1;
                    queue.push_back(v);
                }
                if dist[v] == dist[u] + 1 {
                    sigma[v] += sigma[u];
                    preds[v].push(u);
                }
            }
        }
    } else {
        let mut dist = vec![f64::INFINITY; n];
        let mut seen = vec![false; n];
        dist[source] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 0.0, node_idx: source });
        while let Some(State { cost, node_idx: u }) = heap.pop() {
            if seen[u] {
                continue;
            }
            seen[u] = true;
            stack.push(u);
            for (i, &v) in view.outgoing[u].iter().enumerate() {
                let w = view.weight_at(u, i);
                if w < 0.0 {
                    continue;
                }
                let next = cost + w;
                if next < dist[v] {
                    dist[v] = next;
                    sigma[v] = sigma[u];
                    preds[v] = vec![u];
                    heap.push(State { cost: next, node_idx: v });
                } else if (next - dist[v]).abs() < 1e-12 && !seen[v] {
                    sigma[v] += sigma[u];
                    preds[v].push(u);
                }
            }
        }
    }

    (stack, preds, sigma)
}

/// Betweenness centrality (Brandes 2001): the fraction of all-pairs shortest
/// paths passing through each node, normalized by `(n-1)(n-2)`.
///
/// When `weighted` is set, edge weights are interpreted as path costs.
/// Sources are processed in parallel and partial dependencies summed.
pub fn betweenness_centrality(view: &GraphView, weighted: bool) -> Vec<f64> {
    let n = view.node_count;
    if n == 0 {
        return Vec::new();
    }

    let mut centrality: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|source| {
            let (stack, preds, sigma) = brandes_sssp(view, source, weighted);
            let mut delta = vec![0.0; n];
            let mut partial = vec![0.0; n];
            for &w in stack.iter().rev() {
                for &v in &preds[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != source {
                    partial[w] = delta[w];
                }
            }
            partial
        })
        .reduce(
            || vec![0.0; n],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        );

    // For undirected views every pair is visited from both endpoints; the
    // doubled accumulation cancels against the doubled pair count, so the
    // same scale applies to both directed and undirected graphs.
    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        for c in centrality.iter_mut() {
            *c *= scale;
        }
    } else {
        for c in centrality.iter_mut() {
            *c = 0.0;
        }
    }
    centrality
}

/// Eigenvector centrality via power iteration.
///
/// A node's score is proportional to the sum of its (in-)neighbors' scores.
/// Iterates until the L1 change drops below `node_count * tol`, failing with
/// [`AlgoError::NoConvergence`] once `max_iter` is exhausted.
pub fn eigenvector_centrality(
    view: &GraphView,
    max_iter: usize,
    tol: f64,
    weighted: bool,
) -> AlgoResult<Vec<f64>> {
    let n = view.node_count;
    if n == 0 {
        return Ok(Vec::new());
    }
    if max_iter == 0 {
        return Err(AlgoError::InvalidParameter(
            "max_iter must be at least 1".to_string(),
        ));
    }

    let mut x: Array1<f64> = Array1::from_elem(n, 1.0 / n as f64);
    for _ in 0..max_iter {
        let last = x.clone();
        // x[v] += last[u] * w for every edge u -> v
        for u in 0..n {
            for (i, &v) in view.outgoing[u].iter().enumerate() {
                let w = if weighted { view.weight_at(u, i) } else { 1.0 };
                x[v] += last[u] * w;
            }
        }
        let norm = x.dot(&x).sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        x.mapv_inplace(|v| v / norm);
        let change = (&x - &last).mapv(f64::abs).sum();
        if change < n as f64 * tol {
            return Ok(x.to_vec());
        }
    }
    Err(AlgoError::NoConvergence { iterations: max_iter })
}

/// Distances from every node *to* `target`-style orientation: for directed
/// views closeness uses incoming paths, so we traverse the incoming lists.
fn distances_to(view: &GraphView, node: usize, weighted: bool) -> Vec<f64> {
    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n];
    dist[node] = 0.0;

    // Incoming weight lookup: weight of edge u -> v equals the aligned entry
    // in u's outgoing list; build the reverse lists lazily per call.
    if !weighted {
        let mut queue = VecDeque::new();
        queue.push_back(node);
        while let Some(v) = queue.pop_front() {
            for &u in &view.incoming[v] {
                if dist[u].is_infinite() {
                    dist[u] = dist[v] + 1.0;
                    queue.push_back(u);
                }
            }
        }
    } else {
        let mut heap = BinaryHeap::new();
        heap.push(State { cost: 0.0, node_idx: node });
        let mut seen = vec![false; n];
        while let Some(State { cost, node_idx: v }) = heap.pop() {
            if seen[v] {
                continue;
            }
            seen[v] = true;
            for &u in &view.incoming[v] {
                // find weight of u -> v
                let mut w = f64::INFINITY;
                for (i, &t) in view.outgoing[u].iter().enumerate() {
                    if t == v {
                        w = w.min(view.weight_at(u, i));
                    }
                }
                if w.is_infinite() || w < 0.0 {
                    continue;
                }
                let next = cost + w;
                if next < dist[u] {
                    dist[u] = next;
                    heap.push(State { cost: next, node_idx: u });
                }
            }
        }
    }
    dist
}

/// Closeness centrality: reciprocal of the average shortest-path distance
/// from all reachable nodes, scaled by the reachable fraction of the graph
/// (Wasserman-Faust), so nodes in small components do not get inflated
/// scores.
pub fn closeness_centrality(view: &GraphView, weighted: bool) -> Vec<f64> {
    let n = view.node_count;
    (0..n)
        .map(|u| {
            let dist = distances_to(view, u, weighted);
            let mut total = 0.0;
            let mut reachable = 0usize;
            for &d in &dist {
                if d.is_finite() {
                    total += d;
                    reachable += 1;
                }
            }
            // reachable includes u itself at distance 0
            if total > 0.0 && n > 1 {
                let r = (reachable - 1) as f64;
                (r / total) * (r / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}
