//! Community detection
//!
//! Clauset-Newman-Moore greedy modularity maximization.

use super::common::GraphView;
use super::{AlgoError, AlgoResult};
use std::collections::BTreeMap;

/// Greedy modularity-maximizing communities (Clauset-Newman-Moore).
///
/// Starts from singleton communities and repeatedly merges the pair with the
/// largest modularity gain. Merging continues while the gain is positive, or
/// while more than `best_n` communities remain (when `best_n` is given), and
/// never reduces the community count below `cutoff`.
///
/// Edge direction is ignored; edge weights contribute when present in the
/// view. Communities are returned largest-first; node indices inside each
/// community are sorted ascending.
pub fn greedy_modularity_communities(
    view: &GraphView,
    cutoff: usize,
    best_n: Option<usize>,
) -> AlgoResult<Vec<Vec<usize>>> {
    let n = view.node_count;
    if cutoff < 1 || cutoff > n.max(1) {
        return Err(AlgoError::InvalidParameter(format!(
            "cutoff must be between 1 and {}, got {}",
            n.max(1),
            cutoff
        )));
    }
    if let Some(b) = best_n {
        if b < cutoff || b > n.max(1) {
            return Err(AlgoError::InvalidParameter(format!(
                "best_n must be between cutoff ({}) and {}, got {}",
                cutoff,
                n.max(1),
                b
            )));
        }
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // Undirected weighted edge list (each edge once), self-loops included.
    let mut edges: Vec<(usize, usize, f64)> = Vec::new();
    for u in 0..n {
        for (i, &v) in view.outgoing[u].iter().enumerate() {
            let w = view.weight_at(u, i);
            if view.directed || u <= v {
                edges.push((u, v, w));
            }
        }
    }
    let two_m: f64 = edges.iter().map(|&(u, v, w)| if u == v { w } else { 2.0 * w }).sum();
    if two_m == 0.0 {
        // no edges: every node is its own community
        let mut communities: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        truncate_by_merging_smallest(&mut communities, best_n.unwrap_or(n).max(cutoff));
        return Ok(communities);
    }

    // community id per node, community membership, weighted degree fractions
    let mut comm_of: Vec<usize> = (0..n).collect();
    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut alive: Vec<bool> = vec![true; n];
    let mut a: Vec<f64> = vec![0.0; n]; // sum of degree fractions per community
    // e[(i, j)] with i < j: fraction of edge weight between communities
    let mut e: BTreeMap<(usize, usize), f64> = BTreeMap::new();

    for &(u, v, w) in &edges {
        let frac = w / two_m;
        if u == v {
            a[u] += frac;
        } else {
            a[u] += frac;
            a[v] += frac;
            let key = if u < v { (u, v) } else { (v, u) };
            *e.entry(key).or_insert(0.0) += frac;
        }
    }

    let mut count = n;

    while count > cutoff {
        // best merge among connected community pairs
        let mut best: Option<((usize, usize), f64)> = None;
        for (&(i, j), &eij) in &e {
            if !alive[i] || !alive[j] {
                continue;
            }
            let dq = 2.0 * (eij - a[i] * a[j]);
            match best {
                Some((_, best_dq)) if dq <= best_dq => {}
                _ => best = Some(((i, j), dq)),
            }
        }
        let Some(((i, j), dq)) = best else {
            break; // no connected pairs left
        };
        // a non-improving merge is only taken to satisfy best_n
        if dq <= 0.0 && best_n.map_or(true, |b| count <= b) {
            break;
        }

        // merge j into i
        let moved = std::mem::take(&mut members[j]);
        for &node in &moved {
            comm_of[node] = i;
        }
        members[i].extend(moved);
        alive[j] = false;
        a[i] += a[j];
        a[j] = 0.0;

        // fold j's inter-community weights into i's
        let j_entries: Vec<((usize, usize), f64)> = e
            .range((j, 0)..(j + 1, 0))
            .map(|(&k, &v)| (k, v))
            .chain(
                e.iter()
                    .filter(|(&(x, y), _)| y == j && x != j)
                    .map(|(&k, &v)| (k, v)),
            )
            .collect();
        for ((x, y), w) in j_entries {
            e.remove(&(x, y));
            let other = if x == j { y } else { x };
            if other == i {
                continue; // now internal weight
            }
            let key = if i < other { (i, other) } else { (other, i) };
            *e.entry(key).or_insert(0.0) += w;
        }

        count -= 1;
    }

    let mut communities: Vec<Vec<usize>> = members
        .into_iter()
        .zip(alive)
        .filter(|(m, alive)| *alive && !m.is_empty())
        .map(|(mut m, _)| {
            m.sort_unstable();
            m
        })
        .collect();
    communities.sort_by(|x, y| y.len().cmp(&x.len()).then_with(|| x[0].cmp(&y[0])));
    Ok(communities)
}

/// Merge the smallest communities together until at most `target` remain.
/// Only used for edgeless graphs where modularity gives no guidance.
fn truncate_by_merging_smallest(communities: &mut Vec<Vec<usize>>, target: usize) {
    while communities.len() > target.max(1) {
        let last = communities.pop().unwrap();
        let dest = communities.len() - 1;
        communities[dest].extend(last);
        communities[dest].sort_unstable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cliques_with_bridge() -> GraphView {
        // clique {0,1,2}, clique {3,4,5}, bridge 2-3
        let mut view = GraphView::with_nodes(6, false, false);
        for &(u, v) in &[(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5), (2, 3)] {
            view.add_edge(u, v, None);
        }
        view
    }

    #[test]
    fn test_two_cliques_split_into_two_communities() {
        let view = two_cliques_with_bridge();
        let communities = greedy_modularity_communities(&view, 1, None).unwrap();
        assert_eq!(communities.len(), 2);
        let mut sides: Vec<Vec<usize>> = communities;
        sides.sort_by_key(|c| c[0]);
        assert_eq!(sides[0], vec![0, 1, 2]);
        assert_eq!(sides[1], vec![3, 4, 5]);
    }

    #[test]
    fn test_best_n_forces_merges() {
        let view = two_cliques_with_bridge();
        let communities = greedy_modularity_communities(&view, 1, Some(1)).unwrap();
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0], vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_cutoff_stops_merging() {
        let view = two_cliques_with_bridge();
        let communities = greedy_modularity_communities(&view, 4, Some(4)).unwrap();
        assert_eq!(communities.len(), 4);
    }

    #[test]
    fn test_every_node_assigned_exactly_once() {
        let view = two_cliques_with_bridge();
        let communities = greedy_modularity_communities(&view, 1, None).unwrap();
        let mut all: Vec<usize> = communities.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_invalid_cutoff_rejected() {
        let view = two_cliques_with_bridge();
        assert!(greedy_modularity_communities(&view, 0, None).is_err());
        assert!(greedy_modularity_communities(&view, 7, None).is_err());
        assert!(greedy_modularity_communities(&view, 2, Some(1)).is_err());
    }

    #[test]
    fn test_edgeless_graph_singletons() {
        let view = GraphView::with_nodes(3, false, false);
        let communities = greedy_modularity_communities(&view, 1, None).unwrap();
        assert_eq!(communities.len(), 3);
    }
}
