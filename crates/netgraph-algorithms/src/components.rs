//! Connectivity structure
//!
//! Articulation points (cut vertices) of the underlying undirected graph.

use super::common::GraphView;

/// Articulation points: nodes whose removal increases the number of
/// connected components.
///
/// Edge direction is ignored; the computation runs over the underlying
/// undirected adjacency. Parallel edges are handled: a second edge to the
/// DFS parent acts as a back edge, so multi-edges never produce spurious
/// cut vertices. The DFS is iterative so deep graphs cannot overflow the
/// call stack.
///
/// Returns node indices in ascending order.
pub fn articulation_points(view: &GraphView) -> Vec<usize> {
    let n = view.node_count;
    let adj = view.undirected_adjacency();

    let mut disc = vec![usize::MAX; n];
    let mut low = vec![usize::MAX; n];
    let mut is_cut = vec![false; n];
    let mut timer = 0usize;

    // Explicit DFS frame: (node, parent, next neighbor position,
    // whether the parent edge has been skipped once already)
    struct Frame {
        node: usize,
        parent: Option<usize>,
        next: usize,
        parent_skipped: bool,
        children: usize,
    }

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        let mut stack = vec![Frame {
            node: root,
            parent: None,
            next: 0,
            parent_skipped: false,
            children: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.node;
            if frame.next < adj[u].len() {
                let v = adj[u][frame.next];
                frame.next += 1;
                if v == u {
                    continue; // self-loop
                }
                if Some(v) == frame.parent && !frame.parent_skipped {
                    // first occurrence of the tree edge; further parallel
                    // edges to the parent count as back edges
                    frame.parent_skipped = true;
                    continue;
                }
                if disc[v] != usize::MAX {
                    low[u] = low[u].min(disc[v]);
                } else {
                    frame.children += 1;
                    disc[v] = timer;
                    low[v] = timer;
                    timer += 1;
                    stack.push(Frame {
                        node: v,
                        parent: Some(u),
                        next: 0,
                        parent_skipped: false,
                        children: 0,
                    });
                }
            } else {
                let children = frame.children;
                let parent = frame.parent;
                stack.pop();
                if let Some(p) = parent {
                    let low_u = low[u];
                    low[p] = low[p].min(low_u);
                    // non-root parent is a cut vertex when this subtree
                    // cannot reach above it; the root uses the child-count
                    // rule instead (applied when the root itself pops)
                    if p != root && low_u >= disc[p] {
                        is_cut[p] = true;
                    }
                } else if children > 1 {
                    is_cut[u] = true;
                }
            }
        }
    }

    (0..n).filter(|&i| is_cut[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_graph_midpoint_is_cut() {
        // 0 - 1 - 2
        let mut view = GraphView::with_nodes(3, false, false);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        assert_eq!(articulation_points(&view), vec![1]);
    }

    #[test]
    fn test_triangle_has_no_cut_points() {
        let mut view = GraphView::with_nodes(3, false, false);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        view.add_edge(2, 0, None);
        assert!(articulation_points(&view).is_empty());
    }

    #[test]
    fn test_two_triangles_joined_at_a_node() {
        // 0-1-2-0 and 2-3-4-2: node 2 is the articulation point
        let mut view = GraphView::with_nodes(5, false, false);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        view.add_edge(2, 0, None);
        view.add_edge(2, 3, None);
        view.add_edge(3, 4, None);
        view.add_edge(4, 2, None);
        assert_eq!(articulation_points(&view), vec![2]);
    }

    #[test]
    fn test_parallel_edges_are_not_bridges() {
        // 0 = 1 - 2: doubled edge between 0 and 1, node 1 still cuts off 2
        let mut view = GraphView::with_nodes(3, false, false);
        view.add_edge(0, 1, None);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        assert_eq!(articulation_points(&view), vec![1]);
    }

    #[test]
    fn test_directed_edges_treated_as_undirected() {
        let mut view = GraphView::with_nodes(3, true, false);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        assert_eq!(articulation_points(&view), vec![1]);
    }

    #[test]
    fn test_disconnected_components() {
        // 0-1-2 and isolated 3
        let mut view = GraphView::with_nodes(4, false, false);
        view.add_edge(0, 1, None);
        view.add_edge(1, 2, None);
        assert_eq!(articulation_points(&view), vec![1]);
    }
}
