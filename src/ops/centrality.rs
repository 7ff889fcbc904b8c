//! Centrality operations.
//!
//! Each operation scores every node, attaches the scores as node
//! attributes, and returns the annotated record together with a ranked
//! score table. Self-loops never contribute to centrality and are stripped
//! before scoring; the weighted variant of a measure runs in addition to
//! the unweighted one whenever a weight source resolves.

use super::{annotate_scores, rank_table, rebuild, resolve_weight_column};
use crate::error::NetworkGraphResult;
use crate::record::NetworkGraph;
use crate::table::Table;
use netgraph_algorithms as algo;
use tracing::info;

/// Default power-iteration budget for eigenvector centrality.
pub const DEFAULT_EIGENVECTOR_ITERATIONS: usize = 1_000;
/// Iteration ceiling for the weighted eigenvector run, which converges
/// slower on skewed weight distributions.
pub const WEIGHTED_EIGENVECTOR_ITERATIONS: usize = 100_000;

const EIGENVECTOR_TOLERANCE: f64 = 1e-6;

/// Result of a centrality operation.
#[derive(Debug)]
pub struct CentralityOutput {
    /// The input record with score attributes attached to every node.
    pub network: NetworkGraph,
    /// Ranked table (`Rank`, `Node`, `Score`) over the primary score: the
    /// weighted one when a weight source resolved, otherwise the
    /// unweighted one.
    pub ranking: Table,
}

fn centrality_op(
    network: &NetworkGraph,
    weight_column: Option<&str>,
    attr: &str,
    weighted_attr: &str,
    score: impl Fn(&algo::GraphView, bool) -> NetworkGraphResult<Vec<f64>>,
) -> NetworkGraphResult<CentralityOutput> {
    let weight = resolve_weight_column(network, weight_column)?;
    let mut graph = network.to_graph()?;
    graph.remove_self_loops();

    let scores = score(&graph.to_view(None), false)?;
    annotate_scores(&mut graph, attr, &scores);

    let mut primary = attr;
    if let Some(weight) = &weight {
        let scores = score(&graph.to_view(Some(weight)), true)?;
        annotate_scores(&mut graph, weighted_attr, &scores);
        primary = weighted_attr;
    }

    info!(
        measure = attr,
        weighted = weight.is_some(),
        nodes = graph.node_count(),
        "computed centrality"
    );
    Ok(CentralityOutput {
        ranking: rank_table(&graph, primary)?,
        network: rebuild(&graph, network)?,
    })
}

/// Degree centrality: `"Degree Score"`, plus `"Weighted Degree Score"`
/// (degree with each incident edge contributing its weight) when a weight
/// source resolves.
pub fn degree_ranking(
    network: &NetworkGraph,
    weight_column: Option<&str>,
) -> NetworkGraphResult<CentralityOutput> {
    centrality_op(
        network,
        weight_column,
        "Degree Score",
        "Weighted Degree Score",
        |view, weighted| {
            Ok(if weighted {
                algo::weighted_degree(view)
            } else {
                algo::degree(view)
            })
        },
    )
}

/// Betweenness centrality (Brandes): `"Betweenness Score"`, plus
/// `"Weighted Betweenness Score"` over shortest weighted paths.
pub fn betweenness_ranking(
    network: &NetworkGraph,
    weight_column: Option<&str>,
) -> NetworkGraphResult<CentralityOutput> {
    centrality_op(
        network,
        weight_column,
        "Betweenness Score",
        "Weighted Betweenness Score",
        |view, weighted| Ok(algo::betweenness_centrality(view, weighted)),
    )
}

/// Eigenvector centrality: `"Eigenvector Score"`, plus
/// `"Weighted Eigenvector Score"` when a weight source resolves.
///
/// `iterations` bounds the unweighted power iteration (default 1000); the
/// weighted run always gets the larger fixed ceiling. Non-convergence
/// surfaces as an error.
pub fn eigenvector_ranking(
    network: &NetworkGraph,
    weight_column: Option<&str>,
    iterations: Option<usize>,
) -> NetworkGraphResult<CentralityOutput> {
    let max_iter = iterations.unwrap_or(DEFAULT_EIGENVECTOR_ITERATIONS);
    centrality_op(
        network,
        weight_column,
        "Eigenvector Score",
        "Weighted Eigenvector Score",
        move |view, weighted| {
            let budget = if weighted {
                WEIGHTED_EIGENVECTOR_ITERATIONS
            } else {
                max_iter
            };
            Ok(algo::eigenvector_centrality(
                view,
                budget,
                EIGENVECTOR_TOLERANCE,
                weighted,
            )?)
        },
    )
}

/// Closeness centrality: `"Closeness Score"`, plus
/// `"Weighted Closeness Score"` over shortest weighted paths.
pub fn closeness_ranking(
    network: &NetworkGraph,
    weight_column: Option<&str>,
) -> NetworkGraphResult<CentralityOutput> {
    centrality_op(
        network,
        weight_column,
        "Closeness Score",
        "Weighted Closeness Score",
        |view, weighted| Ok(algo::closeness_centrality(view, weighted)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphShape;
    use crate::table::{AttrValue, Column};

    fn star_network() -> NetworkGraph {
        // hub "a" connected to b, c, d
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![
                    Some("a".into()),
                    Some("a".into()),
                    Some("a".into()),
                ]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![
                    Some("b".into()),
                    Some("c".into()),
                    Some("d".into()),
                ]),
            ),
        ])
        .unwrap();
        NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap()
    }

    fn score_of(network: &NetworkGraph, node: &str, attr: &str) -> f64 {
        let nodes = network.nodes();
        for row in 0..nodes.num_rows() {
            if nodes.cell(row, "node_id") == AttrValue::Str(node.to_string()) {
                return nodes.cell(row, attr).as_f64().unwrap();
            }
        }
        panic!("node {node} not found");
    }

    #[test]
    fn test_degree_ranking_scores_hub_highest() {
        let out = degree_ranking(&star_network(), None).unwrap();
        assert_eq!(score_of(&out.network, "a", "Degree Score"), 3.0);
        assert_eq!(score_of(&out.network, "b", "Degree Score"), 1.0);
        assert_eq!(out.ranking.cell(0, "Node"), AttrValue::Str("a".to_string()));
        assert_eq!(out.ranking.cell(0, "Rank"), AttrValue::Int(1));
        // b, c, d tie at rank 2
        assert_eq!(out.ranking.cell(1, "Rank"), AttrValue::Int(2));
        assert_eq!(out.ranking.cell(3, "Rank"), AttrValue::Int(2));
    }

    #[test]
    fn test_weighted_degree_uses_weight_column() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("a".into()), Some("a".into())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("b".into()), Some("c".into())]),
            ),
            (
                "weight".to_string(),
                Column::Float(vec![Some(2.0), Some(3.0)]),
            ),
        ])
        .unwrap();
        let network = NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap();
        let out = degree_ranking(&network, None).unwrap();
        assert_eq!(score_of(&out.network, "a", "Weighted Degree Score"), 5.0);
        // ranking follows the weighted score
        assert_eq!(out.ranking.cell(0, "Score"), AttrValue::Float(5.0));
    }

    #[test]
    fn test_betweenness_center_of_path() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("a".into()), Some("b".into())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("b".into()), Some("c".into())]),
            ),
        ])
        .unwrap();
        let network = NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap();
        let out = betweenness_ranking(&network, None).unwrap();
        assert_eq!(score_of(&out.network, "b", "Betweenness Score"), 1.0);
        assert_eq!(score_of(&out.network, "a", "Betweenness Score"), 0.0);
    }

    #[test]
    fn test_self_loops_do_not_contribute() {
        let edges = Table::new([
            (
                "source".to_string(),
                Column::Str(vec![Some("a".into()), Some("a".into())]),
            ),
            (
                "target".to_string(),
                Column::Str(vec![Some("a".into()), Some("b".into())]),
            ),
        ])
        .unwrap();
        let network = NetworkGraph::from_tables(GraphShape::Undirected, edges, None).unwrap();
        let out = degree_ranking(&network, None).unwrap();
        assert_eq!(score_of(&out.network, "a", "Degree Score"), 1.0);
    }

    #[test]
    fn test_eigenvector_converges_on_star() {
        let out = eigenvector_ranking(&star_network(), None, None).unwrap();
        let hub = score_of(&out.network, "a", "Eigenvector Score");
        let leaf = score_of(&out.network, "b", "Eigenvector Score");
        assert!(hub > leaf);
    }

    #[test]
    fn test_closeness_scores_hub_highest() {
        let out = closeness_ranking(&star_network(), None).unwrap();
        let hub = score_of(&out.network, "a", "Closeness Score");
        let leaf = score_of(&out.network, "b", "Closeness Score");
        assert!(hub > leaf);
        assert!((hub - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_weight_column_fails() {
        assert!(degree_ranking(&star_network(), Some("cost")).is_err());
    }
}
