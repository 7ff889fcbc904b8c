//! Analysis operations over network graph records.
//!
//! Every operation is a stateless function that projects the record to an
//! in-memory graph, delegates the topology work to `netgraph-algorithms`,
//! attaches the results as node attributes, and rebuilds a record with the
//! input's column bindings preserved.

pub mod centrality;
pub mod cutpoints;
pub mod modularity;
pub mod weights;

pub use centrality::{
    betweenness_ranking, closeness_ranking, degree_ranking, eigenvector_ranking,
    CentralityOutput,
};
pub use cutpoints::{find_cut_points, CutPointsOutput};
pub use modularity::{modularity_groups, ModularityOutput};
pub use weights::{assign_weights, MergeStrategy};

use crate::defaults::WEIGHT_ATTRIBUTE_NAME;
use crate::error::{NetworkGraphResult, ProcessingError};
use crate::graph::AttrGraph;
use crate::record::NetworkGraph;
use crate::table::{AttrValue, Column, Table};

/// Resolve the edge weight source for an operation.
///
/// An explicitly named column must exist in the edges table; without one,
/// a column named `weight` is picked up automatically when present.
pub(crate) fn resolve_weight_column(
    network: &NetworkGraph,
    requested: Option<&str>,
) -> NetworkGraphResult<Option<String>> {
    match requested {
        Some(name) => {
            if !network.edges().has_column(name) {
                return Err(ProcessingError::new(format!(
                    "edges table has no '{}' column to use as weight",
                    name
                ))
                .into());
            }
            Ok(Some(name.to_string()))
        }
        None => {
            if network.edges().has_column(WEIGHT_ATTRIBUTE_NAME) {
                Ok(Some(WEIGHT_ATTRIBUTE_NAME.to_string()))
            } else {
                Ok(None)
            }
        }
    }
}

/// Attach one score per node, aligned with the graph's dense node order.
pub(crate) fn annotate_scores(graph: &mut AttrGraph, name: &str, scores: &[f64]) {
    for (idx, score) in scores.iter().enumerate() {
        graph.set_node_attr_at(idx, name, AttrValue::Float(*score));
    }
}

/// Ranked score table with columns `Rank`, `Node`, `Score`.
///
/// Rows are ordered by descending score (ties broken by node order) and
/// ranked with standard competition ranking: equal scores share a rank and
/// the following rank skips accordingly.
pub(crate) fn rank_table(graph: &AttrGraph, attr: &str) -> NetworkGraphResult<Table> {
    let mut scored: Vec<(&crate::graph::NodeKey, f64)> = graph
        .nodes()
        .map(|(key, attrs)| {
            let score = attrs.get(attr).and_then(AttrValue::as_f64).unwrap_or(0.0);
            (key, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks: Vec<Option<i64>> = Vec::with_capacity(scored.len());
    let mut nodes: Vec<Option<String>> = Vec::with_capacity(scored.len());
    let mut scores: Vec<Option<f64>> = Vec::with_capacity(scored.len());
    let mut last_score = f64::NAN;
    let mut last_rank = 0i64;
    for (pos, (key, score)) in scored.iter().enumerate() {
        let rank = if *score == last_score {
            last_rank
        } else {
            pos as i64 + 1
        };
        last_score = *score;
        last_rank = rank;
        ranks.push(Some(rank));
        nodes.push(Some(key.to_string()));
        scores.push(Some(*score));
    }

    Ok(Table::new([
        ("Rank".to_string(), Column::Int(ranks)),
        ("Node".to_string(), Column::Str(nodes)),
        ("Score".to_string(), Column::Float(scores)),
    ])?)
}

/// Rebuild a record from an annotated graph, keeping the input's bindings.
pub(crate) fn rebuild(
    graph: &AttrGraph,
    source: &NetworkGraph,
) -> NetworkGraphResult<NetworkGraph> {
    NetworkGraph::from_graph_with_bindings(graph, source.bindings())
}
