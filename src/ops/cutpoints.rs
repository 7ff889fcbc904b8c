//! Cut-point (articulation point) detection.

use super::rebuild;
use crate::error::NetworkGraphResult;
use crate::graph::NodeKey;
use crate::record::NetworkGraph;
use crate::table::AttrValue;
use netgraph_algorithms::articulation_points;
use rustc_hash::FxHashSet;
use tracing::info;

/// Node attribute holding the cut-point flag.
pub const CUT_POINT_ATTRIBUTE_NAME: &str = "Cut Point";

/// Result of the cut-point operation.
#[derive(Debug)]
pub struct CutPointsOutput {
    /// Input record with a `"Cut Point"` = `"Yes"`/`"No"` attribute on
    /// every node.
    pub network: NetworkGraph,
    /// Keys of the cut points, sorted.
    pub cut_points: Vec<NodeKey>,
}

/// Find the nodes whose removal disconnects their component.
///
/// Edge direction is ignored: articulation points are defined on the
/// underlying undirected graph.
pub fn find_cut_points(network: &NetworkGraph) -> NetworkGraphResult<CutPointsOutput> {
    let mut graph = network.to_graph()?;
    let cut_indices: FxHashSet<usize> = articulation_points(&graph.to_view(None))
        .into_iter()
        .collect();

    let mut cut_points: Vec<NodeKey> = Vec::with_capacity(cut_indices.len());
    for idx in 0..graph.node_count() {
        let is_cut = cut_indices.contains(&idx);
        if is_cut {
            if let Some(key) = graph.node_at(idx) {
                cut_points.push(key.clone());
            }
        }
        let flag = if is_cut { "Yes" } else { "No" };
        graph.set_node_attr_at(
            idx,
            CUT_POINT_ATTRIBUTE_NAME,
            AttrValue::Str(flag.to_string()),
        );
    }
    cut_points.sort();

    info!(
        nodes = graph.node_count(),
        cut_points = cut_points.len(),
        "computed cut points"
    );
    Ok(CutPointsOutput {
        network: rebuild(&graph, network)?,
        cut_points,
    })
}
