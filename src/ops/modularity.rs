//! Greedy modularity community detection.

use super::{rebuild, resolve_weight_column};
use crate::error::{NetworkGraphResult, ProcessingError};
use crate::record::NetworkGraph;
use crate::table::AttrValue;
use netgraph_algorithms::greedy_modularity_communities;
use tracing::info;

/// Node attribute holding the community index.
pub const MODULARITY_GROUP_ATTRIBUTE_NAME: &str = "modularity_group";

/// Result of the modularity operation.
#[derive(Debug)]
pub struct ModularityOutput {
    /// Input record with a `"modularity_group"` index on every node.
    /// Groups are numbered largest community first, starting at 0.
    pub network: NetworkGraph,
    /// Number of communities in the returned partition.
    pub number_of_communities: usize,
    /// Community count of the unconstrained maximum-modularity partition.
    pub maximum_modularity_communities: usize,
}

/// Partition the nodes into modularity-maximizing communities
/// (Clauset-Newman-Moore) and record each node's group index.
///
/// `number_of_communities` pins the partition to exactly that many
/// communities; it must lie in `[1, number_of_nodes]`. Edge weights
/// contribute when a weight source resolves; direction is ignored.
pub fn modularity_groups(
    network: &NetworkGraph,
    number_of_communities: Option<usize>,
    weight_column: Option<&str>,
) -> NetworkGraphResult<ModularityOutput> {
    let weight = resolve_weight_column(network, weight_column)?;
    let mut graph = network.to_graph()?;
    let n = graph.node_count();
    if let Some(count) = number_of_communities {
        if count < 1 || count > n {
            return Err(ProcessingError::new(format!(
                "number of communities must be between 1 and {}, got {}",
                n, count
            ))
            .into());
        }
    }

    let view = graph.to_view(weight.as_deref());
    let unconstrained = greedy_modularity_communities(&view, 1, None)?;
    let maximum = unconstrained.len();
    let communities = match number_of_communities {
        Some(count) => greedy_modularity_communities(&view, count, Some(count))?,
        None => unconstrained,
    };

    for (group, members) in communities.iter().enumerate() {
        for &idx in members {
            graph.set_node_attr_at(
                idx,
                MODULARITY_GROUP_ATTRIBUTE_NAME,
                AttrValue::Int(group as i64),
            );
        }
    }

    info!(
        nodes = n,
        communities = communities.len(),
        maximum_modularity_communities = maximum,
        "computed modularity groups"
    );
    Ok(ModularityOutput {
        network: rebuild(&graph, network)?,
        number_of_communities: communities.len(),
        maximum_modularity_communities: maximum,
    })
}
