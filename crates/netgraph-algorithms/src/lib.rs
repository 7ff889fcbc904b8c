//! Graph algorithms for the netgraph workspace.
//!
//! Pure topology computations over a dense, integer-indexed [`GraphView`]:
//! centrality measures (degree, betweenness, eigenvector, closeness),
//! articulation points and greedy modularity communities.
//!
//! Public invariants:
//! - Outputs are indexed by node index `0..node_count` of the input view.
//! - Deterministic: identical views and parameters produce identical results.

pub mod centrality;
pub mod common;
pub mod community;
pub mod components;

pub use centrality::{
    betweenness_centrality, closeness_centrality, degree, eigenvector_centrality,
    weighted_degree,
};
pub use common::GraphView;
pub use community::greedy_modularity_communities;
pub use components::articulation_points;

#[derive(Debug, thiserror::Error)]
pub enum AlgoError {
    #[error("power iteration failed to converge within {iterations} iterations")]
    NoConvergence { iterations: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type AlgoResult<T> = std::result::Result<T, AlgoError>;
