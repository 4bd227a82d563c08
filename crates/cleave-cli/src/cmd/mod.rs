//! Subcommand handlers. Each module owns its clap `Args` struct and a
//! `run_*` entry point taking the resolved config and output mode.

pub mod betweenness;
pub mod partition;
pub mod predict;
pub mod stats;
pub mod sweep;

use std::path::Path;

use cleave_core::SocialGraph;
use cleave_core::graph::read_edge_list;
use tracing::debug;

/// Read the edge list and keep only nodes of degree `min_degree` or more.
pub(crate) fn load_graph(path: &Path, min_degree: usize) -> anyhow::Result<SocialGraph> {
    let graph = read_edge_list(path)?;
    if min_degree == 0 {
        return Ok(graph);
    }
    let filtered = graph.filter_min_degree(min_degree);
    debug!(
        min_degree,
        kept = filtered.node_count(),
        dropped = graph.node_count() - filtered.node_count(),
        "filtered by degree"
    );
    Ok(filtered)
}
