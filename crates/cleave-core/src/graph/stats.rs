//! Basic graph statistics.
//!
//! # Statistics Provided
//!
//! - **node_count**: Total number of nodes.
//! - **edge_count**: Total number of undirected edges.
//! - **density**: Ratio of actual edges to maximum possible edges for an
//!   undirected simple graph: `density = 2 * edge_count / (n * (n - 1))`.
//!   A complete graph has density 1.0. An empty or single-node graph has
//!   density 0.0.
//! - **component_count**: Number of connected components.
//! - **isolated_node_count**: Nodes with degree zero.
//! - **max_degree**: Highest degree in the graph.
//! - **content_hash**: BLAKE3 hash of the edge set.

use serde::Serialize;

use crate::graph::store::SocialGraph;

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a [`SocialGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Undirected density, zero for graphs with 0 or 1 node.
    pub density: f64,
    /// Number of connected components.
    pub component_count: usize,
    /// Number of nodes with no incident edges.
    pub isolated_node_count: usize,
    /// Maximum degree over all nodes (0 for an empty graph).
    pub max_degree: usize,
    /// `blake3:<hex>` hash of the sorted edge list.
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &SocialGraph) -> Self {
        let g = graph.as_petgraph();
        let node_count = g.node_count();
        let edge_count = g.edge_count();

        let degrees: Vec<usize> = g
            .node_indices()
            .map(|idx| g.neighbors(idx).count())
            .collect();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            component_count: graph.component_count(),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            content_hash: graph.content_hash(),
        }
    }

    /// Return `true` if the graph has no edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
