//! Divisive (Girvan–Newman style) community detection.
//!
//! # Overview
//!
//! The partitioner clones the input graph and removes edges from the clone
//! in descending order of approximate betweenness until the clone falls
//! apart into more than one connected component.
//!
//! # Known Approximation
//!
//! Textbook Girvan–Newman recomputes betweenness on the shrinking residual
//! graph after every removal. This partitioner always scores edges on the
//! **original** graph instead. Because the original never changes, that
//! score is computed once and walked in rank order; the removal sequence is
//! identical to recomputing it every round. On graphs that need many
//! removals before splitting, the resulting partition can differ from (and
//! be worse than) textbook Girvan–Newman.
//!
//! # Ordering
//!
//! Edges are ranked by descending score; ties go to the alphabetically
//! smaller edge (first endpoint, then second). Only edges that received
//! credit are candidates for removal, so with `max_depth = 0` nothing is
//! ever removed.
//!
//! The loop stops as soon as the clone has more than one component. A
//! single removal that splits it into three or more components is kept as
//! is.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, instrument};

use cleave_core::{EdgeKey, GraphError, SocialGraph};

use crate::community::cut::norm_cut;
use crate::metrics::betweenness::{
    EdgeBetweenness, approximate_betweenness, approximate_betweenness_parallel,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Configuration for a partition run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Depth bound passed to every BFS of the betweenness estimate.
    pub max_depth: usize,
    /// Use the rayon engine for the betweenness estimate.
    pub parallel: bool,
    /// Wall-clock budget, checked between edge removals.
    pub deadline: Option<Duration>,
}

impl PartitionConfig {
    /// Sequential, no deadline.
    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            parallel: false,
            deadline: None,
        }
    }
}

/// Outcome of a partition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Connected components of the residual graph, each sorted, ordered by
    /// smallest member.
    pub components: Vec<BTreeSet<String>>,
    /// Edges removed from the working copy, in removal order.
    pub removed_edges: Vec<EdgeKey>,
}

impl Partition {
    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// `true` for the partition of an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Consume the partition, keeping only the components.
    #[must_use]
    pub fn into_components(self) -> Vec<BTreeSet<String>> {
        self.components
    }
}

/// One row of a depth sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthScore {
    pub max_depth: usize,
    pub norm_cut: f64,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Order edges by descending score, then ascending canonical key.
#[must_use]
pub fn rank_edges(betweenness: &EdgeBetweenness) -> Vec<(EdgeKey, f64)> {
    let mut ranked: Vec<(EdgeKey, f64)> = betweenness
        .iter()
        .map(|(k, &v)| (k.clone(), v))
        .collect();
    ranked.sort_by(|(ka, va), (kb, vb)| match vb.total_cmp(va) {
        Ordering::Equal => ka.cmp(kb),
        other => other,
    });
    ranked
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// Partition `graph` with the default (sequential, unbounded-time) settings.
///
/// `graph` is never modified.
#[must_use]
pub fn partition_girvan_newman(graph: &SocialGraph, max_depth: usize) -> Partition {
    let scores = || approximate_betweenness(graph, max_depth);
    match remove_until_split(graph, scores, |_| Ok::<(), Infallible>(())) {
        Ok(p) => p,
        Err(never) => match never {},
    }
}

/// Partition `graph` according to `config`.
///
/// # Errors
///
/// Returns [`GraphError::DeadlineExceeded`] if `config.deadline` elapses
/// before the working copy splits.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn partition_with(
    graph: &SocialGraph,
    config: &PartitionConfig,
) -> Result<Partition, GraphError> {
    let started = Instant::now();
    let scores = || {
        if config.parallel {
            approximate_betweenness_parallel(graph, config.max_depth)
        } else {
            approximate_betweenness(graph, config.max_depth)
        }
    };
    remove_until_split(graph, scores, |removed| match config.deadline {
        Some(limit) if started.elapsed() > limit => {
            Err(GraphError::DeadlineExceeded { removed })
        }
        _ => Ok(()),
    })
}

/// Shared removal loop. `check` runs before every removal with the number
/// of edges removed so far and aborts the run by returning an error.
fn remove_until_split<E>(
    graph: &SocialGraph,
    scores: impl FnOnce() -> EdgeBetweenness,
    mut check: impl FnMut(usize) -> Result<(), E>,
) -> Result<Partition, E> {
    let mut working = graph.clone();
    let mut removed_edges: Vec<EdgeKey> = Vec::new();

    if working.component_count() > 1 {
        debug!("graph already disconnected; nothing to remove");
        return Ok(Partition {
            components: working.connected_components(),
            removed_edges,
        });
    }

    for (edge, score) in rank_edges(&scores()) {
        check(removed_edges.len())?;

        working.remove_edge(edge.first(), edge.second());
        debug!(%edge, score, "removed edge");
        removed_edges.push(edge);

        if working.component_count() > 1 {
            break;
        }
    }

    let components = working.connected_components();
    info!(
        components = components.len(),
        removed = removed_edges.len(),
        "partition complete"
    );
    Ok(Partition {
        components,
        removed_edges,
    })
}

/// Partition at each depth and score the split of the first two components
/// by normalized cut against the original graph.
///
/// Results follow the order of `max_depths`.
///
/// # Errors
///
/// Returns [`GraphError::TooFewComponents`] if a depth leaves the graph in
/// one piece, or [`GraphError::ZeroVolume`] if either component has no
/// edges in `graph`.
#[instrument(skip(graph))]
pub fn score_max_depths(
    graph: &SocialGraph,
    max_depths: &[usize],
) -> Result<Vec<DepthScore>, GraphError> {
    max_depths
        .iter()
        .map(|&max_depth| {
            let partition = partition_girvan_newman(graph, max_depth);
            let [first, second, ..] = partition.components.as_slice() else {
                return Err(GraphError::TooFewComponents {
                    required: 2,
                    found: partition.len(),
                });
            };
            let nc = norm_cut(first, second, graph)?;
            debug!(max_depth, norm_cut = nc, "scored depth");
            Ok(DepthScore {
                max_depth,
                norm_cut: nc,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
