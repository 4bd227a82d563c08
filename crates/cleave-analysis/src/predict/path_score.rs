//! Decayed shortest-path link scorer.
//!
//! A candidate `v` at BFS distance `d` from the root with `p` shortest paths
//! scores `beta^d * p`. Closer candidates and candidates reachable along
//! more routes score higher; `beta` controls how fast distance dominates.

use std::collections::HashSet;

use tracing::{debug, instrument};

use cleave_core::{GraphError, SocialGraph};

use super::{ScoredEdge, rank_candidates};
use crate::traversal::bfs::explore;

/// Rank the non-neighbors of `root` reachable within `k` hops by
/// `beta^distance * path_count` and return at most `k` of them.
///
/// The BFS depth bound is `k` as well. Fewer than `k` results is not an
/// error; nodes outside the bound are never scored.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] if `root` is not in `graph`.
/// - [`GraphError::InvalidBeta`] if `beta` is outside `[0, 1]` or NaN.
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn path_score(
    graph: &SocialGraph,
    root: &str,
    k: usize,
    beta: f64,
) -> Result<Vec<ScoredEdge>, GraphError> {
    if !(0.0..=1.0).contains(&beta) {
        return Err(GraphError::InvalidBeta { beta });
    }
    // -0.0 passes the range check; fold it so odd powers stay positive.
    let beta = beta + 0.0;
    let tree = explore(graph, root, k)?;
    let neighbors: HashSet<&str> = graph.neighbors(root)?.collect();

    let scored: Vec<(&str, f64)> = tree
        .reached()
        .filter(|&v| v != root && !neighbors.contains(v))
        .filter_map(|v| {
            let distance = i32::try_from(tree.distance(v)?).unwrap_or(i32::MAX);
            let paths = tree.num_paths(v)? as f64;
            Some((v, beta.powi(distance) * paths))
        })
        .collect();

    debug!(candidates = scored.len(), "path score computed");
    Ok(rank_candidates(root, scored, k))
}
