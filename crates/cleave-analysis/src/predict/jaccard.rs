//! Jaccard neighborhood-overlap link scorer.

use std::collections::HashSet;

use tracing::{debug, instrument};

use cleave_core::{GraphError, SocialGraph};

use super::{ScoredEdge, rank_candidates};

/// Jaccard similarity of two neighbor sets, or `None` if both are empty.
#[allow(clippy::cast_precision_loss)]
fn overlap(a: &HashSet<&str>, b: &HashSet<&str>) -> Option<f64> {
    let union = a.union(b).count();
    if union == 0 {
        return None;
    }
    Some(a.intersection(b).count() as f64 / union as f64)
}

/// Rank the non-neighbors of `root` by Jaccard overlap with its
/// neighborhood and return the top `k`.
///
/// Candidates are every node other than `root` and its current neighbors.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] if `root` is not in `graph`.
/// - [`GraphError::NotEnoughCandidates`] if fewer than `k` candidates exist.
/// - [`GraphError::EmptyNeighborhoods`] if `root` and some candidate both
///   have no neighbors.
#[instrument(skip(graph))]
pub fn jaccard(graph: &SocialGraph, root: &str, k: usize) -> Result<Vec<ScoredEdge>, GraphError> {
    let root_neighbors: HashSet<&str> = graph.neighbors(root)?.collect();

    let candidates: Vec<&str> = graph
        .nodes()
        .filter(|&n| n != root && !root_neighbors.contains(n))
        .collect();
    if candidates.len() < k {
        return Err(GraphError::NotEnoughCandidates {
            requested: k,
            available: candidates.len(),
        });
    }

    let mut scored: Vec<(&str, f64)> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let theirs: HashSet<&str> = graph.neighbors(candidate)?.collect();
        let score = overlap(&root_neighbors, &theirs).ok_or_else(|| {
            GraphError::EmptyNeighborhoods {
                root: root.to_string(),
                candidate: candidate.to_string(),
            }
        })?;
        scored.push((candidate, score));
    }

    debug!(candidates = scored.len(), "jaccard scored");
    Ok(rank_candidates(root, scored, k))
}
