//! Cut, volume and normalized cut for two vertex subsets.
//!
//! Lower normalized-cut values mean better separated partitions. The two
//! subsets need not cover the graph, and names missing from the graph are
//! ignored rather than rejected.

use std::collections::BTreeSet;

use cleave_core::{GraphError, SocialGraph};

/// Number of edges with one endpoint in `s` and the other in `t`.
///
/// If the sets overlap, an edge with both endpoints in `s ∩ t` is counted
/// once per direction.
#[must_use]
pub fn cut(s: &BTreeSet<String>, t: &BTreeSet<String>, graph: &SocialGraph) -> usize {
    s.iter()
        .filter_map(|node| graph.neighbors(node).ok())
        .flatten()
        .filter(|nb| t.contains(*nb))
        .count()
}

/// Number of edges with at least one endpoint in `nodes`.
#[must_use]
pub fn volume(nodes: &BTreeSet<String>, graph: &SocialGraph) -> usize {
    let mut external = 0_usize;
    let mut internal_twice = 0_usize;
    for node in nodes {
        let Ok(neighbors) = graph.neighbors(node) else {
            continue;
        };
        for nb in neighbors {
            if nodes.contains(nb) {
                internal_twice += 1;
            } else {
                external += 1;
            }
        }
    }
    external + internal_twice / 2
}

/// `cut / volume(s) + cut / volume(t)`.
///
/// # Errors
///
/// Returns [`GraphError::ZeroVolume`] if either side has no incident edges.
#[allow(clippy::cast_precision_loss)]
pub fn norm_cut(
    s: &BTreeSet<String>,
    t: &BTreeSet<String>,
    graph: &SocialGraph,
) -> Result<f64, GraphError> {
    let vol_s = volume(s, graph);
    let vol_t = volume(t, graph);
    if vol_s == 0 || vol_t == 0 {
        return Err(GraphError::ZeroVolume);
    }
    let c = cut(s, t, graph) as f64;
    Ok(c / vol_s as f64 + c / vol_t as f64)
}
