//! Link prediction.
//!
//! # Overview
//!
//! Both scorers rank the non-neighbors of a single query node ("root") and
//! return the top `k` as [`ScoredEdge`]s oriented `(root, candidate)`:
//!
//! - **Jaccard** (`jaccard`): neighborhood overlap, `|N(r) ∩ N(c)| / |N(r) ∪ N(c)|`.
//! - **Path score** (`path_score`): `beta^distance * path_count` from a
//!   bounded BFS rooted at the query node.
//!
//! [`training::make_training_graph`] hides some of a node's edges so the
//! scorers can be checked against them with [`evaluate::evaluate`].
//!
//! # Ordering
//!
//! Scores descend; ties go to the alphabetically smaller candidate. Scores
//! are always finite, so the ordering is total.

pub mod evaluate;
pub mod jaccard;
pub mod path_score;
pub mod training;

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

pub use evaluate::evaluate;
pub use jaccard::jaccard;
pub use path_score::path_score;
pub use training::make_training_graph;

/// A predicted link from the query node to a candidate.
///
/// Unlike [`cleave_core::EdgeKey`] this keeps its orientation: `source` is
/// always the node the prediction was made for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PredictedEdge {
    pub source: String,
    pub target: String,
}

impl PredictedEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for PredictedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.source, self.target)
    }
}

/// One entry of a ranked prediction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEdge {
    pub edge: PredictedEdge,
    pub score: f64,
}

/// Sort `(candidate, score)` pairs and keep the best `k` as edges from `root`.
///
/// Negative zero is folded into positive zero first so that `total_cmp`
/// treats numerically equal scores as ties.
pub(crate) fn rank_candidates(root: &str, mut scored: Vec<(&str, f64)>, k: usize) -> Vec<ScoredEdge> {
    for (_, score) in &mut scored {
        *score += 0.0;
    }
    scored.sort_by(|(ca, sa), (cb, sb)| match sb.total_cmp(sa) {
        Ordering::Equal => ca.cmp(cb),
        other => other,
    });
    scored
        .into_iter()
        .take(k)
        .map(|(candidate, score)| ScoredEdge {
            edge: PredictedEdge::new(root, candidate),
            score,
        })
        .collect()
}
