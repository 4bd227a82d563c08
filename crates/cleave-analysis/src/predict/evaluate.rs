//! Accuracy of a prediction list against a ground-truth graph.

use cleave_core::{GraphError, SocialGraph};

use super::PredictedEdge;

/// Fraction of `predicted` that are real edges of `truth`.
///
/// Edges naming nodes absent from `truth` count as misses.
///
/// # Errors
///
/// Returns [`GraphError::EmptyPrediction`] if `predicted` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(predicted: &[PredictedEdge], truth: &SocialGraph) -> Result<f64, GraphError> {
    if predicted.is_empty() {
        return Err(GraphError::EmptyPrediction);
    }
    let hits = predicted
        .iter()
        .filter(|e| truth.contains_edge(&e.source, &e.target))
        .count();
    Ok(hits as f64 / predicted.len() as f64)
}
