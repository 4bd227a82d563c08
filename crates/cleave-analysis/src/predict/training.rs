//! Held-out training graphs for link-prediction evaluation.

use tracing::{debug, instrument};

use cleave_core::{GraphError, SocialGraph};

/// Copy `graph` and remove the edges from `test_node` to its first `n`
/// neighbors in alphabetical order.
///
/// The held-out edges are exactly the ones a good scorer should recover.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] if `test_node` is not in `graph`.
/// - [`GraphError::NotEnoughNeighbors`] if `n` exceeds its degree.
#[instrument(skip(graph))]
pub fn make_training_graph(
    graph: &SocialGraph,
    test_node: &str,
    n: usize,
) -> Result<SocialGraph, GraphError> {
    let neighbors = graph.sorted_neighbors(test_node)?;
    if n > neighbors.len() {
        return Err(GraphError::NotEnoughNeighbors {
            node: test_node.to_string(),
            requested: n,
            available: neighbors.len(),
        });
    }

    let mut train = graph.clone();
    for neighbor in &neighbors[..n] {
        train.remove_edge(test_node, neighbor);
        debug!(node = test_node, neighbor, "held out edge");
    }
    Ok(train)
}
