//! Graph traversal.
//!
//! [`bfs::explore`] builds the depth-bounded shortest-path tree that both
//! the betweenness estimate and the path-score link predictor consume.

pub mod bfs;

pub use bfs::{ShortestPathTree, explore};
