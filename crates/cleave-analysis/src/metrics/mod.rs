//! Edge centrality metrics.
//!
//! # Overview
//!
//! - **Approximate edge betweenness** (`betweenness`): Which edges carry the
//!   most shortest-path traffic within a bounded BFS horizon? These are the
//!   bridges the divisive partitioner cuts first.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cleave_analysis::metrics::betweenness::{approximate_betweenness, bottom_up};
//! use cleave_analysis::traversal::bfs::explore;
//!
//! let tree = explore(&graph, "E", 5)?;
//! let credit = bottom_up(&tree);
//! let bc = approximate_betweenness(&graph, 5);
//! ```

pub mod betweenness;

pub use betweenness::{
    EdgeBetweenness, EdgeCredit, approximate_betweenness, approximate_betweenness_parallel,
    bottom_up,
};
