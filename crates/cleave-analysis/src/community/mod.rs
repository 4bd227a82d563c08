//! Community detection.
//!
//! # Overview
//!
//! - **Divisive partitioning** (`partition`): remove the highest-betweenness
//!   edge from a working copy until the graph falls apart.
//! - **Partition quality** (`cut`): cut size, volume and normalized cut of
//!   two vertex subsets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cleave_analysis::community::{partition_girvan_newman, score_max_depths};
//!
//! let partition = partition_girvan_newman(&graph, 5);
//! let sweep = score_max_depths(&graph, &[1, 2, 3, 4])?;
//! ```

pub mod cut;
pub mod partition;

pub use cut::{cut, norm_cut, volume};
pub use partition::{
    DepthScore, Partition, PartitionConfig, partition_girvan_newman, partition_with, rank_edges,
    score_max_depths,
};
