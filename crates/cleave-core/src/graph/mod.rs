//! Social graph module.
//!
//! # Overview
//!
//! This module owns the undirected graph every analysis reads from. The
//! graph is built from a delimited edge list and is treated as read-only by
//! the analyses; any stage that removes edges clones it first.
//!
//! ## Pipeline
//!
//! ```text
//! edges.txt (node \t node per line)
//!        ↓  load::read_edge_list()
//! SocialGraph (UnGraph<String, ()> + name table)
//!        ↓  SocialGraph::filter_min_degree()   (optional)
//! SocialGraph
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, content hash, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use std::path::Path;
//! use cleave_core::graph::{load::read_edge_list, stats::GraphStats};
//!
//! let graph = read_edge_list(Path::new("edges.txt"))?;
//! let sub = graph.filter_min_degree(2);
//! let stats = GraphStats::from_graph(&sub);
//!
//! println!("nodes={} edges={} components={}",
//!     stats.node_count, stats.edge_count, stats.component_count);
//! ```

pub mod load;
pub mod stats;
pub mod store;

// Re-export primary types at module level for convenience.
pub use load::{parse_edge_list, read_edge_list};
pub use stats::GraphStats;
pub use store::{EdgeKey, SocialGraph};
