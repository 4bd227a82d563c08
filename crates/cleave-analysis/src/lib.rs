#![forbid(unsafe_code)]
//! cleave-analysis library.
//!
//! # Conventions
//!
//! - **Errors**: Return `Result<_, cleave_core::GraphError>`; preconditions
//!   (unknown node, `k` too large) are never silently downgraded.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Ownership**: Every function takes `&SocialGraph`. Stages that remove
//!   edges clone the graph and mutate only the private copy.
//!
//! # Pipeline
//!
//! ```text
//! SocialGraph
//!   ├─ traversal::bfs::explore()                     per source node
//!   │     ↓
//!   │  metrics::betweenness::bottom_up()              per-source edge credit
//!   │     ↓
//!   │  metrics::betweenness::approximate_betweenness()  summed, halved
//!   │     ↓
//!   │  community::partition::partition_girvan_newman()  edge removal loop
//!   │     ↓
//!   │  community::cut::norm_cut()                     partition quality
//!   │
//!   └─ predict::training::make_training_graph()      held-out edges
//!         ↓
//!      predict::{jaccard, path_score}                 ranked candidates
//!         ↓
//!      predict::evaluate::evaluate()                  accuracy
//! ```

pub mod community;
pub mod metrics;
pub mod predict;
pub mod traversal;
