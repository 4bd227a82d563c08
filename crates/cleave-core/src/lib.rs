#![forbid(unsafe_code)]
//! cleave-core library.
//!
//! # Conventions
//!
//! - **Errors**: Graph operations return [`error::GraphError`]; config
//!   loading uses `anyhow::Result` with path context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;

pub use error::{ErrorCode, ErrorKind, GraphError};
pub use graph::{EdgeKey, GraphStats, SocialGraph};
