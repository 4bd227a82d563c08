//! Edge-list ingestion.
//!
//! The input format is the plain edge list produced by the crawler: one
//! undirected edge per line, two node identifiers separated by whitespace
//! (a tab in practice), no header.
//!
//! ```text
//! Bill Gates\tGates Foundation
//! ```
//!
//! Node names may contain spaces only when the line is tab-separated; if a
//! tab is present the line is split on tabs, otherwise on any whitespace.
//! Blank lines and `#` comments are skipped. Fields beyond the second are
//! ignored. Self-loops and repeated edges are dropped with a debug log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::GraphError;
use crate::graph::store::SocialGraph;

/// Read an edge-list file into a [`SocialGraph`].
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be opened or read, and
/// [`GraphError::MalformedLine`] for a line with fewer than two fields.
#[instrument]
pub fn read_edge_list(path: &Path) -> Result<SocialGraph, GraphError> {
    let file = File::open(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_edge_list(BufReader::new(file)).map_err(|e| match e {
        GraphError::Io { source, .. } => GraphError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded edge list"
    );
    Ok(graph)
}

/// Parse an edge list from any buffered reader.
///
/// # Errors
///
/// Returns [`GraphError::MalformedLine`] (1-based line number) for a line
/// with fewer than two fields, or [`GraphError::Io`] with an empty path if
/// the reader fails.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<SocialGraph, GraphError> {
    let mut graph = SocialGraph::new();
    let mut skipped = 0_usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| GraphError::Io {
            path: std::path::PathBuf::new(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (a, b) = split_fields(trimmed).ok_or_else(|| GraphError::MalformedLine {
            line: i + 1,
            content: line.clone(),
        })?;

        if !graph.add_edge(a, b) {
            skipped += 1;
            debug!(line = i + 1, a, b, "skipped self-loop or duplicate edge");
        }
    }

    if skipped > 0 {
        warn!(skipped, "edge list contained redundant lines");
    }
    Ok(graph)
}

fn split_fields(line: &str) -> Option<(&str, &str)> {
    if line.contains('\t') {
        let mut fields = line.split('\t').map(str::trim).filter(|f| !f.is_empty());
        Some((fields.next()?, fields.next()?))
    } else {
        let mut fields = line.split_whitespace();
        Some((fields.next()?, fields.next()?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
