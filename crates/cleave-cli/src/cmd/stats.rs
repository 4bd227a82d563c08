//! `cleave stats` — summary of an edge list.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use cleave_core::GraphStats;

use crate::output::{OutputMode, render, text_kv};

/// Arguments for `cleave stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Edge-list file (two node names per line).
    pub path: PathBuf,
}

/// Execute `cleave stats`. The graph is reported unfiltered.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = super::load_graph(&args.path, 0)?;
    let stats = GraphStats::from_graph(&graph);

    render(output, &stats, |s, w| {
        text_kv(w, "nodes", s.node_count.to_string())?;
        text_kv(w, "edges", s.edge_count.to_string())?;
        text_kv(w, "density", format!("{:.4}", s.density))?;
        text_kv(w, "components", s.component_count.to_string())?;
        text_kv(w, "isolated", s.isolated_node_count.to_string())?;
        text_kv(w, "max degree", s.max_degree.to_string())?;
        text_kv(w, "hash", &s.content_hash)?;
        if s.is_flat() {
            writeln!(w, "note: graph has no edges")?;
        }
        Ok(())
    })
}
