//! `cleave betweenness` — edges ranked by approximate betweenness.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use cleave_analysis::community::rank_edges;
use cleave_analysis::metrics::{approximate_betweenness, approximate_betweenness_parallel};
use cleave_core::config::AnalysisConfig;
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, render};

/// Arguments for `cleave betweenness`.
#[derive(Args, Debug)]
pub struct BetweennessArgs {
    /// Edge-list file (two node names per line).
    pub path: PathBuf,

    /// BFS depth bound (default: community.max_depth).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Show only the N highest-scoring edges.
    #[arg(long)]
    pub top: Option<usize>,

    /// Drop nodes with fewer neighbors first (default: community.min_degree).
    #[arg(long)]
    pub min_degree: Option<usize>,

    /// Spread the per-source passes over all cores.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Serialize)]
struct RankedEdge {
    source: String,
    target: String,
    score: f64,
}

/// Execute `cleave betweenness`.
pub fn run_betweenness(
    args: &BetweennessArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let max_depth = args.max_depth.unwrap_or(config.community.max_depth);
    let min_degree = args.min_degree.unwrap_or(config.community.min_degree);
    let graph = super::load_graph(&args.path, min_degree)?;

    let scores = if args.parallel || config.execution.parallel {
        approximate_betweenness_parallel(&graph, max_depth)
    } else {
        approximate_betweenness(&graph, max_depth)
    };

    let ranked: Vec<RankedEdge> = rank_edges(&scores)
        .into_iter()
        .take(args.top.unwrap_or(usize::MAX))
        .map(|(edge, score)| RankedEdge {
            source: edge.first().to_string(),
            target: edge.second().to_string(),
            score,
        })
        .collect();
    info!(shown = ranked.len(), scored = scores.len(), "betweenness ranked");

    render(output, &ranked, |rows, w| {
        for row in rows {
            writeln!(w, "{:>10.4}  {} {}", row.score, row.source, row.target)?;
        }
        Ok(())
    })
}
