//! `cleave sweep` — normalized cut of the partition at several depths.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use cleave_analysis::community::score_max_depths;
use cleave_core::config::AnalysisConfig;

use crate::output::{OutputMode, render};

/// Arguments for `cleave sweep`.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Edge-list file (two node names per line).
    pub path: PathBuf,

    /// Comma-separated depths to try (default: community.sweep_depths).
    #[arg(long, value_delimiter = ',')]
    pub depths: Vec<usize>,

    /// Drop nodes with fewer neighbors first (default: community.min_degree).
    #[arg(long)]
    pub min_degree: Option<usize>,
}

/// Execute `cleave sweep`.
pub fn run_sweep(args: &SweepArgs, config: &AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    let min_degree = args.min_degree.unwrap_or(config.community.min_degree);
    let graph = super::load_graph(&args.path, min_degree)?;
    let depths = if args.depths.is_empty() {
        config.community.sweep_depths.as_slice()
    } else {
        args.depths.as_slice()
    };

    let scores = score_max_depths(&graph, depths)?;

    render(output, &scores, |rows, w| {
        writeln!(w, "{:>5}  {:>9}", "depth", "norm cut")?;
        for row in rows {
            writeln!(w, "{:>5}  {:>9.4}", row.max_depth, row.norm_cut)?;
        }
        Ok(())
    })
}
