//! `cleave partition` — divisive community detection.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use cleave_analysis::community::{PartitionConfig, norm_cut, partition_with};
use cleave_core::config::AnalysisConfig;
use serde::Serialize;

use crate::output::{OutputMode, render, text_kv};

/// Arguments for `cleave partition`.
#[derive(Args, Debug)]
pub struct PartitionArgs {
    /// Edge-list file (two node names per line).
    pub path: PathBuf,

    /// BFS depth bound for the betweenness estimate (default: community.max_depth).
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Drop nodes with fewer neighbors first (default: community.min_degree).
    #[arg(long)]
    pub min_degree: Option<usize>,

    /// Use the parallel betweenness engine.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Debug, Serialize)]
struct ComponentReport {
    size: usize,
    nodes: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
struct PartitionReport {
    max_depth: usize,
    components: Vec<ComponentReport>,
    removed_edges: Vec<String>,
    /// Normalized cut of the first two components; absent when there is
    /// only one component.
    #[serde(skip_serializing_if = "Option::is_none")]
    norm_cut: Option<f64>,
}

/// Execute `cleave partition`.
pub fn run_partition(
    args: &PartitionArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let min_degree = args.min_degree.unwrap_or(config.community.min_degree);
    let graph = super::load_graph(&args.path, min_degree)?;

    let partition_config = PartitionConfig {
        max_depth: args.max_depth.unwrap_or(config.community.max_depth),
        parallel: args.parallel || config.execution.parallel,
        deadline: config.execution.deadline(),
    };
    let partition = partition_with(&graph, &partition_config)
        .with_context(|| format!("partitioning {}", args.path.display()))?;

    let quality = match partition.components.as_slice() {
        [first, second, ..] => Some(norm_cut(first, second, &graph)?),
        _ => None,
    };

    let report = PartitionReport {
        max_depth: partition_config.max_depth,
        removed_edges: partition.removed_edges.iter().map(ToString::to_string).collect(),
        components: partition
            .into_components()
            .into_iter()
            .map(|nodes| ComponentReport {
                size: nodes.len(),
                nodes,
            })
            .collect(),
        norm_cut: quality,
    };

    render(output, &report, |r, w| {
        for (i, component) in r.components.iter().enumerate() {
            let names: Vec<&str> = component.nodes.iter().map(String::as_str).collect();
            writeln!(w, "component {} ({}): {}", i + 1, component.size, names.join(", "))?;
        }
        text_kv(w, "removed", r.removed_edges.join(" "))?;
        if let Some(nc) = r.norm_cut {
            text_kv(w, "norm cut", format!("{nc:.4}"))?;
        }
        Ok(())
    })
}
