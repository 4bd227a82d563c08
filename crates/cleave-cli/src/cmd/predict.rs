//! `cleave predict` — hide some of a node's edges and try to recover them.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use cleave_analysis::predict::{
    PredictedEdge, ScoredEdge, evaluate, jaccard, make_training_graph, path_score,
};
use cleave_core::config::AnalysisConfig;
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, render, text_kv};

/// Which link scorer(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Jaccard,
    Path,
    Both,
}

impl Method {
    const fn scorers(self) -> &'static [Scorer] {
        match self {
            Self::Jaccard => &[Scorer::Jaccard],
            Self::Path => &[Scorer::Path],
            Self::Both => &[Scorer::Jaccard, Scorer::Path],
        }
    }
}

/// A single link scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Scorer {
    Jaccard,
    Path,
}

impl Scorer {
    const fn name(self) -> &'static str {
        match self {
            Self::Jaccard => "jaccard",
            Self::Path => "path",
        }
    }
}

/// Arguments for `cleave predict`.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Edge-list file (two node names per line).
    pub path: PathBuf,

    /// Node whose links are held out and predicted.
    #[arg(long)]
    pub node: String,

    /// Number of the node's edges to hide (default: prediction.held_out).
    #[arg(long)]
    pub held_out: Option<usize>,

    /// Number of predictions to keep (default: prediction.k).
    #[arg(short)]
    pub k: Option<usize>,

    /// Path-score decay in [0, 1] (default: prediction.beta).
    #[arg(long)]
    pub beta: Option<f64>,

    /// Scorer to run.
    #[arg(long, value_enum, default_value_t = Method::Both)]
    pub method: Method,

    /// Drop nodes with fewer neighbors first (default: community.min_degree).
    #[arg(long)]
    pub min_degree: Option<usize>,
}

#[derive(Debug, Serialize)]
struct MethodReport {
    method: Scorer,
    predictions: Vec<ScoredEdge>,
    /// Fraction of predictions that are real edges; absent when nothing
    /// was predicted.
    #[serde(skip_serializing_if = "Option::is_none")]
    accuracy: Option<f64>,
}

#[derive(Debug, Serialize)]
struct PredictReport {
    node: String,
    held_out: Vec<PredictedEdge>,
    results: Vec<MethodReport>,
}

/// Execute `cleave predict`.
pub fn run_predict(
    args: &PredictArgs,
    config: &AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let min_degree = args.min_degree.unwrap_or(config.community.min_degree);
    let held_out = args.held_out.unwrap_or(config.prediction.held_out);
    let k = args.k.unwrap_or(config.prediction.k);
    let beta = args.beta.unwrap_or(config.prediction.beta);

    let graph = super::load_graph(&args.path, min_degree)?;
    let train = make_training_graph(&graph, &args.node, held_out)?;
    let hidden: Vec<PredictedEdge> = graph
        .sorted_neighbors(&args.node)?
        .into_iter()
        .take(held_out)
        .map(|nb| PredictedEdge::new(args.node.as_str(), nb))
        .collect();

    let mut results = Vec::new();
    for &method in args.method.scorers() {
        let predictions = match method {
            Scorer::Jaccard => jaccard(&train, &args.node, k)?,
            Scorer::Path => path_score(&train, &args.node, k, beta)?,
        };
        let edges: Vec<PredictedEdge> = predictions.iter().map(|s| s.edge.clone()).collect();
        let accuracy = if edges.is_empty() {
            None
        } else {
            Some(evaluate(&edges, &graph)?)
        };
        info!(?method, predicted = edges.len(), ?accuracy, "link prediction scored");
        results.push(MethodReport {
            method,
            predictions,
            accuracy,
        });
    }

    let report = PredictReport {
        node: args.node.clone(),
        held_out: hidden,
        results,
    };

    render(output, &report, |r, w| {
        let hidden: Vec<String> = r.held_out.iter().map(ToString::to_string).collect();
        text_kv(w, "node", &r.node)?;
        text_kv(w, "held out", hidden.join(" "))?;
        for result in &r.results {
            writeln!(w)?;
            text_kv(w, "method", result.method.name())?;
            for s in &result.predictions {
                writeln!(w, "  {:<20} {:.4}", s.edge.to_string(), s.score)?;
            }
            let accuracy = result
                .accuracy
                .map_or_else(|| "n/a".to_string(), |a| format!("{a:.4}"));
            text_kv(w, "accuracy", accuracy)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_runs_each_scorer_once() {
        assert_eq!(Method::Both.scorers(), &[Scorer::Jaccard, Scorer::Path]);
        assert_eq!(Method::Path.scorers(), &[Scorer::Path]);
        assert_eq!(Method::Jaccard.scorers(), &[Scorer::Jaccard]);
    }

    #[test]
    fn scorer_names_match_their_json_tag() {
        for scorer in [Scorer::Jaccard, Scorer::Path] {
            let tag = serde_json::to_value(scorer).expect("serializes");
            assert_eq!(tag, scorer.name());
        }
    }
}
