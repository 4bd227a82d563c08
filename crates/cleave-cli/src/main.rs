#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cleave_core::config::{AnalysisConfig, resolve_config, resolve_output};
use output::{CliError, OutputMode, render_error};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cleave: community detection and link prediction for social graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (ignored when CLEAVE_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Read configuration from this file instead of cleave.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize an edge list",
        after_help = "EXAMPLES:\n    # Node, edge and component counts\n    cleave stats edges.tsv\n\n    # Emit machine-readable output\n    cleave stats edges.tsv --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Rank edges by approximate betweenness",
        after_help = "EXAMPLES:\n    # Ten most central edges with a depth-3 horizon\n    cleave betweenness edges.tsv --max-depth 3 --top 10"
    )]
    Betweenness(cmd::betweenness::BetweennessArgs),

    #[command(
        about = "Split the graph into communities",
        long_about = "Remove the highest-betweenness edges until the graph splits into more than one connected component.",
        after_help = "EXAMPLES:\n    # Partition with a depth-5 horizon\n    cleave partition edges.tsv --max-depth 5\n\n    # Use every core for the betweenness estimate\n    cleave partition edges.tsv --parallel"
    )]
    Partition(cmd::partition::PartitionArgs),

    #[command(
        about = "Compare partition quality across depths",
        after_help = "EXAMPLES:\n    # Normalized cut at depths 1 through 4\n    cleave sweep edges.tsv --depths 1,2,3,4"
    )]
    Sweep(cmd::sweep::SweepArgs),

    #[command(
        about = "Hold out a node's edges and predict them back",
        after_help = "EXAMPLES:\n    # Hide two of D's edges and rank five candidates with both scorers\n    cleave predict edges.tsv --node D --held-out 2 -k 5\n\n    # Jaccard only\n    cleave predict edges.tsv --node D --method jaccard"
    )]
    Predict(cmd::predict::PredictArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CLEAVE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "cleave=debug,info"
        } else {
            "cleave=info,warn"
        })
    });

    let format = env::var("CLEAVE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(command: &Commands, config: &AnalysisConfig, output: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Stats(args) => cmd::stats::run_stats(args, output),
        Commands::Betweenness(args) => cmd::betweenness::run_betweenness(args, config, output),
        Commands::Partition(args) => cmd::partition::run_partition(args, config, output),
        Commands::Sweep(args) => cmd::sweep::run_sweep(args, config, output),
        Commands::Predict(args) => cmd::predict::run_predict(args, config, output),
    }
}

fn fail(mode: OutputMode, err: &anyhow::Error) -> ExitCode {
    if render_error(mode, &CliError::from(err)).is_err() {
        eprintln!("error: {err:#}");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let env_format = env::var("CLEAVE_FORMAT").ok();
    let project_root = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let config = match resolve_config(&project_root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let mode = OutputMode::from_resolved(resolve_output(cli.json, None, env_format.as_deref()));
            return fail(mode, &err);
        }
    };
    let output = OutputMode::from_resolved(resolve_output(
        cli.json,
        config.output.as_deref(),
        env_format.as_deref(),
    ));
    debug!(?config, ?output, "configuration resolved");

    match run(&cli.command, &config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("command failed");
            fail(output, &err)
        }
    }
}
