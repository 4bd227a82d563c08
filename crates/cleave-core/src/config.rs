use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "cleave.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub community: CommunityConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output: None,
            community: CommunityConfig::default(),
            prediction: PredictionConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_sweep_depths")]
    pub sweep_depths: Vec<usize>,
    #[serde(default = "default_min_degree")]
    pub min_degree: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            sweep_depths: default_sweep_depths(),
            min_degree: default_min_degree(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_held_out")]
    pub held_out: usize,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_beta")]
    pub beta: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            held_out: default_held_out(),
            k: default_k(),
            beta: default_beta(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl ExecutionConfig {
    /// Wall-clock budget for a single partition run, if configured.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

/// Load `cleave.toml` from `project_root`, falling back to defaults when the
/// file does not exist.
pub fn load_project_config(project_root: &Path) -> Result<AnalysisConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }
    load_config_file(&path)
}

/// Load `<config_dir>/cleave/config.toml`, falling back to defaults.
pub fn load_user_config() -> Result<AnalysisConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(AnalysisConfig::default());
    };

    let path = config_dir.join("cleave/config.toml");
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }
    load_config_file(&path)
}

/// Parse a config file at an explicit path. A missing file is an error here.
pub fn load_config_file(path: &Path) -> Result<AnalysisConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective configuration.
///
/// Precedence: explicit `--config` path, then `cleave.toml` in
/// `project_root`, then the user config, then built-in defaults.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<AnalysisConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    if project_root.join(PROJECT_CONFIG_FILE).exists() {
        return load_project_config(project_root);
    }
    load_user_config()
}

/// Resolve the output format: `--json` flag, then `CLEAVE_FORMAT`, then the
/// config file, then `text`. Unknown values fall through to the next source.
#[must_use]
pub fn resolve_output(
    cli_json: bool,
    config_output: Option<&str>,
    env_format: Option<&str>,
) -> &'static str {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "human" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json";
    }

    env_format
        .and_then(normalize_output_mode)
        .or_else(|| config_output.and_then(normalize_output_mode))
        .unwrap_or("text")
}

const fn default_max_depth() -> usize {
    3
}

fn default_sweep_depths() -> Vec<usize> {
    vec![1, 2, 3, 4]
}

const fn default_min_degree() -> usize {
    2
}

const fn default_held_out() -> usize {
    5
}

const fn default_k() -> usize {
    5
}

const fn default_beta() -> f64 {
    0.1
}
