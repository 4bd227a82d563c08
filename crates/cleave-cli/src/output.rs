//! Shared output layer for text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: aligned text for humans and pipes, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `CLEAVE_FORMAT` env var → `"text"` | `"json"`
//! 3. `output` key in the resolved config file
//! 4. Default: [`OutputMode::Text`]

use std::io::{self, Write};

use cleave_core::GraphError;
use serde::Serialize;

/// Width of the key column in text output.
const KEY_WIDTH: usize = 14;

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain aligned text.
    Text,
    /// Machine-readable JSON (one pretty-printed document per command).
    Json,
}

impl OutputMode {
    /// Map the resolved config/env value onto a mode.
    pub fn from_resolved(value: &str) -> Self {
        if value == "json" { Self::Json } else { Self::Text }
    }
}

/// Render a left-aligned key/value line in text output.
pub fn text_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<width$} {}", format!("{key}:"), value.as_ref(), width = KEY_WIDTH)
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In text mode,
/// `text_fn` writes the human rendering.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured failure with an optional stable code and hint.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message, including the context chain.
    pub message: String,
    /// Stable machine code (e.g. `E1001`) when the cause is a [`GraphError`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Remediation hint for operators and agents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl From<&anyhow::Error> for CliError {
    fn from(err: &anyhow::Error) -> Self {
        let graph_error = err.chain().find_map(|e| e.downcast_ref::<GraphError>());
        Self {
            message: format!("{err:#}"),
            error_code: graph_error.map(|e| e.code().code().to_string()),
            hint: graph_error
                .and_then(|e| e.code().hint())
                .map(str::to_string),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Text => {
            match &error.error_code {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(hint) = &error.hint {
                writeln!(out, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}
