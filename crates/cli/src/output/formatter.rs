//! Output formatter for human-readable and JSON output

use serde::Serialize;
use sharelink_core::LinkReport;

use super::OutputConfig;

/// Formatter for CLI output
///
/// In JSON mode every result is a single-line JSON object so the output can
/// be consumed as NDJSON.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Render one file's result
    pub fn render_report(&self, report: &LinkReport) -> String {
        if self.config.json {
            to_json_line(report).unwrap_or_else(|| report.to_string())
        } else {
            report.to_string()
        }
    }

    /// Print one file's result to stdout
    pub fn report(&self, report: &LinkReport) {
        println!("{}", self.render_report(report));
    }

    /// Output an error message
    ///
    /// Errors are always printed to stderr.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!("{}", to_json_line(&error).unwrap_or_else(|| message.to_string()));
        } else if self.colors_enabled() {
            eprintln!("\x1b[31m✗\x1b[0m {message}");
        } else {
            eprintln!("✗ {message}");
        }
    }

    /// Render a warning as a single line
    pub fn render_warning(&self, message: &str) -> String {
        if self.config.json {
            let warning = serde_json::json!({ "warning": message });
            to_json_line(&warning).unwrap_or_else(|| message.to_string())
        } else if self.colors_enabled() {
            format!("\x1b[33m⚠\x1b[0m {message}")
        } else {
            format!("⚠ {message}")
        }
    }

    /// Output a warning message to stderr
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.render_warning(message));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

fn to_json_line<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(error = %e, "Error serializing output");
            None
        }
    }
}
