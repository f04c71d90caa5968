//! Output formatting utilities
//!
//! Result lines go to stdout, one per file, either as text or as JSON.
//! Errors and warnings go to stderr.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
}
