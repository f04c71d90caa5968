//! CLI definition and execution
//!
//! The tool has a single job, so there are no subcommands: running `sharelink`
//! with no arguments loads the configuration and generates links.

use std::path::PathBuf;

use clap::Parser;
use sharelink_core::{ConfigManager, Settings};
use sharelink_dropbox::DropboxClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod links;

/// sharelink - Dropbox share links for local audio files
///
/// Walks a folder inside your local Dropbox, creates (or looks up) a public
/// shared link for every matching file and prints `<local path> -> <url>`.
#[derive(Parser, Debug)]
#[command(name = "sharelink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "SHARELINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output one JSON object per file
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
    });

    let settings = match load_settings(cli.config) {
        Ok(s) => s,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };
    tracing::debug!(?settings, "Resolved settings");

    links::run(&settings, DropboxClient::from_settings, &formatter).await
}

fn load_settings(config_path: Option<PathBuf>) -> sharelink_core::Result<Settings> {
    let manager = match config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let config = manager.load()?;
    Settings::from_env(config)
}
