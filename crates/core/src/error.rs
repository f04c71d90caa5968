//! Error types for sharelink-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for sharelink-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sharelink-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file or credential error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or permission error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found on the provider
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Provider rejected the request because of rate limiting
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// A shared link already exists for the path
    #[error("Shared link already exists: {0}")]
    LinkAlreadyExists(String),

    /// The link was reported as existing but the lookup returned nothing
    #[error("No link found")]
    NoLinkFound(String),

    /// Any other error reported by the provider API
    #[error("API error: {summary}")]
    Api {
        /// Provider-specific error tag, if one was reported
        tag: Option<String>,
        /// Human-readable error summary
        summary: String,
    },
}

impl Error {
    /// Get the exit code for an error that stops the whole run
    ///
    /// Errors from a single file's link never reach the exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::Network(_) => 3,                                             // NetworkError
            _ => 1,                                                             // GeneralError
        }
    }

    /// Short machine-readable name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::TomlParse(_) => "toml",
            Error::Json(_) => "json",
            Error::InvalidUrl(_) => "invalid_url",
            Error::Auth(_) => "auth",
            Error::NotFound(_) => "not_found",
            Error::Network(_) => "network",
            Error::RateLimited(_) => "rate_limited",
            Error::LinkAlreadyExists(_) => "link_already_exists",
            Error::NoLinkFound(_) => "no_link_found",
            Error::Api { .. } => "api",
        }
    }
}
