//! sharelink-core: Core library for the sharelink Dropbox link generator
//!
//! This crate provides the core functionality for the sharelink CLI, including:
//! - Configuration management
//! - Local file discovery
//! - Mapping local paths into the Dropbox namespace
//! - ShareProvider trait and the link resolver built on it
//!
//! This crate is designed to be independent of any specific HTTP client,
//! allowing the resolver to be tested against mock providers.

pub mod config;
pub mod error;
pub mod path;
pub mod resolve;
pub mod scan;
pub mod traits;

pub use config::{Config, ConfigManager, Settings};
pub use error::{Error, Result};
pub use path::{map_to_provider, ProviderPath};
pub use resolve::{resolve_link, LinkReport};
pub use scan::find_files;
pub use traits::{LinkSource, Resolution, ShareProvider, SharedLink};
