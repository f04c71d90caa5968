//! ShareProvider trait definition
//!
//! This trait defines the two operations the link resolver needs from a
//! cloud-storage provider. It allows the CLI to be decoupled from the
//! specific HTTP client implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::ProviderPath;

/// A public shared link for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLink {
    /// Public URL of the link
    pub url: String,

    /// File name the link points to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Lowercased provider path of the linked file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_lower: Option<String>,

    /// Expiration time, if the link expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<jiff::Timestamp>,
}

impl SharedLink {
    /// Create a link carrying only a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            path_lower: None,
            expires: None,
        }
    }
}

/// Where a resolved link came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    /// The link was created by this run
    Created,
    /// The link already existed and was looked up
    Existing,
}

/// A successfully resolved link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub link: SharedLink,
    pub source: LinkSource,
}

/// Trait for providers that can hand out shared links
///
/// This trait is implemented by the Dropbox adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShareProvider: Send + Sync {
    /// Create a shared link with default settings
    ///
    /// Fails with `Error::LinkAlreadyExists` when the path already has one.
    async fn create_shared_link(&self, path: &ProviderPath) -> Result<SharedLink>;

    /// List existing shared links for a path
    async fn list_shared_links(
        &self,
        path: &ProviderPath,
        direct_only: bool,
    ) -> Result<Vec<SharedLink>>;
}
