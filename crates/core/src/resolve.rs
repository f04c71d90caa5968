//! Link resolution
//!
//! Creating a shared link is not idempotent on the provider side: a second
//! create for the same path fails with "already exists". The resolver turns
//! that into a lookup so callers always get the path's link back.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::path::ProviderPath;
use crate::traits::{LinkSource, Resolution, ShareProvider};

/// Obtain a shared link for `path`, creating one if none exists
pub async fn resolve_link(
    provider: &(impl ShareProvider + ?Sized),
    path: &ProviderPath,
) -> Result<Resolution> {
    match provider.create_shared_link(path).await {
        Ok(link) => {
            tracing::debug!(%path, url = %link.url, "Created shared link");
            Ok(Resolution {
                link,
                source: LinkSource::Created,
            })
        }
        Err(Error::LinkAlreadyExists(_)) => {
            tracing::debug!(%path, "Shared link already exists, looking it up");
            let links = provider.list_shared_links(path, true).await?;
            match links.into_iter().next() {
                Some(link) => Ok(Resolution {
                    link,
                    source: LinkSource::Existing,
                }),
                None => Err(Error::NoLinkFound(path.to_string())),
            }
        }
        Err(e) => {
            tracing::debug!(%path, error = %e, "Failed to create shared link");
            Err(e)
        }
    }
}

/// One output record: a local file and the outcome of resolving its link
#[derive(Debug, Clone, Serialize)]
pub struct LinkReport {
    pub local_path: String,
    pub provider_path: ProviderPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LinkSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl LinkReport {
    /// Build a report from a resolver result
    pub fn from_result(
        local_path: &Path,
        provider_path: ProviderPath,
        result: &Result<Resolution>,
    ) -> Self {
        let local_path = local_path.display().to_string();
        match result {
            Ok(resolution) => Self {
                local_path,
                provider_path,
                url: Some(resolution.link.url.clone()),
                source: Some(resolution.source),
                error: None,
                error_kind: None,
            },
            Err(e) => Self {
                local_path,
                provider_path,
                url: None,
                source: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind()),
            },
        }
    }

    /// Whether the link was resolved
    pub fn is_ok(&self) -> bool {
        self.url.is_some()
    }
}

impl std::fmt::Display for LinkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.url, &self.error) {
            (Some(url), _) => write!(f, "{} -> {url}", self.local_path),
            (None, Some(error)) => write!(f, "{} -> ERROR: {error}", self.local_path),
            (None, None) => write!(f, "{} -> ERROR: unknown", self.local_path),
        }
    }
}
