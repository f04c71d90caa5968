//! Dropbox client implementation
//!
//! Talks to the Dropbox v2 HTTP API with reqwest and implements the
//! ShareProvider trait from sharelink-core.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use sharelink_core::{Error, ProviderPath, Result, Settings, ShareProvider, SharedLink};

use crate::wire::{
    classify_error, CreateSharedLinkArg, ListSharedLinksArg, ListSharedLinksResult,
    SharedLinkMetadata,
};

const USER_AGENT: &str = concat!("sharelink/", env!("CARGO_PKG_VERSION"));

/// Dropbox API client
pub struct DropboxClient {
    http: reqwest::Client,
    api_base: Url,
    token: String,
}

impl DropboxClient {
    /// Create a new client for the given access token and API base URL
    pub fn new(token: impl Into<String>, api_base: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base,
            token: token.into(),
        })
    }

    /// Create a client from resolved settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.access_token.clone(), settings.api_base.clone())
    }

    /// Full URL of an RPC route such as `sharing/list_shared_links`
    fn endpoint(&self, route: &str) -> String {
        format!("{}/{route}", self.api_base.as_str().trim_end_matches('/'))
    }

    /// POST a JSON argument to an RPC route and decode the JSON result
    async fn rpc<A, R>(&self, route: &str, arg: &A, path: &ProviderPath) -> Result<R>
    where
        A: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(route);
        tracing::debug!(%url, %path, "Dropbox API call");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(arg)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if let Some(retry_after) = response.headers().get(RETRY_AFTER) {
            tracing::debug!(retry_after = ?retry_after, "Dropbox asked to retry later");
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body, path));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ShareProvider for DropboxClient {
    async fn create_shared_link(&self, path: &ProviderPath) -> Result<SharedLink> {
        let arg = CreateSharedLinkArg {
            path: path.as_str(),
        };
        let meta: SharedLinkMetadata = self
            .rpc("sharing/create_shared_link_with_settings", &arg, path)
            .await?;
        Ok(meta.into())
    }

    async fn list_shared_links(
        &self,
        path: &ProviderPath,
        direct_only: bool,
    ) -> Result<Vec<SharedLink>> {
        let arg = ListSharedLinksArg {
            path: path.as_str(),
            direct_only,
        };
        let result: ListSharedLinksResult =
            self.rpc("sharing/list_shared_links", &arg, path).await?;

        if result.has_more {
            tracing::debug!(%path, "More shared links available, using the first page only");
        }

        Ok(result.links.into_iter().map(SharedLink::from).collect())
    }
}
