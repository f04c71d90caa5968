//! Dropbox API request/response bodies and error classification

use serde::{Deserialize, Serialize};

use sharelink_core::{Error, ProviderPath, SharedLink};

/// Error tag Dropbox reports when a link for the path already exists
const ALREADY_EXISTS_TAG: &str = "shared_link_already_exists";

/// Body of `sharing/create_shared_link_with_settings`
#[derive(Debug, Serialize)]
pub(crate) struct CreateSharedLinkArg<'a> {
    pub path: &'a str,
}

/// Body of `sharing/list_shared_links`
#[derive(Debug, Serialize)]
pub(crate) struct ListSharedLinksArg<'a> {
    pub path: &'a str,
    pub direct_only: bool,
}

/// Shared link metadata as returned by the API
#[derive(Debug, Deserialize)]
pub(crate) struct SharedLinkMetadata {
    pub url: String,
    pub name: Option<String>,
    pub path_lower: Option<String>,
    pub expires: Option<jiff::Timestamp>,
}

impl From<SharedLinkMetadata> for SharedLink {
    fn from(meta: SharedLinkMetadata) -> Self {
        Self {
            url: meta.url,
            name: meta.name,
            path_lower: meta.path_lower,
            expires: meta.expires,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListSharedLinksResult {
    pub links: Vec<SharedLinkMetadata>,
    #[serde(default)]
    pub has_more: bool,
}

/// Error envelope used by Dropbox for endpoint-specific (409) and auth errors
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_summary: String,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ApiErrorBody {
    fn tag(&self) -> Option<&str> {
        self.error.as_ref()?.get(".tag")?.as_str()
    }
}

/// Map a failed API response onto the core error type
pub fn classify_error(status: u16, body: &str, path: &ProviderPath) -> Error {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let summary = parsed
        .as_ref()
        .map(|b| b.error_summary.clone())
        .unwrap_or_else(|| body.trim().to_string());
    let tag = parsed.as_ref().and_then(|b| b.tag()).map(str::to_string);

    match status {
        401 => Error::Auth(summary),
        403 => Error::Auth(format!("permission denied: {summary}")),
        429 => Error::RateLimited(summary),
        500..=599 => Error::Network(format!("server error {status}: {summary}")),
        409 => {
            let already_exists = tag.as_deref() == Some(ALREADY_EXISTS_TAG)
                || summary.starts_with(ALREADY_EXISTS_TAG);
            if already_exists {
                Error::LinkAlreadyExists(path.to_string())
            } else if tag.as_deref() == Some("path") || summary.starts_with("path/") {
                Error::NotFound(path.to_string())
            } else {
                Error::Api { tag, summary }
            }
        }
        _ => Error::Api {
            tag,
            summary: format!("HTTP {status}: {summary}"),
        },
    }
}
