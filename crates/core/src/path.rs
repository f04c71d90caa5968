//! Path mapping between the local Dropbox folder and the Dropbox namespace
//!
//! The Dropbox desktop client mirrors the account under a local directory
//! (the "Dropbox root"). A file at `<root>/Music/song.mp3` is addressed by the
//! API as `/Music/song.mp3`, and the root itself as the empty string.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// A path in the provider's namespace (e.g. `/Music/song.mp3`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderPath(String);

impl ProviderPath {
    /// Create a new ProviderPath from an already-translated string
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The provider root (`""` in the Dropbox API)
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the provider root
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ProviderPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProviderPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Translate a local file path into the provider namespace
///
/// The local root is stripped as an anchored, component-aware prefix, and the
/// remainder is rendered with `/` separators and a leading `/`. If `local_root`
/// is not a prefix of `local_path`, the local path is passed through unchanged;
/// the provider will then reject it for that one file.
pub fn map_to_provider(local_path: &Path, local_root: &Path) -> ProviderPath {
    match local_path.strip_prefix(local_root) {
        Ok(relative) => {
            let mut mapped = String::new();
            for component in relative.components() {
                if let Component::Normal(part) = component {
                    mapped.push('/');
                    mapped.push_str(&part.to_string_lossy());
                }
            }
            ProviderPath(mapped)
        }
        Err(_) => {
            tracing::warn!(
                path = %local_path.display(),
                root = %local_root.display(),
                "Path is not under the Dropbox root, passing it through unchanged"
            );
            ProviderPath(local_path.to_string_lossy().into_owned())
        }
    }
}
