//! Configuration management
//!
//! This module handles loading the sharelink configuration file and
//! resolving it together with environment overrides into the `Settings`
//! value used by a run. The file is stored in TOML format at
//! ~/.config/sharelink/config.toml.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Token value that means "not configured"
pub const PLACEHOLDER_TOKEN: &str = "PASTE_YOUR_ACCESS_TOKEN_HERE";

/// Environment variable holding the Dropbox access token
pub const TOKEN_ENV: &str = "DROPBOX_ACCESS_TOKEN";

/// Shown instead of running when no access token is configured
pub const MISSING_TOKEN_MESSAGE: &str = "Please set your Dropbox access token in the config \
     file or via the DROPBOX_ACCESS_TOKEN environment variable.";

/// Environment variable overriding the directory to scan
pub const LOCAL_DIR_ENV: &str = "SHARELINK_LOCAL_DIR";

/// Environment variable overriding the local Dropbox root
pub const DROPBOX_ROOT_ENV: &str = "SHARELINK_DROPBOX_ROOT";

/// Default Dropbox API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.dropboxapi.com/2";

/// Default file extension to look for
const DEFAULT_EXTENSION: &str = "mp3";

/// On-disk configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Dropbox access token (the environment variable takes precedence)
    #[serde(default)]
    pub access_token: Option<String>,

    /// Directory to scan for files
    #[serde(default)]
    pub local_dir: Option<PathBuf>,

    /// Local directory the Dropbox client syncs to
    #[serde(default)]
    pub dropbox_root: Option<PathBuf>,

    /// File extensions to share, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Dropbox API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            access_token: None,
            local_dir: None,
            dropbox_root: None,
            extensions: default_extensions(),
            api_base: default_api_base(),
        }
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("sharelink").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. \
                 Please upgrade sharelink.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }
}

/// Fully resolved settings for one run
#[derive(Clone)]
pub struct Settings {
    pub access_token: String,
    pub local_dir: PathBuf,
    pub dropbox_root: PathBuf,
    pub extensions: Vec<String>,
    pub api_base: Url,
}

impl Settings {
    /// Resolve settings from the config file and the process environment
    pub fn from_env(config: Config) -> Result<Self> {
        Self::resolve(config, |key| std::env::var(key).ok())
    }

    /// Resolve settings, with `env` looked up before the file values
    ///
    /// Empty environment values are treated as unset.
    pub fn resolve(config: Config, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let access_token = lookup(TOKEN_ENV)
            .or(config.access_token)
            .unwrap_or_else(|| PLACEHOLDER_TOKEN.to_string());

        let dropbox_root = match lookup(DROPBOX_ROOT_ENV)
            .map(PathBuf::from)
            .or(config.dropbox_root)
        {
            Some(root) => root,
            None => dirs::home_dir()
                .map(|home| home.join("Dropbox"))
                .ok_or_else(|| {
                    Error::Config(format!(
                        "Could not determine the Dropbox folder; set {DROPBOX_ROOT_ENV}"
                    ))
                })?,
        };

        let local_dir = lookup(LOCAL_DIR_ENV)
            .map(PathBuf::from)
            .or(config.local_dir)
            .unwrap_or_else(|| dropbox_root.clone());

        let api_base = Url::parse(&config.api_base)?;

        Ok(Self {
            access_token,
            local_dir,
            dropbox_root,
            extensions: config.extensions,
            api_base,
        })
    }

    /// Whether a real access token was supplied
    pub fn has_token(&self) -> bool {
        let token = self.access_token.trim();
        !token.is_empty() && token != PLACEHOLDER_TOKEN
    }

    /// Check that the settings are usable before any work is done
    ///
    /// The token is checked separately with `has_token`.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(Error::Config("No file extensions configured".into()));
        }

        if !self.local_dir.starts_with(&self.dropbox_root) {
            tracing::warn!(
                local_dir = %self.local_dir.display(),
                dropbox_root = %self.dropbox_root.display(),
                "Scan directory is outside the Dropbox root; links will fail"
            );
        }

        Ok(())
    }

    /// Directory to scan
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("access_token", &"<redacted>")
            .field("local_dir", &self.local_dir)
            .field("dropbox_root", &self.dropbox_root)
            .field("extensions", &self.extensions)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, PathBuf, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path.clone());
        (manager, config_path, temp_dir)
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn config_with_root(root: &str) -> Config {
        Config {
            dropbox_root: Some(PathBuf::from(root)),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.extensions, vec!["mp3"]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _path, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_load_full_file() {
        let (manager, path, _temp_dir) = temp_config_manager();
        std::fs::write(
            &path,
            r#"
            schema_version = 1
            access_token = "sl.file-token"
            local_dir = "/Users/alice/Dropbox/OTE 2024"
            dropbox_root = "/Users/alice/Dropbox"
            extensions = ["mp3", "m4a"]
            api_base = "http://localhost:8080/2"
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.access_token.as_deref(), Some("sl.file-token"));
        assert_eq!(
            config.local_dir,
            Some(PathBuf::from("/Users/alice/Dropbox/OTE 2024"))
        );
        assert_eq!(config.dropbox_root, Some(PathBuf::from("/Users/alice/Dropbox")));
        assert_eq!(config.extensions, vec!["mp3", "m4a"]);
        assert_eq!(config.api_base, "http://localhost:8080/2");
    }

    #[test]
    fn test_load_malformed_file() {
        let (manager, path, _temp_dir) = temp_config_manager();
        std::fs::write(&path, "schema_version = \"one\"\n").unwrap();

        assert!(matches!(manager.load(), Err(Error::TomlParse(_))));
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let (manager, path, _temp_dir) = temp_config_manager();
        std::fs::write(
            &path,
            "schema_version = 1\ndropbox_root = \"/data/Dropbox\"\n",
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.dropbox_root, Some(PathBuf::from("/data/Dropbox")));
        assert_eq!(config.extensions, vec!["mp3"]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, path, _temp_dir) = temp_config_manager();

        let content = format!("schema_version = {}\n", SCHEMA_VERSION + 1);
        std::fs::write(&path, content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("newer than supported"));
    }

    #[test]
    fn test_resolve_env_overrides_file() {
        let config = Config {
            access_token: Some("from-file".into()),
            ..config_with_root("/data/Dropbox")
        };
        let env = env_of(&[
            (TOKEN_ENV, "from-env"),
            (LOCAL_DIR_ENV, "/data/Dropbox/Music"),
        ]);

        let settings = Settings::resolve(config, env).unwrap();
        assert_eq!(settings.access_token, "from-env");
        assert_eq!(settings.local_dir, PathBuf::from("/data/Dropbox/Music"));
        assert_eq!(settings.dropbox_root, PathBuf::from("/data/Dropbox"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(config_with_root("/data/Dropbox"), env_of(&[])).unwrap();
        assert_eq!(settings.access_token, PLACEHOLDER_TOKEN);
        assert_eq!(settings.local_dir, settings.dropbox_root);
        assert_eq!(settings.api_base.as_str(), "https://api.dropboxapi.com/2");
    }

    #[test]
    fn test_resolve_empty_env_is_unset() {
        let config = Config {
            access_token: Some("from-file".into()),
            ..config_with_root("/data/Dropbox")
        };
        let settings = Settings::resolve(config, env_of(&[(TOKEN_ENV, "")])).unwrap();
        assert_eq!(settings.access_token, "from-file");
    }

    #[test]
    fn test_resolve_invalid_api_base() {
        let config = Config {
            api_base: "not a url".into(),
            ..config_with_root("/data/Dropbox")
        };
        let result = Settings::resolve(config, env_of(&[]));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_placeholder_token_is_not_a_token() {
        let settings = Settings::resolve(config_with_root("/data/Dropbox"), env_of(&[])).unwrap();
        assert!(!settings.has_token());
        assert!(MISSING_TOKEN_MESSAGE.contains(TOKEN_ENV));

        let settings =
            Settings::resolve(config_with_root("/data/Dropbox"), env_of(&[(TOKEN_ENV, "  ")]))
                .unwrap();
        assert!(!settings.has_token());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let config = Config {
            extensions: vec![],
            ..config_with_root("/data/Dropbox")
        };
        let settings = Settings::resolve(config, env_of(&[(TOKEN_ENV, "token")])).unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_real_token() {
        let settings =
            Settings::resolve(config_with_root("/data/Dropbox"), env_of(&[(TOKEN_ENV, "sl.abc")]))
                .unwrap();
        assert!(settings.has_token());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let settings = Settings::resolve(
            config_with_root("/data/Dropbox"),
            env_of(&[(TOKEN_ENV, "sl.secret")]),
        )
        .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("sl.secret"));
        assert!(debug.contains("<redacted>"));
    }
}
