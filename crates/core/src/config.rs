//! Configuration file parsing for .artefactum.toml

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

/// Name of the configuration file looked up by [`ArtefactumConfig::find_and_load`].
pub const CONFIG_FILENAME: &str = ".artefactum.toml";

pub const ENV_API_URL: &str = "ARTEFACTUM_API_URL";
pub const ENV_API_SECRET: &str = "ARTEFACTUM_API_SECRET";

/// Main configuration structure for .artefactum.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtefactumConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// License check endpoint
    #[serde(default = "default_api_url")]
    pub url: String,

    /// Shared secret for request tokens. Can also be set via ARTEFACTUM_API_SECRET
    #[serde(default)]
    pub secret: String,

    /// Identity sent when the caller has no email of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_email: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a fetched record is served without asking the server again
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Login exempt from all blocking
    #[serde(default = "default_super_admin")]
    pub super_admin: String,

    /// Days after expiry during which access stays open with a critical notice
    #[serde(default = "default_grace_days")]
    pub grace_days: u32,

    /// Days before expiry during which a warning is shown
    #[serde(default = "default_warning_days")]
    pub warning_days: u32,
}

// Default functions
fn default_api_url() -> String {
    "https://my.artefactum.sk/wp-json/artefactum/v1/licence-check".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("Artefactum-Client/{}", crate::VERSION)
}

fn default_ttl_hours() -> u64 {
    4
}

fn default_super_admin() -> String {
    "artefactum".to_string()
}

fn default_grace_days() -> u32 {
    28
}

fn default_warning_days() -> u32 {
    30
}

impl Default for ArtefactumConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty TOML should parse to defaults")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            secret: String::new(),
            default_email: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            super_admin: default_super_admin(),
            grace_days: default_grace_days(),
            warning_days: default_warning_days(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    /// Saturates instead of overflowing for absurdly large `ttl_hours`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }
}

impl ArtefactumConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ArtefactumConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .artefactum.toml from the current directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self, ConfigError> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `ARTEFACTUM_API_URL` / `ARTEFACTUM_API_SECRET` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_API_URL) {
            self.api.url = url;
        }
        if let Some(secret) = non_empty(ENV_API_SECRET) {
            self.api.secret = secret;
        }
        self
    }

    /// Checks the settings a license check cannot work without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("api.url must not be empty".into()));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "api.url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.api.secret.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "api.secret is not set (use .artefactum.toml or {ENV_API_SECRET})"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.cache.ttl_hours == 0 {
            return Err(ConfigError::Invalid(
                "cache.ttl_hours must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
