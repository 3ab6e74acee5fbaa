//! Site configuration
//!
//! Loaded from `site.yaml` in the platform config directory, or from an
//! explicit path. A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::FileCache;
use crate::content::BLOG_PAGE_SIZE;
use crate::error::ConfigError;
use crate::geo::DEFAULT_TOPOLOGY_URL;

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "site.yaml";

/// Environment variable holding the contact site key
pub const DEFAULT_SITE_KEY_ENV: &str = "FRESHPOD_CONTACT_SECRET";

/// Site key sent when the environment variable is unset
pub const FALLBACK_SITE_KEY: &str = "freshpod_secure_2026";

/// Minimum gap between successful contact submissions
pub const DEFAULT_RATE_LIMIT_SECONDS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public site origin, used for canonical links
    pub site_url: String,

    pub contact: ContactConfig,

    pub map: MapConfig,

    pub catalog: CatalogConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "https://freshpod.in".to_string(),
            contact: ContactConfig::default(),
            map: MapConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Form relay endpoint
    pub endpoint: String,

    /// Environment variable holding the site key
    pub site_key_env: String,

    pub rate_limit_seconds: u64,

    pub timeout_seconds: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://freshpod.in/api/contact".to_string(),
            site_key_env: DEFAULT_SITE_KEY_ENV.to_string(),
            rate_limit_seconds: DEFAULT_RATE_LIMIT_SECONDS,
            timeout_seconds: 30,
        }
    }
}

impl ContactConfig {
    /// Site key from the environment, or the built-in fallback
    pub fn site_key(&self) -> String {
        std::env::var(&self.site_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_SITE_KEY.to_string())
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_secs(self.rate_limit_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub topology_url: String,

    /// How long a fetched topology stays fresh
    pub cache_ttl_minutes: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            topology_url: DEFAULT_TOPOLOGY_URL.to_string(),
            cache_ttl_minutes: 24 * 60,
        }
    }
}

impl MapConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub blog_page_size: usize,

    /// `None` shows every gallery match on one page
    pub gallery_page_size: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            blog_page_size: BLOG_PAGE_SIZE,
            gallery_page_size: None,
        }
    }
}

impl SiteConfig {
    /// Load from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(&Self::default_config_path()?)
    }

    /// Load from a specific path; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No site config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        tracing::debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Write the config as YAML, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context;

        let content =
            serde_yaml_ng::to_string(self).context("Failed to serialize site config")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write site config: {}", path.display()))?;

        Ok(())
    }

    /// Reject values the site cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.contact.endpoint.starts_with("http://")
            && !self.contact.endpoint.starts_with("https://")
        {
            return Err(ConfigError::Invalid(
                "contact.endpoint must start with http:// or https://".to_string(),
            ));
        }

        if self.contact.site_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "contact.site_key_env cannot be empty".to_string(),
            ));
        }

        if self.contact.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "contact.timeout_seconds must be at least 1".to_string(),
            ));
        }

        if self.catalog.blog_page_size == 0 {
            return Err(ConfigError::Invalid(
                "catalog.blog_page_size must be at least 1".to_string(),
            ));
        }

        if self.catalog.gallery_page_size == Some(0) {
            return Err(ConfigError::Invalid(
                "catalog.gallery_page_size must be at least 1 (omit it to show all images)"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Platform config directory (`~/.config/freshpod` on Linux)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("in", "freshpod", "freshpod")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("freshpod")))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Cache directory used for the topology and the contact limiter
    pub fn cache_dir() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("cache"))
    }

    pub fn file_cache() -> Result<FileCache, ConfigError> {
        Ok(FileCache::new(Self::cache_dir()?))
    }
}
