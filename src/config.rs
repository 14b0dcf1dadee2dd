//! Tap configuration
//!
//! The configuration file is a flat JSON object. Every key is optional
//! and the defaults point at the `degreed_dpt1` implementation tenant, so a config holding
//! just `username` and `password` is enough for a run.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Records requested per page (`Response_Filter.Count`)
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Upper bound on pages requested in a single extract
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

// ============================================================================
// Tap Config
// ============================================================================

/// Configuration for a tap run
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Integration system user name
    #[serde(default)]
    pub username: Option<String>,

    /// Integration system user password
    #[serde(default)]
    pub password: Option<String>,

    /// Tenant host, e.g. `https://wd2-impl-services1.workday.com`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tenant name in the service path
    #[serde(default = "default_tenant")]
    pub tenant: String,

    /// Human_Resources service version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Safety cap on the number of pages requested
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://impl-services1.wd12.myworkday.com".to_string()
}

fn default_tenant() -> String {
    "degreed_dpt1".to_string()
}

fn default_api_version() -> String {
    "v39.2".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            base_url: default_base_url(),
            tenant: default_tenant(),
            api_version: default_api_version(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TapConfig {
    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::InvalidConfigValue {
                field: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_pages == 0 {
            return Err(Error::InvalidConfigValue {
                field: "max_pages".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Url::parse(&self.base_url)?;
        Ok(())
    }

    /// Full Human_Resources service URL
    pub fn endpoint(&self) -> Result<String> {
        let base = Url::parse(&self.base_url)?;
        let path = format!(
            "ccx/service/{}/Human_Resources/{}",
            self.tenant, self.api_version
        );
        let base = if base.path().ends_with('/') {
            base
        } else {
            Url::parse(&format!("{base}/"))?
        };
        Ok(base.join(&path)?.to_string())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether both credentials are present and non-empty
    pub fn has_credentials(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.username) && present(&self.password)
    }

    /// JSON Schema describing this config, as printed by `--about`
    pub fn config_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "username": { "type": ["string", "null"], "description": "username" },
                "password": { "type": ["string", "null"], "description": "password", "secret": true },
                "base_url": { "type": "string", "default": default_base_url() },
                "tenant": { "type": "string", "default": default_tenant() },
                "api_version": { "type": "string", "default": default_api_version() },
                "page_size": { "type": "integer", "minimum": 1, "default": DEFAULT_PAGE_SIZE },
                "max_pages": { "type": "integer", "minimum": 1, "default": DEFAULT_MAX_PAGES },
                "timeout_secs": { "type": "integer", "minimum": 1, "default": default_timeout_secs() }
            },
            "required": []
        })
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("base_url", &self.base_url)
            .field("tenant", &self.tenant)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
