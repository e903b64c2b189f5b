//! Pager configuration
//!
//! Settings shared by every listing request, loadable from a YAML file:
//!
//! ```yaml
//! base_url: https://oauth.reddit.com
//! user_agent: "script:my-bot:v0.1 (by /u/someone)"
//! timeout_secs: 15
//! page_size: 100
//! default_limit: null   # unbounded
//! headers:
//!   Authorization: "bearer abc"
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use crate::pagination::{Fetch, ListingGenerator, DEFAULT_ITEM_LIMIT, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default listing host
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Settings for the HTTP fetcher and the generators built on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Base URL relative listing paths resolve against
    pub base_url: String,

    /// User agent; the crate's own when unset
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size hint sent when a generator has no item limit
    pub page_size: usize,

    /// Item limit for new generators; `null` means unbounded
    pub default_limit: Option<usize>,

    /// Headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            default_limit: Some(DEFAULT_ITEM_LIMIT),
            headers: HashMap::new(),
        }
    }
}

impl PagerConfig {
    /// Load and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML config string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.page_size == 0 {
            return Err(Error::config("page_size must be greater than zero"));
        }

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// HTTP client settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Create a generator for `path` using this config's limit and page size
    pub fn generator<F: Fetch>(&self, fetcher: F, path: impl Into<String>) -> ListingGenerator<F> {
        ListingGenerator::new(fetcher, path)
            .with_default_page_size(self.page_size)
            .with_limit(self.default_limit)
    }
}
