//! Configuration schema for Trawl.

use serde::{Deserialize, Serialize};
use std::fmt;
pub use trawl_rs_protocol::ExtractMode;

/// Default remote search endpoint (DashScope WebSearch over MCP).
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://dashscope.aliyuncs.com/api/v1/mcps/WebSearch/mcp";
/// Environment variable consulted when no explicit key is configured.
pub const DEFAULT_API_KEY_ENV: &str = "DASHSCOPE_API_KEY";
/// Browser-like user agent sent by the fetch tool.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_7_2) AppleWebKit/537.36";
/// Upper bound for the search result count.
pub const MAX_SEARCH_RESULTS: usize = 10;
/// Lower bound for the fetch character budget.
pub const MIN_FETCH_CHARS: usize = 100;

/// Root config for Trawl.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrawlConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub web: WebConfig,
}

impl TrawlConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> TrawlConfigBuilder {
        TrawlConfigBuilder::new()
    }
}

/// Builder for assembling a `TrawlConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct TrawlConfigBuilder {
    config: TrawlConfig,
}

impl TrawlConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: TrawlConfig::default(),
        }
    }

    /// Replace the search tool configuration.
    pub fn search(mut self, search: WebSearchConfig) -> Self {
        self.config.web.search = search;
        self
    }

    /// Replace the fetch tool configuration.
    pub fn fetch(mut self, fetch: WebFetchConfig) -> Self {
        self.config.web.fetch = fetch;
        self
    }

    /// Finalize and return the built `TrawlConfig`.
    pub fn build(self) -> TrawlConfig {
        self.config
    }
}

/// Settings shared by the web tools.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebConfig {
    #[serde(default)]
    pub search: WebSearchConfig,
    #[serde(default)]
    pub fetch: WebFetchConfig,
}

/// Remote search backend settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Explicit bearer token; takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Result count used when the caller does not ask for one.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_client_version")]
    pub client_version: String,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_search_endpoint(),
            api_key: None,
            api_key_env: default_api_key_env(),
            max_results: default_max_results(),
            timeout_secs: default_timeout_secs(),
            protocol_version: default_protocol_version(),
            client_name: default_client_name(),
            client_version: default_client_version(),
        }
    }
}

impl fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("max_results", &self.max_results)
            .field("timeout_secs", &self.timeout_secs)
            .field("protocol_version", &self.protocol_version)
            .field("client_name", &self.client_name)
            .field("client_version", &self.client_version)
            .finish()
    }
}

/// URL fetch and extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebFetchConfig {
    /// Character budget for the returned text.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub extract_mode: ExtractMode,
}

impl Default for WebFetchConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            max_redirects: default_max_redirects(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            extract_mode: ExtractMode::default(),
        }
    }
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_max_results() -> usize {
    MAX_SEARCH_RESULTS
}

/// Network timeout shared by both tools.
fn default_timeout_secs() -> u64 {
    30
}

fn default_protocol_version() -> String {
    "2024-11-05".to_string()
}

fn default_client_name() -> String {
    "trawl-web-search".to_string()
}

fn default_client_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_max_chars() -> usize {
    50_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
