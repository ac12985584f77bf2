//! `web_search` and `web_fetch` tools.

use crate::builtins::utils::parse_args;
use crate::fetch::WebFetcher;
use crate::search::SearchClient;
use crate::{Tool, ToolContext, WebError};
use async_trait::async_trait;
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trawl_rs_config::{MIN_FETCH_CHARS, WebFetchConfig, WebSearchConfig};
use trawl_rs_protocol::{ExtractMode, ToolError};

/// Searches the web through the remote search backend.
#[derive(Debug, Clone)]
pub struct WebSearchTool {
    client: Arc<SearchClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &WebSearchConfig) -> Result<Self, WebError> {
        Ok(Self::new(Arc::new(SearchClient::new(config.clone())?)))
    }

    pub fn client(&self) -> &Arc<SearchClient> {
        &self.client
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web. Returns titles, URLs, and snippets."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" },
                "count": {
                    "type": "integer",
                    "description": "Results (1-10)",
                    "minimum": 1,
                    "maximum": 10,
                },
            },
            "required": ["query"],
        })
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: WebSearchArgs = parse_args(args)?;
        info!(
            "web_search called (caller={}, query_len={}, count={:?})",
            ctx.log_label(),
            input.query.len(),
            input.count
        );
        let text = self.client.execute(&input.query, input.count).await;
        Ok(Value::String(text))
    }
}

/// Fetches a URL and extracts readable content.
#[derive(Debug, Clone)]
pub struct WebFetchTool {
    fetcher: Arc<WebFetcher>,
}

impl WebFetchTool {
    pub fn new(fetcher: Arc<WebFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn from_config(config: &WebFetchConfig) -> Result<Self, WebError> {
        Ok(Self::new(Arc::new(WebFetcher::new(config.clone())?)))
    }
}

#[async_trait]
impl Tool for WebFetchTool {
    fn name(&self) -> &str {
        "web_fetch"
    }

    fn description(&self) -> &str {
        "Fetch URL and extract readable content (HTML → markdown/text)."
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "URL to fetch" },
                "extractMode": {
                    "type": "string",
                    "enum": ["markdown", "text"],
                    "default": "markdown",
                },
                "maxChars": { "type": "integer", "minimum": MIN_FETCH_CHARS },
            },
            "required": ["url"],
        })
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        let input: WebFetchArgs = parse_args(args)?;
        let mode = resolve_extract_mode(
            input.extract_mode.as_deref(),
            self.fetcher.config().extract_mode,
        );
        info!(
            "web_fetch called (caller={}, url_len={}, mode={:?})",
            ctx.log_label(),
            input.url.len(),
            mode
        );
        let output = self.fetcher.fetch(&input.url, mode, input.max_chars).await;
        Ok(output.to_value())
    }
}

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
    #[serde(default)]
    count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebFetchArgs {
    url: String,
    #[serde(default)]
    extract_mode: Option<String>,
    #[serde(default)]
    max_chars: Option<usize>,
}

/// Only `"markdown"` selects markdown; any other value means plain text.
fn resolve_extract_mode(requested: Option<&str>, default_mode: ExtractMode) -> ExtractMode {
    match requested {
        None => default_mode,
        Some("markdown") => ExtractMode::Markdown,
        Some(_) => ExtractMode::Text,
    }
}
