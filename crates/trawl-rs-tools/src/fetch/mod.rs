//! URL fetching with readable-content extraction.
//!
//! Every call validates the URL, performs one GET with bounded redirects,
//! dispatches on content type, and truncates the text to a character budget.
//! Failures are reported as `FetchOutput::Failure` instead of raised.

pub mod markdown;
pub mod readability;
pub mod url;

use crate::WebError;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use trawl_rs_config::WebFetchConfig;
use trawl_rs_protocol::{ExtractMode, Extractor, FetchFailure, FetchOutput, FetchResult};

pub use markdown::HtmlRules;
pub use readability::{ReadableDocument, Readability};
pub use self::url::validate_url;

/// Prefix length inspected when the content type does not announce HTML.
const SNIFF_CHARS: usize = 256;

/// Fetch client; holds no per-call state.
#[derive(Debug)]
pub struct WebFetcher {
    config: WebFetchConfig,
    http: reqwest::Client,
    rules: HtmlRules,
    readability: Readability,
}

impl WebFetcher {
    pub fn new(config: WebFetchConfig) -> Result<Self, WebError> {
        let http = reqwest::Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| WebError::Client(err.to_string()))?;
        Ok(Self {
            config,
            http,
            rules: HtmlRules::new()?,
            readability: Readability::new()?,
        })
    }

    pub fn config(&self) -> &WebFetchConfig {
        &self.config
    }

    /// Effective character budget; `None` or zero falls back to the config.
    pub fn char_budget(&self, max_chars: Option<usize>) -> usize {
        max_chars
            .filter(|budget| *budget > 0)
            .unwrap_or(self.config.max_chars)
    }

    /// Fetch a URL and extract its text.
    pub async fn fetch(
        &self,
        url: &str,
        mode: ExtractMode,
        max_chars: Option<usize>,
    ) -> FetchOutput {
        let budget = self.char_budget(max_chars);
        info!(
            "web fetch (url_len={}, mode={:?}, max_chars={})",
            url.len(),
            mode,
            budget
        );
        match self.try_fetch(url, mode, budget).await {
            Ok(result) => FetchOutput::Success(result),
            Err(err) => {
                warn!("web fetch failed (url_len={}, error={})", url.len(), err);
                FetchOutput::Failure(FetchFailure {
                    error: err.to_string(),
                    url: url.to_string(),
                })
            }
        }
    }

    async fn try_fetch(
        &self,
        url: &str,
        mode: ExtractMode,
        budget: usize,
    ) -> Result<FetchResult, WebError> {
        let target = validate_url(url)?;
        let response = self
            .http
            .get(target)
            .send()
            .await
            .map_err(|err| WebError::request("fetch", &err))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(WebError::HttpStatus {
                status: status.as_u16(),
                context: format!("failed to fetch {final_url}"),
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        let body = response
            .text()
            .await
            .map_err(|err| WebError::request("fetch", &err))?;

        let (text, extractor) = self.extract(&content_type, &body, mode)?;
        let (text, truncated) = truncate_chars(text, budget);
        debug!(
            "web fetch extracted (extractor={}, truncated={})",
            extractor, truncated
        );
        Ok(FetchResult {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            extractor,
            truncated,
            length: text.chars().count(),
            text,
        })
    }

    /// Turn a response body into text according to its content type.
    pub fn extract(
        &self,
        content_type: &str,
        body: &str,
        mode: ExtractMode,
    ) -> Result<(String, Extractor), WebError> {
        if content_type.contains("application/json") {
            let value: Value = serde_json::from_str(body)
                .map_err(|err| WebError::Extraction(format!("invalid JSON body: {err}")))?;
            let text = serde_json::to_string_pretty(&value)
                .map_err(|err| WebError::Extraction(err.to_string()))?;
            return Ok((text, Extractor::Json));
        }
        if content_type.contains("text/html") || looks_like_html(body) {
            let document = self.readability.extract(body, &self.rules)?;
            let content = match mode {
                ExtractMode::Markdown => self.rules.to_markdown(&document.content_html),
                ExtractMode::Text => self.rules.to_text(&document.content_html),
            };
            let text = match document.title {
                Some(title) => format!("# {title}\n\n{content}"),
                None => content,
            };
            return Ok((text, Extractor::Readability));
        }
        Ok((body.to_string(), Extractor::Raw))
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body
        .chars()
        .take(SNIFF_CHARS)
        .collect::<String>()
        .to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Keep at most `budget` characters; reports whether anything was cut.
fn truncate_chars(text: String, budget: usize) -> (String, bool) {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => (text[..cut].to_string(), true),
        None => (text, false),
    }
}
