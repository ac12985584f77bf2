//! Payload and output shapes for the web search and fetch tools.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// One search hit inside the remote search payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default = "default_page_title")]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

fn default_page_title() -> String {
    "No Title".to_string()
}

/// JSON object carried inside the first text block of a search reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub pages: Vec<SearchPage>,
}

/// How HTML content is rendered by the fetch tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    #[default]
    Markdown,
    Text,
}

/// Which transformation path produced a fetch result's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extractor {
    Json,
    Readability,
    Raw,
}

impl Extractor {
    /// Wire tag for the extractor.
    pub fn as_str(self) -> &'static str {
        match self {
            Extractor::Json => "json",
            Extractor::Readability => "readability",
            Extractor::Raw => "raw",
        }
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful fetch artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// URL as requested by the caller.
    pub url: String,
    /// URL after following redirects.
    pub final_url: String,
    /// Final HTTP status code.
    pub status: u16,
    pub extractor: Extractor,
    /// Whether `text` was cut to the character budget.
    pub truncated: bool,
    /// Length of `text` in characters.
    pub length: usize,
    pub text: String,
}

/// Failed fetch, reported instead of raising.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub error: String,
    pub url: String,
}

/// Either shape the fetch tool emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchOutput {
    Success(FetchResult),
    Failure(FetchFailure),
}

impl FetchOutput {
    /// Render as a JSON object with a stable key order.
    pub fn to_value(&self) -> Value {
        match self {
            FetchOutput::Success(result) => json!({
                "url": result.url,
                "finalUrl": result.final_url,
                "status": result.status,
                "extractor": result.extractor.as_str(),
                "truncated": result.truncated,
                "length": result.length,
                "text": result.text,
            }),
            FetchOutput::Failure(failure) => json!({
                "error": failure.error,
                "url": failure.url,
            }),
        }
    }

    /// Render as compact JSON text; non-ASCII characters are kept unescaped.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    /// Whether this output reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutput::Failure(_))
    }
}
