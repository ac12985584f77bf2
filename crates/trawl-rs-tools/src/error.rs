//! Error taxonomy shared by the web search and fetch clients.

use thiserror::Error;

/// Reasons a URL is rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("unsupported scheme: only http/https allowed, got '{0}'")]
    UnsupportedScheme(String),
    #[error("missing domain")]
    MissingDomain,
    #[error("malformed URL: {0}")]
    Malformed(String),
}

/// Failures raised by the web clients.
///
/// Every variant is recoverable from the caller's point of view; the tools
/// render them into text or JSON instead of propagating them.
#[derive(Debug, Error)]
pub enum WebError {
    /// No bearer token could be resolved for the search backend.
    #[error("DashScope API key not configured. Set {env_var} in your environment variables.")]
    MissingCredential { env_var: String },
    #[error("URL validation failed: {0}")]
    InvalidUrl(#[from] UrlError),
    /// Final response carried a non-2xx status.
    #[error("HTTP error {status}: {context}")]
    HttpStatus { status: u16, context: String },
    /// Connection, timeout, redirect or body read failure.
    #[error("request error during {context}: {message}")]
    Request { context: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    /// The remote endpoint answered with a JSON-RPC error object.
    #[error("remote error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("no search operation advertised by the remote endpoint")]
    NoOperations,
    #[error("No search results found for query: {query}")]
    NoResults { query: String },
    /// The search payload could not be decoded; `raw` keeps the original text.
    #[error("Error parsing search results: Could not decode JSON response ({reason})\nRaw response: {raw}")]
    MalformedPayload { reason: String, raw: String },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("failed to initialize search session: {0}")]
    Handshake(Box<WebError>),
}

impl WebError {
    /// Build a transport error from a `reqwest` failure, keeping its cause chain.
    pub fn request(context: impl Into<String>, err: &reqwest::Error) -> Self {
        WebError::Request {
            context: context.into(),
            message: describe_error_chain(err),
        }
    }

    /// Render the error as the text handed back to the calling agent.
    pub fn to_agent_message(&self) -> String {
        match self {
            WebError::HttpStatus { status, .. } => {
                format!("HTTP error {status}: Failed to search the web")
            }
            WebError::Request { message, .. } => format!("Request error: {message}"),
            WebError::NoResults { .. } | WebError::MalformedPayload { .. } => self.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

/// Join an error with its sources, outermost first.
fn describe_error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
