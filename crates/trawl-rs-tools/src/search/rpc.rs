//! JSON-RPC over HTTP POST for the remote search endpoint.
//!
//! Replies may arrive as plain JSON or as a `text/event-stream` body whose
//! `data:` lines carry the JSON-RPC message.

use crate::WebError;
use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use trawl_rs_protocol::{JsonRpcRequest, JsonRpcResponse};

/// Header carrying the remote-assigned session id.
pub const SESSION_ID_HEADER: &str = "Mcp-Session-Id";
const ACCEPT_VALUE: &str = "application/json, text/event-stream";
const EVENT_STREAM: &str = "text/event-stream";

/// Per-request credentials and session binding.
#[derive(Debug, Clone, Copy)]
pub struct RpcAuth<'a> {
    pub api_key: &'a str,
    pub session_id: Option<&'a str>,
}

/// Successful reply payload plus the session id header, if any.
#[derive(Debug, Clone)]
pub struct RpcReply {
    pub result: Value,
    pub session_id: Option<String>,
}

/// Thin JSON-RPC client bound to one endpoint.
#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Build a client with a fixed request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, WebError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| WebError::Client(err.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a request and wait for its reply.
    pub async fn call(
        &self,
        auth: RpcAuth<'_>,
        method: &str,
        params: Option<Value>,
    ) -> Result<RpcReply, WebError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::request(id, method, params);
        let response = self.post(auth, &request).await?;

        let session_id = header_value(response.headers(), SESSION_ID_HEADER);
        let content_type = header_value(response.headers(), CONTENT_TYPE.as_str())
            .unwrap_or_default();
        let body = response
            .text()
            .await
            .map_err(|err| WebError::request(method, &err))?;
        debug!(
            "rpc reply received (method={}, id={}, bytes={})",
            method,
            id,
            body.len()
        );

        let reply = decode_reply(&content_type, &body).map_err(|reason| {
            WebError::Protocol(format!("invalid reply to {method}: {reason}"))
        })?;
        let result = reply.into_result().map_err(|err| WebError::Rpc {
            code: err.code,
            message: err.message,
        })?;
        Ok(RpcReply { result, session_id })
    }

    /// Send a notification; the body of any reply is ignored.
    pub async fn notify(
        &self,
        auth: RpcAuth<'_>,
        method: &str,
        params: Option<Value>,
    ) -> Result<(), WebError> {
        let notification = JsonRpcRequest::notification(method, params);
        self.post(auth, &notification).await?;
        Ok(())
    }

    async fn post(
        &self,
        auth: RpcAuth<'_>,
        envelope: &JsonRpcRequest,
    ) -> Result<reqwest::Response, WebError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .bearer_auth(auth.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_VALUE)
            .json(envelope);
        if let Some(session_id) = auth.session_id {
            request = request.header(SESSION_ID_HEADER, session_id);
        }

        let response = request
            .send()
            .await
            .map_err(|err| WebError::request(&envelope.method, &err))?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                "rpc request rejected (method={}, status={})",
                envelope.method,
                status.as_u16()
            );
            return Err(WebError::HttpStatus {
                status: status.as_u16(),
                context: envelope.method.clone(),
            });
        }
        Ok(response)
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Decode a reply body according to its content type.
fn decode_reply(content_type: &str, body: &str) -> Result<JsonRpcResponse, String> {
    if content_type.to_lowercase().contains(EVENT_STREAM) {
        return decode_event_stream(body)
            .ok_or_else(|| "event stream carried no JSON-RPC reply".to_string());
    }
    serde_json::from_str(body).map_err(|err| err.to_string())
}

/// Extract the last JSON-RPC reply from an event stream body.
///
/// Consecutive `data:` lines form one event; events that are not replies
/// (no `result` and no `error`) are skipped.
fn decode_event_stream(body: &str) -> Option<JsonRpcResponse> {
    let mut last = None;
    let mut data = String::new();
    for line in body.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !data.is_empty() {
                if let Ok(message) = serde_json::from_str::<JsonRpcResponse>(&data) {
                    if message.result.is_some() || message.error.is_some() {
                        last = Some(message);
                    }
                }
                data.clear();
            }
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    last
}
