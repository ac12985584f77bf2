//! Schema-adaptive web search over a remote JSON-RPC tool endpoint.
//!
//! The client performs the initialize / initialized / tools/list handshake
//! once, picks the search operation, and adapts each call's arguments to the
//! schema that operation declares.

pub mod arguments;
pub mod results;
pub mod rpc;
pub mod session;

use crate::WebError;
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use trawl_rs_config::WebSearchConfig;
use trawl_rs_protocol::{ClientInfo, InitializeParams, methods, operations_from_list_result};

pub use arguments::{ArgumentMapping, clamp_count, resolve_arguments};
pub use results::{format_results, parse_search_reply};
pub use rpc::{RpcAuth, RpcClient, RpcReply};
pub use session::{ReadySession, SessionPhase, select_operation};

/// Search client with a memoized remote session.
#[derive(Debug)]
pub struct SearchClient {
    config: WebSearchConfig,
    rpc: RpcClient,
    phase: Mutex<SessionPhase>,
    /// Serializes handshakes; waiters re-check the phase before starting one.
    handshake_guard: tokio::sync::Mutex<()>,
}

impl SearchClient {
    /// Build a client from search settings. No network traffic happens here.
    pub fn new(config: WebSearchConfig) -> Result<Self, WebError> {
        let rpc = RpcClient::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            config,
            rpc,
            phase: Mutex::new(SessionPhase::default()),
            handshake_guard: tokio::sync::Mutex::new(()),
        })
    }

    pub fn config(&self) -> &WebSearchConfig {
        &self.config
    }

    /// Resolve the bearer token: explicit key, then the configured env var.
    ///
    /// Resolved on every call so a rotated credential is picked up.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(&self.config.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Current lifecycle label.
    pub fn phase_label(&self) -> &'static str {
        self.phase.lock().label()
    }

    /// The ready session, if the handshake has completed.
    pub fn session(&self) -> Option<Arc<ReadySession>> {
        self.phase.lock().ready()
    }

    /// Search and render results, turning every failure into descriptive text.
    pub async fn execute(&self, query: &str, count: Option<i64>) -> String {
        match self.search(query, count).await {
            Ok(text) => text,
            Err(err) => {
                warn!("web search failed (query_len={}, error={})", query.len(), err);
                err.to_agent_message()
            }
        }
    }

    /// Search and render results.
    pub async fn search(&self, query: &str, count: Option<i64>) -> Result<String, WebError> {
        let api_key = self.resolve_api_key().ok_or_else(|| WebError::MissingCredential {
            env_var: self.config.api_key_env.clone(),
        })?;
        let session = self.ensure_session(&api_key).await?;

        let arguments = resolve_arguments(
            query,
            count,
            self.config.max_results,
            &session.operation.input_schema,
        );
        info!(
            "web search (operation={}, query_len={})",
            session.operation.name,
            query.len()
        );
        let auth = RpcAuth {
            api_key: &api_key,
            session_id: session.remote_session_id.as_deref(),
        };
        let reply = self
            .rpc
            .call(
                auth,
                methods::TOOLS_CALL,
                Some(json!({
                    "name": session.operation.name,
                    "arguments": arguments,
                })),
            )
            .await?;

        let pages = parse_search_reply(&reply.result, query)?;
        debug!("web search returned pages (count={})", pages.len());
        Ok(format_results(query, &pages))
    }

    /// Return the ready session, running the handshake if needed.
    async fn ensure_session(&self, api_key: &str) -> Result<Arc<ReadySession>, WebError> {
        if let Some(session) = self.session() {
            return Ok(session);
        }

        let _guard = self.handshake_guard.lock().await;
        if !self.phase.lock().begin_handshake() {
            if let Some(session) = self.session() {
                debug!("search session became ready while waiting");
                return Ok(session);
            }
        }

        match self.handshake(api_key).await {
            Ok(session) => {
                let session = Arc::new(session);
                self.phase.lock().complete(Arc::clone(&session));
                info!(
                    "search session ready (operation={}, discovered={})",
                    session.operation.name,
                    session.operations.len()
                );
                Ok(session)
            }
            Err(err) => {
                self.phase.lock().fail();
                warn!("search handshake failed (error={})", err);
                Err(WebError::Handshake(Box::new(err)))
            }
        }
    }

    async fn handshake(&self, api_key: &str) -> Result<ReadySession, WebError> {
        debug!("starting search handshake (endpoint={})", self.rpc.endpoint());
        let params = InitializeParams::new(
            self.config.protocol_version.clone(),
            ClientInfo {
                name: self.config.client_name.clone(),
                version: self.config.client_version.clone(),
            },
        );
        let params = serde_json::to_value(params)
            .map_err(|err| WebError::Protocol(format!("failed to encode initialize: {err}")))?;
        let init = self
            .rpc
            .call(
                RpcAuth {
                    api_key,
                    session_id: None,
                },
                methods::INITIALIZE,
                Some(params),
            )
            .await?;

        let auth = RpcAuth {
            api_key,
            session_id: init.session_id.as_deref(),
        };
        if let Err(err) = self
            .rpc
            .notify(auth, methods::INITIALIZED, Some(json!({})))
            .await
        {
            warn!("initialized notification failed (error={})", err);
        }

        let listing = self.rpc.call(auth, methods::TOOLS_LIST, None).await?;
        let operations = operations_from_list_result(&listing.result);
        debug!("discovered remote operations (count={})", operations.len());
        ReadySession::from_operations(operations, init.session_id.clone())
            .ok_or(WebError::NoOperations)
    }
}
