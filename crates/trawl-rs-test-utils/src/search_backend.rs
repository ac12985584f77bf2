//! Scripted stand-in for the remote JSON-RPC search endpoint.

use serde_json::{Value, json};
use trawl_rs_config::WebSearchConfig;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path the mock endpoint listens on.
pub const MCP_PATH: &str = "/mcp";
/// Session id returned from `initialize`.
pub const TEST_SESSION_ID: &str = "test-session";

/// JSON-RPC success reply.
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
    }))
}

/// JSON-RPC error reply.
pub fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": code, "message": message },
    }))
}

pub struct MockSearchBackend {
    server: MockServer,
}

impl MockSearchBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), MCP_PATH)
    }

    /// Search settings pointing at this backend with an explicit key.
    pub fn search_config(&self, api_key: &str) -> WebSearchConfig {
        WebSearchConfig {
            endpoint: self.endpoint(),
            api_key: Some(api_key.to_string()),
            timeout_secs: 5,
            ..WebSearchConfig::default()
        }
    }

    /// Mount a reply for one JSON-RPC method, optionally asserting a call count.
    pub async fn mount_method(
        &self,
        rpc_method: &str,
        response: ResponseTemplate,
        expected_calls: Option<u64>,
    ) {
        let mock = Mock::given(method("POST"))
            .and(path(MCP_PATH))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(response)
            .named(rpc_method.to_string());
        let mock = match expected_calls {
            Some(calls) => mock.expect(calls),
            None => mock,
        };
        mock.mount(&self.server).await;
    }

    /// Mount `initialize`, `notifications/initialized` and `tools/list`.
    ///
    /// `initialize` replies with a session id header.
    pub async fn mount_handshake(&self, tools: Value, expected_calls: Option<u64>) {
        self.mount_method(
            "initialize",
            rpc_result(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": { "tools": {} },
                "serverInfo": { "name": "mock-search", "version": "0.0.1" },
            }))
            .insert_header("Mcp-Session-Id", TEST_SESSION_ID),
            expected_calls,
        )
        .await;
        self.mount_method(
            "notifications/initialized",
            ResponseTemplate::new(202),
            expected_calls,
        )
        .await;
        self.mount_method(
            "tools/list",
            rpc_result(json!({ "tools": tools })),
            expected_calls,
        )
        .await;
    }

    /// Mount a `tools/call` reply whose first text block is `text`.
    pub async fn mount_search_text(&self, text: &str, expected_calls: Option<u64>) {
        self.mount_method(
            "tools/call",
            rpc_result(json!({
                "content": [{ "type": "text", "text": text }],
                "isError": false,
            })),
            expected_calls,
        )
        .await;
    }

    /// Mount a `tools/call` reply carrying the given pages.
    pub async fn mount_search_pages(&self, pages: Value, expected_calls: Option<u64>) {
        let text = json!({ "pages": pages }).to_string();
        self.mount_search_text(&text, expected_calls).await;
    }

    /// Every recorded request whose JSON-RPC method matches.
    pub async fn requests_for(&self, rpc_method: &str) -> Vec<Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| {
                request
                    .body_json::<Value>()
                    .ok()
                    .and_then(|body| body.get("method").and_then(Value::as_str).map(str::to_string))
                    .is_some_and(|name| name == rpc_method)
            })
            .collect()
    }

    /// JSON bodies of every recorded request for a method.
    pub async fn bodies_for(&self, rpc_method: &str) -> Vec<Value> {
        self.requests_for(rpc_method)
            .await
            .into_iter()
            .filter_map(|request| request.body_json::<Value>().ok())
            .collect()
    }
}

/// A single search-like operation with the given input schema.
pub fn search_operation(name: &str, input_schema: Value) -> Value {
    json!({ "name": name, "description": "search", "inputSchema": input_schema })
}
