//! Wire types for Trawl: JSON-RPC envelopes, remote operation descriptors,
//! and the output shapes of the web tools.

mod jsonrpc;
mod remote;
mod tool;
mod web;

pub use jsonrpc::{
    ClientInfo, InitializeParams, JSONRPC_VERSION, JsonRpcErrorObject, JsonRpcRequest,
    JsonRpcResponse, methods,
};
pub use remote::{
    ContentBlock, InputSchema, RemoteOperation, ToolCallResult, operations_from_list_result,
};
pub use tool::ToolError;
pub use web::{
    ExtractMode, Extractor, FetchFailure, FetchOutput, FetchResult, SearchPage, SearchPayload,
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn notification_omits_id_on_the_wire() {
        let note = JsonRpcRequest::notification(methods::INITIALIZED, Some(json!({})));
        assert!(note.is_notification());
        let encoded = serde_json::to_value(&note).expect("serialize");
        assert_eq!(
            encoded,
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized", "params": {} })
        );
    }

    #[test]
    fn request_without_params_skips_the_field() {
        let request = JsonRpcRequest::request(2, methods::TOOLS_LIST, None);
        let encoded = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            encoded,
            json!({ "jsonrpc": "2.0", "method": "tools/list", "id": 2 })
        );
    }

    #[test]
    fn initialize_params_use_camel_case() {
        let params = InitializeParams::new(
            "2024-11-05",
            ClientInfo {
                name: "trawl".to_string(),
                version: "0.1.0".to_string(),
            },
        );
        let encoded = serde_json::to_value(&params).expect("serialize");
        assert_eq!(
            encoded,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "trawl", "version": "0.1.0" },
            })
        );
    }

    #[test]
    fn response_error_takes_precedence_over_result() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "result": { "ignored": true },
            "error": { "code": -32601, "message": "method not found" },
        }))
        .expect("decode");
        let err = response.into_result().expect_err("error");
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "method not found");
    }

    #[test]
    fn input_schema_keeps_declared_property_order() {
        let schema = InputSchema::from_value(&json!({
            "type": "object",
            "properties": {
                "zeta_query": { "type": "string" },
                "alpha_count": { "type": "integer" },
            },
            "required": ["zeta_query", 7],
        }));
        let names = schema.property_names().collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta_query", "alpha_count"]);
        assert_eq!(schema.required, vec!["zeta_query".to_string()]);
    }

    #[test]
    fn list_result_skips_entries_without_names() {
        let operations = operations_from_list_result(&json!({
            "tools": [
                { "name": "bailian_web_search", "inputSchema": { "properties": { "query": {} } } },
                { "description": "nameless" },
                { "name": "other" },
            ]
        }));
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].name, "bailian_web_search");
        assert_eq!(
            operations[0].input_schema.property_names().collect::<Vec<_>>(),
            vec!["query"]
        );
        assert_eq!(operations[1].input_schema, InputSchema::default());
    }

    #[test]
    fn first_text_ignores_later_blocks() {
        let result = ToolCallResult::from_value(&json!({
            "content": [
                { "type": "image", "data": "..." },
                { "type": "text", "text": "first" },
                { "type": "text", "text": "second" },
            ]
        }));
        assert_eq!(result.first_text(), Some("first"));
        assert!(!result.is_error);
    }

    #[test]
    fn search_page_defaults_missing_fields() {
        let payload: SearchPayload =
            serde_json::from_value(json!({ "pages": [{ "url": "https://a.example" }] }))
                .expect("decode");
        assert_eq!(payload.pages[0].title, "No Title");
        assert_eq!(payload.pages[0].snippet, "");
    }

    #[test]
    fn fetch_output_keeps_non_ascii_and_key_order() {
        let output = FetchOutput::Success(FetchResult {
            url: "https://example.com".to_string(),
            final_url: "https://example.com/".to_string(),
            status: 200,
            extractor: Extractor::Raw,
            truncated: false,
            length: 5,
            text: "héllo".to_string(),
        });
        assert_eq!(
            output.to_json_string(),
            r#"{"url":"https://example.com","finalUrl":"https://example.com/","status":200,"extractor":"raw","truncated":false,"length":5,"text":"héllo"}"#
        );
    }

    #[test]
    fn fetch_failure_round_trips_through_untagged_enum() {
        let failure = FetchOutput::Failure(FetchFailure {
            error: "boom".to_string(),
            url: "https://example.com".to_string(),
        });
        let decoded: FetchOutput =
            serde_json::from_str(&failure.to_json_string()).expect("decode");
        assert!(decoded.is_failure());
        assert_eq!(decoded, failure);
    }
}
