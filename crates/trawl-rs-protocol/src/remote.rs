//! Descriptors for operations discovered on a remote tool endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named, schema-described operation exposed by a remote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOperation {
    /// Operation name used in `tools/call`.
    pub name: String,
    /// Optional human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared input schema.
    #[serde(default)]
    pub input_schema: InputSchema,
}

impl RemoteOperation {
    /// Decode one `tools/list` entry, tolerating missing or oddly typed fields.
    ///
    /// Returns `None` when the entry has no string `name`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?.to_string();
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        let input_schema = value
            .get("inputSchema")
            .map(InputSchema::from_value)
            .unwrap_or_default();
        Some(Self {
            name,
            description,
            input_schema,
        })
    }
}

/// JSON-Schema-like object describing an operation's arguments.
///
/// `properties` keeps the declared key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Decode a schema value; non-object properties and non-string required
    /// entries are ignored.
    pub fn from_value(value: &Value) -> Self {
        let properties = value
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let required = value
            .get("required")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            properties,
            required,
        }
    }

    /// Property names in declared order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Required field names in declared order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }
}

/// Decode the `result.tools` array of a `tools/list` reply.
pub fn operations_from_list_result(result: &Value) -> Vec<RemoteOperation> {
    result
        .get("tools")
        .and_then(Value::as_array)
        .map(|tools| tools.iter().filter_map(RemoteOperation::from_value).collect())
        .unwrap_or_default()
}

/// A tagged unit of content inside a `tools/call` result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentBlock {
    /// Whether the block is tagged as textual content.
    pub fn is_text(&self) -> bool {
        self.kind == "text"
    }
}

/// Result payload of a `tools/call` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResult {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Decode a `tools/call` result, skipping malformed content blocks.
    pub fn from_value(value: &Value) -> Self {
        let content = value
            .get("content")
            .and_then(Value::as_array)
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|block| serde_json::from_value(block.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        let is_error = value
            .get("isError")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { content, is_error }
    }

    /// Text of the first block tagged as text, if any.
    ///
    /// Later text blocks are not consulted.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.is_text())
            .and_then(|block| block.text.as_deref())
    }
}
