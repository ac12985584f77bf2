//! Maps the caller's query and count onto a remote operation's declared fields.
//!
//! The remote schema is discovered at runtime, so field names are inferred:
//! properties are scanned in declared order first, then the `required` list.

use serde_json::{Map, Value};
use trawl_rs_protocol::InputSchema;

/// Key used when the schema declares nothing query-like.
pub const FALLBACK_QUERY_FIELD: &str = "query";
/// Smallest count ever sent to the remote.
pub const MIN_RESULT_COUNT: i64 = 1;
/// Largest count ever sent to the remote.
pub const MAX_RESULT_COUNT: i64 = 10;

const QUERY_KEYWORD: &str = "query";
const COUNT_KEYWORDS: [&str; 4] = ["count", "num", "limit", "size"];

/// Concrete field names chosen for one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentMapping {
    /// Field receiving the query string.
    pub query_field: String,
    /// Field receiving the clamped count; `None` means no count is sent.
    pub count_field: Option<String>,
}

impl ArgumentMapping {
    /// Resolve both semantic slots against a schema.
    pub fn from_schema(schema: &InputSchema) -> Self {
        Self {
            query_field: resolve_query_field(schema)
                .unwrap_or(FALLBACK_QUERY_FIELD)
                .to_string(),
            count_field: resolve_count_field(schema).map(str::to_string),
        }
    }

    /// Build the argument object for `tools/call`.
    pub fn build(&self, query: &str, count: i64) -> Value {
        let mut arguments = Map::new();
        arguments.insert(self.query_field.clone(), Value::String(query.to_string()));
        if let Some(field) = &self.count_field {
            arguments.insert(field.clone(), Value::from(count));
        }
        Value::Object(arguments)
    }
}

/// First property, then first required field, whose name contains "query".
pub fn resolve_query_field(schema: &InputSchema) -> Option<&str> {
    find_field(schema, is_query_like)
}

/// First property, then first required field, that looks like a result count.
pub fn resolve_count_field(schema: &InputSchema) -> Option<&str> {
    find_field(schema, is_count_like)
}

/// Clamp a requested count into `[1, 10]`, defaulting when absent.
pub fn clamp_count(requested: Option<i64>, default_count: usize) -> i64 {
    let fallback = i64::try_from(default_count).unwrap_or(MAX_RESULT_COUNT);
    requested
        .unwrap_or(fallback)
        .clamp(MIN_RESULT_COUNT, MAX_RESULT_COUNT)
}

/// Adapt `(query, count)` to the schema of the selected remote operation.
pub fn resolve_arguments(
    query: &str,
    count: Option<i64>,
    default_count: usize,
    schema: &InputSchema,
) -> Value {
    ArgumentMapping::from_schema(schema).build(query, clamp_count(count, default_count))
}

fn find_field(schema: &InputSchema, matches: fn(&str) -> bool) -> Option<&str> {
    schema
        .property_names()
        .find(|name| matches(name))
        .or_else(|| schema.required_names().find(|name| matches(name)))
}

fn is_query_like(name: &str) -> bool {
    name.to_lowercase().contains(QUERY_KEYWORD)
}

fn is_count_like(name: &str) -> bool {
    let lowered = name.to_lowercase();
    COUNT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(value: Value) -> InputSchema {
        InputSchema::from_value(&value)
    }

    #[test]
    fn standard_query_and_count() {
        let schema = schema(json!({
            "properties": { "query": { "type": "string" }, "count": { "type": "integer" } },
            "required": ["query"],
        }));
        assert_eq!(
            resolve_arguments("test query", Some(5), 10, &schema),
            json!({ "query": "test query", "count": 5 })
        );
    }

    #[test]
    fn renamed_fields_are_detected() {
        let schema = schema(json!({
            "properties": {
                "search_query": { "type": "string" },
                "result_count": { "type": "integer" },
            },
            "required": ["search_query"],
        }));
        assert_eq!(
            resolve_arguments("test query", Some(3), 10, &schema),
            json!({ "search_query": "test query", "result_count": 3 })
        );
    }

    #[test]
    fn num_prefixed_count_field() {
        let schema = schema(json!({
            "properties": {
                "query": { "type": "string" },
                "num_results": { "type": "integer" },
            },
            "required": ["query", "num_results"],
        }));
        assert_eq!(
            resolve_arguments("test query", Some(4), 10, &schema),
            json!({ "query": "test query", "num_results": 4 })
        );
    }

    #[test]
    fn unknown_fields_fall_back_to_query_without_count() {
        let schema = schema(json!({
            "properties": {
                "unknown_field": { "type": "string" },
                "another_field": { "type": "integer" },
            },
            "required": ["unknown_field"],
        }));
        let mapping = ArgumentMapping::from_schema(&schema);
        assert_eq!(mapping.query_field, "query");
        assert_eq!(mapping.count_field, None);
        assert_eq!(
            resolve_arguments("test query", Some(2), 10, &schema),
            json!({ "query": "test query" })
        );
    }

    #[test]
    fn required_list_is_consulted_when_properties_miss() {
        let schema = schema(json!({
            "properties": { "q": { "type": "string" } },
            "required": ["userQuery", "pageSize"],
        }));
        assert_eq!(resolve_query_field(&schema), Some("userQuery"));
        assert_eq!(resolve_count_field(&schema), Some("pageSize"));
    }

    #[test]
    fn matching_is_case_insensitive_and_ordered() {
        let schema = schema(json!({
            "properties": {
                "Limit": {},
                "QueryText": {},
                "query": {},
            },
        }));
        assert_eq!(resolve_query_field(&schema), Some("QueryText"));
        assert_eq!(resolve_count_field(&schema), Some("Limit"));
    }

    #[test]
    fn empty_schema_uses_literal_query_key() {
        let schema = InputSchema::default();
        assert_eq!(resolve_query_field(&schema), None);
        assert_eq!(
            resolve_arguments("rust", None, 10, &schema),
            json!({ "query": "rust" })
        );
    }

    #[test]
    fn count_is_clamped_and_defaulted() {
        assert_eq!(clamp_count(Some(25), 10), 10);
        assert_eq!(clamp_count(Some(0), 10), 1);
        assert_eq!(clamp_count(Some(-3), 10), 1);
        assert_eq!(clamp_count(Some(7), 10), 7);
        assert_eq!(clamp_count(None, 4), 4);
        assert_eq!(clamp_count(None, 50), 10);
    }
}
