//! Schema validation helpers for Trawl JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Accepted values for `web.fetch.extract_mode`.
const EXTRACT_MODES: &[&str] = &["markdown", "text"];

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "web"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("web") {
        validate_web(value, layer, "web")?;
    }
    Ok(())
}

/// Validate the "web" block.
fn validate_web(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["search", "fetch"], layer, path)?;

    if let Some(value) = map.get("search") {
        validate_search(value, layer, &join_path(path, "search"))?;
    }
    if let Some(value) = map.get("fetch") {
        validate_fetch(value, layer, &join_path(path, "fetch"))?;
    }
    Ok(())
}

/// Validate the search backend block.
fn validate_search(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    let strings = [
        "endpoint",
        "api_key",
        "api_key_env",
        "protocol_version",
        "client_name",
        "client_version",
    ];
    let integers = ["max_results", "timeout_secs"];
    let allowed = strings.iter().chain(integers.iter()).copied().collect::<Vec<_>>();
    ensure_allowed_keys(map, &allowed, layer, path)?;

    for key in strings {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    for key in integers {
        if let Some(value) = map.get(key) {
            expect_u64(value, layer, &join_path(path, key))?;
        }
    }
    Ok(())
}

/// Validate the fetch block.
fn validate_fetch(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &[
            "max_chars",
            "max_redirects",
            "timeout_secs",
            "user_agent",
            "extract_mode",
        ],
        layer,
        path,
    )?;

    for key in ["max_chars", "max_redirects", "timeout_secs"] {
        if let Some(value) = map.get(key) {
            expect_u64(value, layer, &join_path(path, key))?;
        }
    }
    if let Some(value) = map.get("user_agent") {
        expect_string(value, layer, &join_path(path, "user_agent"))?;
    }
    if let Some(value) = map.get("extract_mode") {
        let mode_path = join_path(path, "extract_mode");
        let mode = expect_string(value, layer, &mode_path)?;
        if !EXTRACT_MODES.contains(&mode) {
            return Err(invalid_field(
                layer,
                &mode_path,
                "expected one of: markdown, text",
            ));
        }
    }
    Ok(())
}

/// Require an object value.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| invalid_field(layer, path, "expected object"))
}

/// Require a string value.
fn expect_string<'a>(value: &'a Value, layer: &str, path: &str) -> Result<&'a str, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| invalid_field(layer, path, "expected string"))
}

/// Require a non-negative integer value.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<u64, ConfigError> {
    value
        .as_u64()
        .ok_or_else(|| invalid_field(layer, path, "expected non-negative integer"))
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
