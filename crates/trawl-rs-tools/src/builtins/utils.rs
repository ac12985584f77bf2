//! Helpers shared by built-in tools.

use serde::de::DeserializeOwned;
use serde_json::Value;
use trawl_rs_protocol::ToolError;

/// Decode JSON arguments into a typed struct.
pub(super) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|err| ToolError::InvalidArguments(err.to_string()))
}
