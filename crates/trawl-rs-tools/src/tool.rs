//! Tool trait and descriptor.

use crate::context::ToolContext;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use trawl_rs_protocol::ToolError;

/// Descriptor handed to an orchestrator for tool selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    /// Stable tool name.
    pub name: String,
    /// One-line capability summary.
    pub description: String,
    /// JSON schema for tool arguments.
    pub args_schema: Value,
}

/// Interface for executable tools.
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// JSON schema describing accepted arguments.
    fn args_schema(&self) -> Value;

    /// Whether concurrent calls on one instance are safe.
    fn supports_parallel(&self) -> bool {
        false
    }

    /// Invoke the tool.
    ///
    /// Errors are reserved for arguments that cannot be decoded; execution
    /// failures are reported inside the returned value.
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<Value, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            args_schema: self.args_schema(),
        }
    }
}
