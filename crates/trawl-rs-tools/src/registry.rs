//! Registry for tool implementations.

use crate::context::ToolContext;
use crate::tool::{Tool, ToolSpec};
use log::debug;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use trawl_rs_protocol::ToolError;

/// In-memory registry keyed by tool name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        debug!("registering tool (name={})", tool.name());
        self.tools.write().insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// Registered tool names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names = self.tools.read().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Specs for every registered tool, sorted by name.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs = self
            .tools
            .read()
            .values()
            .map(|tool| tool.spec())
            .collect::<Vec<_>>();
        specs.sort_by(|left, right| left.name.cmp(&right.name));
        specs
    }

    /// Dispatch a call by tool name.
    pub async fn call(
        &self,
        name: &str,
        ctx: &ToolContext,
        args: Value,
    ) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        debug!("dispatching tool call (name={}, caller={})", name, ctx.log_label());
        tool.call(ctx, args).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRegistry;
    use crate::{Tool, ToolContext};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use trawl_rs_protocol::ToolError;

    #[derive(Debug)]
    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "echo"
        }

        fn args_schema(&self) -> Value {
            json!({ "type": "object" })
        }

        async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
            Ok(json!({ "tool": self.name, "args": args }))
        }
    }

    #[test]
    fn registry_tracks_tools_and_specs() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "web_search" }));
        registry.register(Arc::new(EchoTool { name: "web_fetch" }));

        assert_eq!(registry.list(), vec!["web_fetch", "web_search"]);
        let spec_names = registry
            .specs()
            .into_iter()
            .map(|spec| spec.name)
            .collect::<Vec<_>>();
        assert_eq!(spec_names, vec!["web_fetch", "web_search"]);
    }

    #[tokio::test]
    async fn call_dispatches_by_name() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool { name: "echo" }));
        let ctx = ToolContext::new("agent");

        let value = registry
            .call("echo", &ctx, json!({ "x": 1 }))
            .await
            .expect("call");
        assert_eq!(value, json!({ "tool": "echo", "args": { "x": 1 } }));
    }

    #[tokio::test]
    async fn call_rejects_unknown_tools() {
        let registry = ToolRegistry::new();
        let err = registry
            .call("missing", &ToolContext::new("agent"), json!({}))
            .await
            .expect_err("missing");
        let ToolError::ToolNotFound(name) = err else {
            panic!("expected tool not found");
        };
        assert_eq!(name, "missing");
    }
}
