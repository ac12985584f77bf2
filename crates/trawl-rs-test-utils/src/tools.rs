use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;
use trawl_rs_protocol::ToolError;
use trawl_rs_tools::ToolContext;

#[derive(Debug, Clone)]
pub struct DummyTool {
    name: String,
    description: String,
    args_schema: Value,
    result: Value,
}

impl DummyTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "dummy".to_string(),
            args_schema: json!({}),
            result: json!({}),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result = result;
        self
    }
}

#[async_trait]
impl trawl_rs_tools::Tool for DummyTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn args_schema(&self) -> Value {
        self.args_schema.clone()
    }

    async fn call(&self, _ctx: &ToolContext, _args: Value) -> Result<Value, ToolError> {
        Ok(self.result.clone())
    }
}

/// Tool that records every argument object it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingTool {
    calls: Arc<Mutex<Vec<Value>>>,
}

impl RecordingTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl trawl_rs_tools::Tool for RecordingTool {
    fn name(&self) -> &str {
        "recording"
    }

    fn description(&self) -> &str {
        "records arguments"
    }

    fn args_schema(&self) -> Value {
        json!({ "type": "object" })
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<Value, ToolError> {
        self.calls.lock().push(args.clone());
        Ok(json!({ "recorded": args }))
    }
}
