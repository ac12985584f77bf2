//! Test helpers shared across Trawl crates.

pub mod context;
pub mod search_backend;
pub mod tools;

pub use context::base_tool_context;
pub use search_backend::{
    MCP_PATH, MockSearchBackend, TEST_SESSION_ID, rpc_error, rpc_result, search_operation,
};
pub use tools::{DummyTool, RecordingTool};
