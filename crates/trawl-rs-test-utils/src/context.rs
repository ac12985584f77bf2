use trawl_rs_tools::ToolContext;
use uuid::Uuid;

pub fn base_tool_context() -> ToolContext {
    ToolContext {
        session_id: Uuid::nil(),
        agent_id: "agent".to_string(),
        tool_call_id: None,
    }
}
