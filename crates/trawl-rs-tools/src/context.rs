//! Per-invocation context passed to tools.

use uuid::Uuid;

/// Identity of a single tool invocation.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Session the call belongs to.
    pub session_id: Uuid,
    /// Agent that requested the call.
    pub agent_id: String,
    /// Orchestrator-assigned id for this call, when available.
    pub tool_call_id: Option<Uuid>,
}

impl ToolContext {
    /// Context for a new session with a random id.
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            agent_id: agent_id.into(),
            tool_call_id: None,
        }
    }

    /// Attach a tool call id.
    pub fn with_tool_call_id(mut self, id: Uuid) -> Self {
        self.tool_call_id = Some(id);
        self
    }

    /// Short label used in log lines.
    pub fn log_label(&self) -> String {
        match self.tool_call_id {
            Some(call) => format!("{}/{}", self.agent_id, call),
            None => self.agent_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToolContext;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn log_label_includes_the_call_id_when_present() {
        let ctx = ToolContext::new("planner");
        assert_eq!(ctx.log_label(), "planner");
        assert_eq!(ctx.tool_call_id, None);

        let call = Uuid::new_v4();
        let ctx = ctx.with_tool_call_id(call);
        assert_eq!(ctx.tool_call_id, Some(call));
        assert_eq!(ctx.log_label(), format!("planner/{call}"));
    }
}
