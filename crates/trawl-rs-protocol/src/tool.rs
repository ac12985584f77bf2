/// Errors returned by tools and the tool registry.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool name was not found in registry.
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    /// Tool received arguments that could not be decoded.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Tool execution failed before a result could be produced.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
