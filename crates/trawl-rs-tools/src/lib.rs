//! Tool interfaces and the built-in web tools for Trawl.

pub mod builtins;
pub mod context;
pub mod error;
pub mod fetch;
pub mod registry;
pub mod search;
pub mod tool;

/// Built-in tool registry and registration helper.
pub use builtins::{WebFetchTool, WebSearchTool, builtin_tool_registry, register_builtin_tools};
pub use context::ToolContext;
/// Error taxonomy for the web clients.
pub use error::{UrlError, WebError};
pub use fetch::{WebFetcher, validate_url};
pub use registry::ToolRegistry;
pub use search::{ArgumentMapping, SearchClient, resolve_arguments};
/// Tool trait and spec type.
pub use tool::{Tool, ToolSpec};
