//! Built-in web tools.

mod utils;
mod web;

use crate::{ToolRegistry, WebError};
use log::info;
use std::sync::Arc;
use trawl_rs_config::WebConfig;

pub use web::{WebFetchTool, WebSearchTool};

/// Register `web_search` and `web_fetch` with the provided registry.
pub fn register_builtin_tools(registry: &ToolRegistry, config: &WebConfig) -> Result<(), WebError> {
    registry.register(Arc::new(WebSearchTool::from_config(&config.search)?));
    registry.register(Arc::new(WebFetchTool::from_config(&config.fetch)?));
    info!("registered built-in tools (count={})", registry.list().len());
    Ok(())
}

/// Build a registry pre-populated with the built-in tools.
pub fn builtin_tool_registry(config: &WebConfig) -> Result<ToolRegistry, WebError> {
    let registry = ToolRegistry::new();
    register_builtin_tools(&registry, config)?;
    Ok(registry)
}
