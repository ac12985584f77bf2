//! Public SDK surface for Trawl.
//!
//! This crate re-exports the building blocks and provides small helpers that
//! keep consumer setup consistent: logging initialization and a tool registry
//! built straight from a loaded config.

/// Re-export for convenience.
pub use trawl_rs_config as config;
/// Re-export for convenience.
pub use trawl_rs_protocol as protocol;
pub use trawl_rs_tools as tools;

use log::debug;
use trawl_rs_config::TrawlConfig;
use trawl_rs_tools::{ToolRegistry, WebError, builtin_tool_registry};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Build a registry holding `web_search` and `web_fetch` for this config.
pub fn tool_registry(config: &TrawlConfig) -> Result<ToolRegistry, WebError> {
    let registry = builtin_tool_registry(&config.web)?;
    debug!("tool registry ready (tools={})", registry.list().join(","));
    Ok(registry)
}
