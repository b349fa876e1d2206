//! Command implementations.

mod emit;
mod info;
mod pipe;
mod validate;

pub use emit::run_emit;
pub use info::run_info;
pub use pipe::run_pipe;
pub use validate::run_validate;

use std::path::Path;

use log_engine::{LogDispatch, TracingEngine};
use tracing::info;

use crate::error::{CliError, Result};

/// Load configuration and build a tracing-backed dispatcher
pub(crate) fn build_dispatcher(config: &Path) -> Result<LogDispatch> {
    if !config.exists() {
        return Err(CliError::config_not_found(config.display().to_string()));
    }

    let logger = dispatcher::create_dispatcher(config, TracingEngine::new())?;
    let summary = logger.summary();
    info!(
        sinks = ?summary.sinks,
        files = ?summary.files,
        async_capacity = ?summary.async_capacity,
        "Dispatcher ready"
    );
    Ok(logger)
}
