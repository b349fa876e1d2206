//! Dispatcher error types

use std::path::PathBuf;
use thiserror::Error;

use contracts::ContractError;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Configuration file could not be read, decoded or validated
    #[error("failed to load logging config from '{}': {source}", path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: ContractError,
    },

    /// A construction step failed on the engine
    #[error("dispatcher step '{step}' failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: ContractError,
    },
}

impl DispatcherError {
    /// Create a config load error
    pub fn config_load(path: impl Into<PathBuf>, source: ContractError) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            source,
        }
    }

    /// Create a step error
    pub fn step(step: &'static str, source: ContractError) -> Self {
        Self::Step { step, source }
    }
}
