//! ConfigStep - one engine call of the construction sequence

use std::fmt;

use contracts::{ContractError, LogEngine, Severity, SinkOptions};

/// A single configuration call against the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStep {
    /// Switch to asynchronous delivery
    Async { capacity: usize },
    /// Enable call-site annotation
    CallDepth,
    /// Register a sink
    Sink(SinkOptions),
    /// Set the dispatcher-wide threshold
    Level(Severity),
}

impl ConfigStep {
    /// Short step name (used for logging/errors)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Async { .. } => "async",
            Self::CallDepth => "call_depth",
            Self::Sink(options) => match options {
                SinkOptions::Console(_) => "console_sink",
                SinkOptions::File(_) => "file_sink",
                SinkOptions::MultiFile(_) => "multifile_sink",
            },
            Self::Level(_) => "level",
        }
    }

    /// Issue the step against an engine
    ///
    /// Sink options are encoded to their wire form here and nowhere earlier.
    pub fn apply<E: LogEngine>(&self, engine: &mut E) -> Result<(), ContractError> {
        match self {
            Self::Async { capacity } => engine.set_async(*capacity),
            Self::CallDepth => engine.enable_func_call_depth(true),
            Self::Sink(options) => {
                let blob = options.encode()?;
                engine.set_logger(options.kind(), &blob)
            }
            Self::Level(level) => engine.set_level(*level),
        }
    }
}

impl fmt::Display for ConfigStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Async { capacity } => write!(f, "async(capacity={})", capacity),
            Self::CallDepth => write!(f, "enable_func_call_depth(true)"),
            Self::Sink(options) => match options.encode() {
                Ok(blob) => write!(f, "set_logger({}, {})", options.kind(), blob),
                Err(_) => write!(f, "set_logger({}, <unencodable>)", options.kind()),
            },
            Self::Level(level) => write!(f, "set_level({})", level.rank()),
        }
    }
}
