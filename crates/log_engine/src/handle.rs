//! LogDispatch - the dispatcher handle produced by `TracingEngine`

use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use tracing::{Dispatch, Level};
use tracing_appender::non_blocking::WorkerGuard;

use contracts::{ContractError, Severity, SinkKind};

use crate::level;

/// Snapshot of what an engine was configured with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSummary {
    /// Async buffer capacity (None = synchronous delivery)
    pub async_capacity: Option<usize>,
    /// Call-site annotation enabled
    pub call_depth: bool,
    /// Registered sinks, in order
    pub sinks: Vec<SinkKind>,
    /// Base paths of every opened file
    pub files: Vec<PathBuf>,
    /// Global threshold
    pub level: Option<Severity>,
}

/// Configured dispatcher
///
/// Owns the non-blocking writer guards; dropping the handle flushes every
/// pending record of an asynchronous dispatcher.
pub struct LogDispatch {
    dispatch: Dispatch,
    guards: Vec<WorkerGuard>,
    summary: EngineSummary,
}

impl LogDispatch {
    pub(crate) fn new(dispatch: Dispatch, guards: Vec<WorkerGuard>, summary: EngineSummary) -> Self {
        Self {
            dispatch,
            guards,
            summary,
        }
    }

    /// Configuration snapshot
    pub fn summary(&self) -> &EngineSummary {
        &self.summary
    }

    /// Run `f` with this dispatcher as the thread's default subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Emit one record with a runtime category and severity
    ///
    /// With call-site annotation enabled the record carries a `caller` field
    /// pointing at the code that called `emit`.
    #[track_caller]
    pub fn emit(&self, category: &str, severity: Severity, message: &str) {
        let location = Location::caller();
        let caller = self
            .summary
            .call_depth
            .then(|| tracing::field::display(location));
        let rank = severity.rank();
        self.in_scope(|| match level::to_level(severity) {
            Level::ERROR => tracing::error!(category, severity = rank, caller, "{}", message),
            Level::WARN => tracing::warn!(category, severity = rank, caller, "{}", message),
            Level::INFO => tracing::info!(category, severity = rank, caller, "{}", message),
            Level::DEBUG => tracing::debug!(category, severity = rank, caller, "{}", message),
            _ => tracing::trace!(category, severity = rank, caller, "{}", message),
        });
    }

    /// Install as the process-wide default subscriber
    ///
    /// The returned guard keeps asynchronous writers alive; drop it on shutdown.
    pub fn install_global(self) -> Result<FlushGuard, ContractError> {
        tracing::dispatcher::set_global_default(self.dispatch)
            .map_err(|e| ContractError::engine_state(e.to_string()))?;
        Ok(FlushGuard {
            _guards: self.guards,
        })
    }
}

impl fmt::Debug for LogDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogDispatch")
            .field("summary", &self.summary)
            .field("writers", &self.guards.len())
            .finish()
    }
}

/// Keeps asynchronous writers of a globally installed dispatcher alive
#[must_use = "dropping the guard stops asynchronous delivery"]
pub struct FlushGuard {
    _guards: Vec<WorkerGuard>,
}
