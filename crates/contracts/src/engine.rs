//! LogEngine trait - construction API of the underlying logging engine
//!
//! The dispatcher builder drives an engine exclusively through this trait.

use crate::{ContractError, Severity, SinkKind};

/// Logging engine construction interface
///
/// An implementation starts empty and is configured by a fixed sequence of
/// calls, then turned into a ready dispatcher handle by [`LogEngine::finish`].
pub trait LogEngine {
    /// Ready-to-use dispatcher produced by the engine
    type Handle;

    /// Switch to asynchronous delivery with the given buffer capacity
    fn set_async(&mut self, capacity: usize) -> Result<(), ContractError>;

    /// Enable or disable call-site (file/line) annotation
    fn enable_func_call_depth(&mut self, enabled: bool) -> Result<(), ContractError>;

    /// Register a sink of `kind` configured by a JSON option blob
    ///
    /// # Errors
    /// Returns a registration error if the blob is malformed or the sink
    /// cannot be opened (should include context)
    fn set_logger(&mut self, kind: SinkKind, options: &str) -> Result<(), ContractError>;

    /// Set the dispatcher-wide minimum severity
    fn set_level(&mut self, level: Severity) -> Result<(), ContractError>;

    /// Produce the configured dispatcher
    fn finish(self) -> Result<Self::Handle, ContractError>;
}
