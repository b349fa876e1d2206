//! RecordingEngine - in-memory engine that records configuration calls
//!
//! Used to observe construction order and option blobs without touching the
//! file system.

use contracts::{ContractError, LogEngine, Severity, SinkKind, SinkOptions};

/// One configuration call observed by [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetAsync(usize),
    EnableFuncCallDepth(bool),
    SetLogger { kind: SinkKind, options: String },
    SetLevel(Severity),
}

/// Engine that records every call in order
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
    fail_on: Option<SinkKind>,
}

impl RecordingEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject registrations of `kind` (for error-path tests)
    pub fn failing_on(mut self, kind: SinkKind) -> Self {
        self.fail_on = Some(kind);
        self
    }
}

impl LogEngine for RecordingEngine {
    type Handle = Recording;

    fn set_async(&mut self, capacity: usize) -> Result<(), ContractError> {
        self.calls.push(EngineCall::SetAsync(capacity));
        Ok(())
    }

    fn enable_func_call_depth(&mut self, enabled: bool) -> Result<(), ContractError> {
        self.calls.push(EngineCall::EnableFuncCallDepth(enabled));
        Ok(())
    }

    fn set_logger(&mut self, kind: SinkKind, options: &str) -> Result<(), ContractError> {
        if self.fail_on == Some(kind) {
            return Err(ContractError::sink_registration(kind, "mock failure"));
        }
        // Reject blobs a real engine could not read either
        SinkOptions::decode(kind, options)?;
        self.calls.push(EngineCall::SetLogger {
            kind,
            options: options.to_string(),
        });
        Ok(())
    }

    fn set_level(&mut self, level: Severity) -> Result<(), ContractError> {
        self.calls.push(EngineCall::SetLevel(level));
        Ok(())
    }

    fn finish(self) -> Result<Self::Handle, ContractError> {
        Ok(Recording { calls: self.calls })
    }
}

/// Handle produced by [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    calls: Vec<EngineCall>,
}

impl Recording {
    /// Calls in the order they were issued
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Async capacity, if async mode was requested
    pub fn async_capacity(&self) -> Option<usize> {
        self.calls.iter().find_map(|c| match c {
            EngineCall::SetAsync(capacity) => Some(*capacity),
            _ => None,
        })
    }

    /// Decoded options of every registered sink
    pub fn sinks(&self) -> Vec<SinkOptions> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::SetLogger { kind, options } => SinkOptions::decode(*kind, options).ok(),
                _ => None,
            })
            .collect()
    }

    /// Last global level set, if any
    pub fn level(&self) -> Option<Severity> {
        self.calls.iter().rev().find_map(|c| match c {
            EngineCall::SetLevel(level) => Some(*level),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut engine = RecordingEngine::new();
        engine.set_async(8).unwrap();
        engine.set_logger(SinkKind::Console, r#"{"level":7}"#).unwrap();
        engine.set_level(Severity::ERROR).unwrap();

        let recording = engine.finish().unwrap();
        assert_eq!(recording.calls().len(), 3);
        assert_eq!(recording.async_capacity(), Some(8));
        assert_eq!(recording.level(), Some(Severity::ERROR));
        assert_eq!(recording.sinks().len(), 1);
    }

    #[test]
    fn test_rejects_malformed_blob() {
        let mut engine = RecordingEngine::new();
        let result = engine.set_logger(SinkKind::Console, "{not json");
        assert!(matches!(result, Err(ContractError::OptionEncode { .. })));
        assert!(engine.finish().unwrap().calls().is_empty());
    }

    #[test]
    fn test_failing_on_kind() {
        let mut engine = RecordingEngine::new().failing_on(SinkKind::Console);
        let result = engine.set_logger(SinkKind::Console, r#"{"level":3}"#);
        assert!(matches!(
            result,
            Err(ContractError::SinkRegistration {
                kind: SinkKind::Console,
                ..
            })
        ));
    }
}
