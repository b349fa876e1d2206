//! Layered error definitions
//!
//! Categorized by source: config / sink options / engine

use thiserror::Error;

use crate::SinkKind;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sink Errors =====
    /// Option blob could not be encoded or decoded
    #[error("{kind} sink options error: {message}")]
    OptionEncode { kind: SinkKind, message: String },

    /// Engine refused or failed to open a sink
    #[error("{kind} sink registration error: {message}")]
    SinkRegistration { kind: SinkKind, message: String },

    // ===== Engine Errors =====
    /// Call made in a state the engine cannot honor
    #[error("engine state error: {message}")]
    EngineState { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create option encode/decode error
    pub fn option_encode(kind: SinkKind, message: impl ToString) -> Self {
        Self::OptionEncode {
            kind,
            message: message.to_string(),
        }
    }

    /// Create sink registration error
    pub fn sink_registration(kind: SinkKind, message: impl Into<String>) -> Self {
        Self::SinkRegistration {
            kind,
            message: message.into(),
        }
    }

    /// Create engine state error
    pub fn engine_state(message: impl Into<String>) -> Self {
        Self::EngineState {
            message: message.into(),
        }
    }
}
