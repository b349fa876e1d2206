//! Sink kinds and their typed option blobs
//!
//! Options stay statically typed inside the workspace and are encoded to the
//! engine's JSON wire form only at the `set_logger` boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ContractError, Severity};

/// Sink kinds understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// Console writer
    Console,
    /// Single file, optionally rotating
    File,
    /// Default file plus one file per separated category
    #[serde(rename = "multifile")]
    MultiFile,
}

impl SinkKind {
    /// Adapter name on the engine side
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::File => "file",
            Self::MultiFile => "multifile",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console sink options: `{"level": n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleOptions {
    pub level: Severity,
}

/// File sink options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    pub filename: String,
    pub maxlines: u64,
    pub maxsize: u64,
    pub daily: bool,
    pub maxdays: u64,
    pub rotate: bool,
}

/// Multi-file sink options: file options plus the separated categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFileOptions {
    #[serde(flatten)]
    pub file: FileOptions,
    pub separate: Vec<String>,
}

/// Options for one sink registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOptions {
    Console(ConsoleOptions),
    File(FileOptions),
    MultiFile(MultiFileOptions),
}

impl SinkOptions {
    /// Kind the options are registered under
    pub fn kind(&self) -> SinkKind {
        match self {
            Self::Console(_) => SinkKind::Console,
            Self::File(_) => SinkKind::File,
            Self::MultiFile(_) => SinkKind::MultiFile,
        }
    }

    /// Encode to the engine's JSON option blob
    ///
    /// # Errors
    /// Returns [`ContractError::OptionEncode`] if serialization fails
    pub fn encode(&self) -> Result<String, ContractError> {
        let encoded = match self {
            Self::Console(opts) => serde_json::to_string(opts),
            Self::File(opts) => serde_json::to_string(opts),
            Self::MultiFile(opts) => serde_json::to_string(opts),
        };
        encoded.map_err(|e| ContractError::option_encode(self.kind(), e))
    }

    /// Decode an option blob received for `kind`
    ///
    /// # Errors
    /// Returns [`ContractError::OptionEncode`] if the blob does not match the kind
    pub fn decode(kind: SinkKind, blob: &str) -> Result<Self, ContractError> {
        let decoded = match kind {
            SinkKind::Console => serde_json::from_str(blob).map(Self::Console),
            SinkKind::File => serde_json::from_str(blob).map(Self::File),
            SinkKind::MultiFile => serde_json::from_str(blob).map(Self::MultiFile),
        };
        decoded.map_err(|e| ContractError::option_encode(kind, e))
    }
}
