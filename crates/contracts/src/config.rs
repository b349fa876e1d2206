//! LogConfig - Config Loader output
//!
//! Flat description of which sinks to enable and how to parameterise them.

use serde::{Deserialize, Serialize};

use crate::Severity;

/// Decoded logging settings.
///
/// Every field defaults to its zero value (false / 0 / empty) so a text decoder
/// only overwrites the keys present in the source. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Enable the console sink
    pub adapter_console: bool,

    /// Threshold of the console sink
    pub console_level: Severity,

    /// Path of the primary file sink
    pub file: String,

    /// Threshold applied to the dispatcher as a whole
    pub file_level: Severity,

    /// Annotate records with call-site file and line
    pub enable_func_call_depth: bool,

    /// Deliver records through a buffered asynchronous channel
    #[serde(rename = "async")]
    pub async_mode: bool,

    /// Async buffer capacity, meaningful only when `async` is set
    pub chan_length: usize,

    /// Enable file rotation
    pub rotate: bool,

    /// Rotate after this many lines (0 = unlimited)
    pub maxlines: u64,

    /// Rotate after this many bytes (0 = unlimited)
    pub maxsize: u64,

    /// Rotate at day boundaries
    pub daily: bool,

    /// Number of rotated files to retain
    pub maxdays: u64,

    /// Split output across one file per category
    pub multifile: bool,

    /// Categories with their own file, meaningful only when `multifile` is set
    pub separate: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_object_yields_defaults() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());
        assert!(!config.async_mode);
        assert_eq!(config.chan_length, 0);
        assert!(config.separate.is_empty());
    }

    #[test]
    fn test_async_key_name() {
        let config: LogConfig =
            serde_json::from_str(r#"{"async": true, "chan_length": 64}"#).unwrap();
        assert!(config.async_mode);
        assert_eq!(config.chan_length, 64);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["async"], true);
        assert!(json.get("async_mode").is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: LogConfig =
            serde_json::from_str(r#"{"file": "app.log", "color": true}"#).unwrap();
        assert_eq!(config.file, "app.log");
    }
}
