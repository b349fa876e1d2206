//! Severity - integer rank shared with the logging engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity rank on the engine's fixed scale.
///
/// Lower is more severe. A threshold `n` admits every record whose rank is
/// `<= n`. The value is carried verbatim from configuration to engine.
///
/// # Examples
/// ```
/// use contracts::Severity;
///
/// assert!(Severity::ERROR.admits(Severity::CRITICAL));
/// assert!(!Severity::ERROR.admits(Severity::DEBUG));
/// assert_eq!(Severity::from(4).name(), Some("warning"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(u8);

impl Severity {
    pub const EMERGENCY: Self = Self(0);
    pub const ALERT: Self = Self(1);
    pub const CRITICAL: Self = Self(2);
    pub const ERROR: Self = Self(3);
    pub const WARNING: Self = Self(4);
    pub const NOTICE: Self = Self(5);
    pub const INFORMATIONAL: Self = Self(6);
    pub const DEBUG: Self = Self(7);

    const NAMES: [&'static str; 8] = [
        "emergency",
        "alert",
        "critical",
        "error",
        "warning",
        "notice",
        "informational",
        "debug",
    ];

    /// Raw rank
    #[inline]
    pub fn rank(self) -> u8 {
        self.0
    }

    /// Whether the rank is on the known scale (`0..=7`)
    pub fn is_known(self) -> bool {
        usize::from(self.0) < Self::NAMES.len()
    }

    /// Canonical name, if the rank is on the known scale
    pub fn name(self) -> Option<&'static str> {
        Self::NAMES.get(usize::from(self.0)).copied()
    }

    /// Whether a record of severity `record` passes this threshold
    #[inline]
    pub fn admits(self, record: Severity) -> bool {
        record.0 <= self.0
    }
}

impl From<u8> for Severity {
    fn from(rank: u8) -> Self {
        Self(rank)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
