//! Severity thresholds on top of `tracing` levels
//!
//! | rank | name(s)                             | tracing |
//! |------|-------------------------------------|---------|
//! | 0-3  | emergency, alert, critical, error   | ERROR   |
//! | 4    | warning                             | WARN    |
//! | 5-6  | notice, informational               | INFO    |
//! | 7    | debug                               | DEBUG   |
//! | 8+   | (beyond scale)                      | TRACE   |
//!
//! Several ranks share a `tracing` level, so the level alone cannot enforce a
//! threshold. [`SeverityFilter`] compares the exact rank carried in the
//! `severity` field and falls back to the level for events without one.

use std::fmt;

use contracts::Severity;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Filter, Layer};

/// Event field carrying the exact severity rank
pub const SEVERITY_FIELD: &str = "severity";

/// Level a record of this severity is emitted at
pub fn to_level(severity: Severity) -> Level {
    match severity.rank() {
        0..=3 => Level::ERROR,
        4 => Level::WARN,
        5 | 6 => Level::INFO,
        7 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Coarsest level filter admitting every record at or above this threshold
pub fn to_level_filter(threshold: Severity) -> LevelFilter {
    LevelFilter::from_level(to_level(threshold))
}

/// Exact rank of an event, if it carries one
pub fn severity_of(event: &Event<'_>) -> Option<Severity> {
    event.metadata().fields().field(SEVERITY_FIELD)?;
    let mut visitor = SeverityVisitor(None);
    event.record(&mut visitor);
    visitor.0
}

struct SeverityVisitor(Option<Severity>);

impl Visit for SeverityVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == SEVERITY_FIELD {
            self.0 = Some(Severity::from(u8::try_from(value).unwrap_or(u8::MAX)));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == SEVERITY_FIELD {
            self.0 = Some(Severity::from(u8::try_from(value).unwrap_or(u8::MAX)));
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

/// Threshold on the severity scale
///
/// Works both as a per-layer [`Filter`] (console sink) and as a global
/// [`Layer`] (dispatcher threshold).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityFilter {
    threshold: Severity,
}

impl SeverityFilter {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    fn admits_metadata(&self, metadata: &Metadata<'_>) -> bool {
        to_level_filter(self.threshold) >= *metadata.level()
    }

    fn admits_event(&self, event: &Event<'_>) -> bool {
        match severity_of(event) {
            Some(rank) => self.threshold.admits(rank),
            None => self.admits_metadata(event.metadata()),
        }
    }
}

impl<S> Filter<S> for SeverityFilter {
    fn enabled(&self, metadata: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        self.admits_metadata(metadata)
    }

    fn event_enabled(&self, event: &Event<'_>, _cx: &Context<'_, S>) -> bool {
        self.admits_event(event)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(to_level_filter(self.threshold))
    }
}

impl<S: Subscriber> Layer<S> for SeverityFilter {
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.admits_metadata(metadata)
    }

    fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
        self.admits_event(event)
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(to_level_filter(self.threshold))
    }
}
