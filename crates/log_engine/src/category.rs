//! Category routing for the multi-file sink
//!
//! A record's category is the value of its `category` field when present,
//! otherwise its target.

use std::borrow::Cow;
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Metadata};
use tracing_subscriber::layer::{Context, Filter};

/// Event field carrying the routing category
pub const CATEGORY_FIELD: &str = "category";

/// Category of an event
pub fn category_of<'a>(event: &'a Event<'_>) -> Cow<'a, str> {
    let metadata = event.metadata();
    if metadata.fields().field(CATEGORY_FIELD).is_some() {
        let mut visitor = CategoryVisitor(None);
        event.record(&mut visitor);
        if let Some(category) = visitor.0 {
            return Cow::Owned(category);
        }
    }
    Cow::Borrowed(metadata.target())
}

struct CategoryVisitor(Option<String>);

impl Visit for CategoryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == CATEGORY_FIELD {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == CATEGORY_FIELD {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

/// Per-layer filter admitting a single category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    /// Whether an event of `category` passes
    pub fn admits(&self, category: &str) -> bool {
        self.category == category
    }
}

impl<S> Filter<S> for CategoryFilter {
    fn enabled(&self, _meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        // Field values are only visible per event
        true
    }

    fn event_enabled(&self, event: &Event<'_>, _cx: &Context<'_, S>) -> bool {
        self.admits(&category_of(event))
    }
}
