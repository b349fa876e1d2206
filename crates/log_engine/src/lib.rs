//! # Log Engine
//!
//! Engines implementing the `LogEngine` construction contract.
//!
//! - [`TracingEngine`]: real sinks on top of `tracing-subscriber` (formatting,
//!   filtering), `tracing-appender` (non-blocking delivery) and `file-rotate`
//!   (line, size and daily rotation)
//! - [`RecordingEngine`]: records configuration calls for inspection
//!
//! ## Categories
//!
//! The multi-file sink copies each listed category into its own file; the
//! default file keeps every record. A record's category is its `category`
//! field when present, otherwise its target.
//!
//! ```ignore
//! tracing::info!(category = "access", "GET /index.html");
//! tracing::error!(target: "error", "disk full");
//! ```

mod category;
mod handle;
mod level;
mod mock;
mod rotation;
mod tracing_engine;

pub use category::{category_of, CategoryFilter, CATEGORY_FIELD};
pub use handle::{EngineSummary, FlushGuard, LogDispatch};
pub use level::{severity_of, to_level, to_level_filter, SeverityFilter, SEVERITY_FIELD};
pub use mock::{EngineCall, Recording, RecordingEngine};
pub use tracing_engine::TracingEngine;
