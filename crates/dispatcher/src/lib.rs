//! # Dispatcher
//!
//! Logging dispatcher construction.
//!
//! Responsibilities:
//! - Translate a `LogConfig` into an ordered list of engine calls
//! - Encode per-sink option blobs at the engine boundary
//! - Surface every engine failure; never hand out a partial dispatcher
//!
//! ## Usage Example
//!
//! ```ignore
//! use dispatcher::create_dispatcher;
//! use log_engine::TracingEngine;
//!
//! let logger = create_dispatcher(Path::new("log.toml"), TracingEngine::new())?;
//! logger.in_scope(|| tracing::info!(category = "access", "GET /"));
//! ```

pub mod dispatcher;
pub mod error;
pub mod step;

pub use contracts::{LogConfig, LogEngine};
pub use dispatcher::{create_dispatcher, DispatcherBuilder, DEFAULT_ASYNC_CAPACITY};
pub use error::DispatcherError;
pub use step::ConfigStep;
