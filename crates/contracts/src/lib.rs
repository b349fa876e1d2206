//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Severity Model
//! - Ranks follow RFC 5424 ordering: `0` (emergency) is the most severe,
//!   `7` (debug) the least
//! - Ranks are passed to the engine unchanged, never remapped here

mod config;
mod engine;
mod error;
mod severity;
mod sink;

pub use config::*;
pub use engine::LogEngine;
pub use error::*;
pub use severity::Severity;
pub use sink::*;
