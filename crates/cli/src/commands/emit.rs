//! `emit` command implementation.

use anyhow::{Context, Result};
use contracts::Severity;

use crate::cli::EmitArgs;
use crate::commands::build_dispatcher;

/// Execute the `emit` command
pub fn run_emit(args: &EmitArgs) -> Result<()> {
    let logger = build_dispatcher(&args.config)
        .with_context(|| format!("Failed to build dispatcher from {}", args.config.display()))?;

    let severity = Severity::from(args.record.level);
    logger.emit(&args.record.category, severity, &args.message);
    observability::record_emitted(&args.record.category, severity, args.message.len());

    // Dropping the handle flushes async writers
    drop(logger);
    Ok(())
}
