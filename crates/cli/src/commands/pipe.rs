//! `pipe` command implementation.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use contracts::Severity;
use log_engine::LogDispatch;
use observability::EmitStats;

use crate::cli::{PipeArgs, RecordArgs};
use crate::commands::build_dispatcher;

/// Execute the `pipe` command
pub async fn run_pipe(args: &PipeArgs) -> Result<()> {
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let logger = build_dispatcher(&args.config)
        .with_context(|| format!("Failed to build dispatcher from {}", args.config.display()))?;

    let shutdown_signal = setup_shutdown_signal();
    let mut stats = EmitStats::new();

    info!(category = %args.record.category, level = args.record.level, "Reading records from stdin");

    tokio::select! {
        result = pump_lines(
            BufReader::new(tokio::io::stdin()),
            &logger,
            &args.record,
            args.skip_empty,
            &mut stats,
        ) => {
            result.context("Failed to read stdin")?;
            info!(records = stats.total_records(), "Input closed");
        }
        _ = shutdown_signal => {
            warn!(records = stats.total_records(), "Received shutdown signal, stopping");
        }
    }

    // Flush before printing the summary so the numbers are final
    drop(logger);
    print_summary(&stats);
    Ok(())
}

async fn pump_lines<R>(
    reader: R,
    logger: &LogDispatch,
    record: &RecordArgs,
    skip_empty: bool,
    stats: &mut EmitStats,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let severity = Severity::from(record.level);
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if skip_empty && line.trim().is_empty() {
            stats.skip();
            observability::record_skipped();
            continue;
        }
        logger.emit(&record.category, severity, &line);
        observability::record_emitted(&record.category, severity, line.len());
        stats.record(&record.category, line.len());
    }
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn print_summary(stats: &EmitStats) {
    let summary = stats.summary();
    eprintln!("\n=== Pipe Summary ===\n");
    eprintln!("  Records: {}", summary.total_records);
    eprintln!("  Bytes:   {}", summary.total_bytes);
    if summary.skipped > 0 {
        eprintln!("  Skipped: {}", summary.skipped);
    }
    for (category, count) in &summary.per_category {
        eprintln!("  - {}: {}", category, count);
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::LogConfig;
    use dispatcher::DispatcherBuilder;
    use log_engine::TracingEngine;

    #[tokio::test]
    async fn test_pump_lines_emits_each_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipe.log");
        let config = LogConfig {
            file: path.display().to_string(),
            file_level: Severity::DEBUG,
            ..Default::default()
        };
        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();

        let record = RecordArgs {
            category: "access".to_string(),
            level: 6,
        };
        let input: &[u8] = b"GET /\n\nPOST /login\n";
        let mut stats = EmitStats::new();
        pump_lines(input, &logger, &record, true, &mut stats)
            .await
            .unwrap();
        drop(logger);

        let summary = stats.summary();
        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.per_category.get("access"), Some(&2));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("GET /"));
        assert!(content.contains("POST /login"));
    }
}
