//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// logcfg - Build logging dispatchers from declarative configuration
#[derive(Parser, Debug)]
#[command(
    name = "logcfg",
    author,
    version,
    about = "Declarative logging dispatcher builder",
    long_about = "Builds a logging dispatcher from a TOML/JSON configuration file.\n\n\
                  Routes records to a console sink, a rotating file sink or one file \n\
                  per category, with per-sink thresholds and optional async delivery."
)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGCFG_VERBOSE")]
    pub verbose: u8,

    /// Suppress diagnostics except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic output format (always written to stderr)
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LOGCFG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file without building
    Validate(ValidateArgs),

    /// Display configuration and the engine call plan
    Info(InfoArgs),

    /// Build the dispatcher and emit a single record
    Emit(EmitArgs),

    /// Build the dispatcher and emit every stdin line as a record
    Pipe(PipeArgs),
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "log.toml", env = "LOGCFG_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "log.toml", env = "LOGCFG_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Record addressing shared by `emit` and `pipe`
#[derive(Parser, Debug, Clone)]
pub struct RecordArgs {
    /// Record category (routes to a separate file in multifile mode)
    #[arg(long, default_value = "app", env = "LOGCFG_CATEGORY")]
    pub category: String,

    /// Record severity rank (0 = emergency .. 7 = debug)
    #[arg(long, default_value = "6", value_parser = clap::value_parser!(u8).range(0..=7))]
    pub level: u8,
}

/// Arguments for the `emit` command
#[derive(Parser, Debug)]
pub struct EmitArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "log.toml", env = "LOGCFG_CONFIG")]
    pub config: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Message to emit
    pub message: String,
}

/// Arguments for the `pipe` command
#[derive(Parser, Debug)]
pub struct PipeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "log.toml", env = "LOGCFG_CONFIG")]
    pub config: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Skip empty input lines
    #[arg(long)]
    pub skip_empty: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "LOGCFG_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Diagnostic output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
