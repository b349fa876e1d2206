//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::LogConfig;
use dispatcher::{ConfigStep, DispatcherBuilder};

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    config: LogConfig,
    plan: Vec<PlannedCall>,
}

#[derive(Serialize)]
struct PlannedCall {
    step: &'static str,
    call: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    let plan = DispatcherBuilder::new(config.clone()).plan();

    if args.json {
        let info = build_config_info(config, &plan);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, &plan);
    }

    Ok(())
}

fn build_config_info(config: LogConfig, plan: &[ConfigStep]) -> ConfigInfo {
    let plan = plan
        .iter()
        .map(|step| PlannedCall {
            step: step.name(),
            call: step.to_string(),
        })
        .collect();

    ConfigInfo { config, plan }
}

fn print_config_info(config: &LogConfig, plan: &[ConfigStep]) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Logging Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    // Console
    println!("🖥  Console");
    if config.adapter_console {
        println!("   └─ Level: {}", config.console_level);
    } else {
        println!("   └─ Disabled");
    }

    // File
    println!("\n📄 File");
    println!("   ├─ Path: {}", config.file);
    println!("   ├─ Level: {}", config.file_level);
    if config.rotate {
        println!(
            "   ├─ Rotate: daily={} maxlines={} maxsize={} maxdays={}",
            config.daily, config.maxlines, config.maxsize, config.maxdays
        );
    } else {
        println!("   ├─ Rotate: off");
    }
    if config.multifile {
        println!("   └─ Separate: {:?}", config.separate);
    } else {
        println!("   └─ Separate: (single file)");
    }

    // Delivery
    println!("\n⚙️  Delivery");
    if config.async_mode {
        println!("   ├─ Async: chan_length={}", config.chan_length);
    } else {
        println!("   ├─ Async: off");
    }
    println!("   └─ Call-site annotation: {}", config.enable_func_call_depth);

    // Plan
    println!("\n📋 Engine calls ({})", plan.len());
    for (i, step) in plan.iter().enumerate() {
        let prefix = if i == plan.len() - 1 { "└─" } else { "├─" };
        println!("   {} {}", prefix, step);
    }

    println!();
}
