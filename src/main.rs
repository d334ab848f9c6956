// Main entrypoint for the freqsketch replay tool.

use anyhow::{Context, Result};
use clap::Parser;
use freqsketch::config::{Config, ConfigTrait};
use freqsketch::replay;
use freqsketch::stats::meter;
use std::path::PathBuf;
use tracing::info;

const CONFIG_PATH: &str = "cfg/freqsketch.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/freqsketch.cfg.local.yaml";

/// freqsketch - replay a skewed trace through a TinyLFU-guarded cache
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then falls back to default config.
fn load_cfg(path: Option<PathBuf>) -> Result<Config> {
    if let Some(custom_path) = path {
        return Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path));
    }

    match Config::load(PathBuf::from(CONFIG_PATH_LOCAL)) {
        Ok(cfg) => Ok(cfg),
        Err(_) => Config::load(PathBuf::from(CONFIG_PATH))
            .with_context(|| format!("failed to load config from {}", CONFIG_PATH)),
    }
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_ref())
        .map(|s| s.as_str())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logger is configured from the loaded config.
    let cfg = load_cfg(args.cfg)?;
    configure_logger(&cfg);
    info!(component = "config", event = "load_success", "config loaded");

    let snapshot = replay::run(&cfg)?;

    if cfg.stats().map_or(true, |s| s.enabled) {
        meter::publish(&snapshot);
        let json = serde_json::to_string(&snapshot).context("encode stats snapshot")?;
        info!(
            component = "main",
            event = "stats",
            stats = %json,
            "final cache statistics"
        );
    }
    println!("{snapshot}");
    Ok(())
}
