//! grantlens command-line interface.

pub mod commands;
pub mod render;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use grantlens_core::config::{Config, LogLevel};
use grantlens_core::ConfigError;
use grantlens_core::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// grantlens - multi-region KMS grant inspector
#[derive(Parser)]
#[command(name = "grantlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "GRANTLENS_CONFIG", global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect AWS KMS keys protecting a secret
    Kms(commands::kms::KmsArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Load the config file named on the command line, or the default one.
///
/// A missing file means defaults (so `config init` can create it); an
/// unreadable or unparseable one is an error, whether named with `--config`
/// or found at the default path. Environment overrides are applied and the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = match Config::load(path) {
                Ok(config) => config,
                Err(ConfigError::NotFound(_)) => Config::default(),
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to load config from {}", path.display())
                    })
                }
            };
            config.apply_env_overrides();
            config
        }
        None => Config::load_or_default().context("Failed to load default config")?,
    };
    config.validate()?;
    Ok(config)
}

/// Filter directive for our crates at the level implied by `-v` and the config.
///
/// Dependencies (AWS SDK, hyper) stay at `warn`.
pub fn log_directive(verbose: u8, level: LogLevel) -> String {
    let level = match verbose {
        0 => level,
        1 => LogLevel::Info.min(level),
        2 => LogLevel::Debug.min(level),
        _ => LogLevel::Trace,
    };
    let level = level.as_str();
    format!(
        "warn,grantlens_core={level},grantlens_secrets={level},grantlens_kms={level},grantlens_cli={level}"
    )
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `GRANTLENS_LOG` takes precedence over `-v` and the configured level.
pub fn init_logging(verbose: u8, level: LogLevel) {
    let filter = EnvFilter::try_from_env(env::vars::GRANTLENS_LOG)
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose, level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Kms(args) => commands::kms::run(args, &config).await,
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref(), &config),
        Commands::Version => {
            println!("grantlens {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
