//! Configuration management commands.

use std::path::Path;

use clap::Args;
use console::style;
use grantlens_core::config::Config;
use grantlens_core::paths;

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,

    /// Write a default configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the config command.
///
/// `config` is the effective configuration already loaded (and validated)
/// by the caller; `path` is the file named with `--config`, if any.
pub fn run(args: ConfigArgs, path: Option<&Path>, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", config.to_json5()?);
        }

        ConfigCommand::Path => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => paths::config_file()?,
            };
            println!("{}", path.display());
        }

        ConfigCommand::Validate => {
            config.validate()?;
            println!("{} Configuration is valid", style("✓").green());
        }

        ConfigCommand::Init { force } => {
            let path = match path {
                Some(path) => path.to_path_buf(),
                None => paths::config_file()?,
            };

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {}. Use --force to overwrite.",
                    path.display()
                );
            }

            Config::default().save(&path)?;
            println!("Created config file: {}", path.display());
        }
    }

    Ok(())
}
