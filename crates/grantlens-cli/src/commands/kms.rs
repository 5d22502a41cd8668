//! AWS KMS commands.
//!
//! Provides `grantlens kms grants list <name>`, which prints the grants of
//! every multi-region alias protecting a secret, reconciled across regions.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use grantlens_core::config::{Config, DivergencePolicy, FetchMode};
use grantlens_kms::{AwsGrantFetcher, GrantLister, ListOptions};
use grantlens_secrets::{FileSecretStore, StoreKeyLookup};
use tracing::debug;

use crate::render::{self, OutputFormat};

/// KMS command arguments.
#[derive(Args)]
pub struct KmsArgs {
    #[command(subcommand)]
    pub command: KmsCommand,
}

#[derive(clap::Subcommand)]
pub enum KmsCommand {
    /// Inspect grants on the keys protecting a secret
    Grants(GrantsArgs),
}

/// Grants command arguments.
#[derive(Args)]
pub struct GrantsArgs {
    #[command(subcommand)]
    pub command: GrantsCommand,
}

#[derive(clap::Subcommand)]
pub enum GrantsCommand {
    /// List grants across every region of each key, grouped by grant name
    List(ListArgs),
}

/// Arguments for `kms grants list`.
#[derive(Args)]
pub struct ListArgs {
    /// Name of the secret to list grants for
    pub name: String,

    /// Secret store file
    #[arg(short, long, env = "GRANTLENS_FILENAME")]
    pub filename: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,

    /// Fetch all regions of a key concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Fail instead of warning when regional copies of a grant disagree
    #[arg(long)]
    pub fail_on_divergence: bool,
}

impl ListArgs {
    /// Listing options from the config, with command-line flags applied on top.
    pub fn options(&self, config: &Config) -> ListOptions {
        let mut options = ListOptions::from_config(config);
        if self.parallel {
            options.fetch_mode = FetchMode::Parallel;
        }
        if self.fail_on_divergence {
            options.divergence = DivergencePolicy::Fail;
        }
        options
    }

    /// The store file named on the command line, else the configured one.
    pub fn store_path(&self, config: &Config) -> anyhow::Result<PathBuf> {
        match &self.filename {
            Some(path) => Ok(path.clone()),
            None => Ok(config.store_path()?),
        }
    }
}

/// Run the kms command.
pub async fn run(args: KmsArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        KmsCommand::Grants(grants) => match grants.command {
            GrantsCommand::List(list) => list_grants(list, config).await,
        },
    }
}

async fn list_grants(args: ListArgs, config: &Config) -> anyhow::Result<()> {
    let store_path = args.store_path(config)?;
    debug!(store = %store_path.display(), "using secret store");
    let lookup = StoreKeyLookup::new(FileSecretStore::new(store_path));

    let mut fetcher = AwsGrantFetcher::from_env(config.aws.profile.as_deref()).await;
    if let Some(url) = &config.aws.endpoint_url {
        fetcher = fetcher.with_endpoint_url(url);
    }
    if let Some(size) = config.fetch.page_size {
        fetcher = fetcher.with_page_size(size);
    }

    let lister = GrantLister::new(Arc::new(lookup), Arc::new(fetcher), args.options(config));
    let document = render_listing(&lister, &args.name, args.output).await?;
    print!("{}", document);
    Ok(())
}

/// List and render the grants for `name`. Nothing is rendered on failure.
pub async fn render_listing(
    lister: &GrantLister,
    name: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let output = lister.list_grants(name).await?;
    render::render(&output, format)
}
