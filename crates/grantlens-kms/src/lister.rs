//! Top-level grant listing.

use std::sync::Arc;

use grantlens_core::config::{Config, DivergencePolicy, FetchMode};
use grantlens_core::AliasReconciliation;
use grantlens_secrets::KeyLookup;
use tracing::{info, warn};

use crate::error::{GrantError, Result};
use crate::fetcher::RegionGrantFetcher;
use crate::key::MultiRegionKey;
use crate::reconcile::{find_divergences, reconcile};

/// Options controlling how grants are fetched and merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// How the regions of each key are fetched.
    pub fetch_mode: FetchMode,
    /// What to do when regional copies of a grant disagree.
    pub divergence: DivergencePolicy,
}

impl ListOptions {
    /// Take the fetch and reconcile settings from a config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch_mode: config.fetch.mode,
            divergence: config.reconcile.on_divergence,
        }
    }
}

/// Lists the reconciled grants of every KMS alias protecting a secret.
pub struct GrantLister {
    lookup: Arc<dyn KeyLookup>,
    fetcher: Arc<dyn RegionGrantFetcher>,
    options: ListOptions,
}

impl GrantLister {
    /// Create a lister.
    pub fn new(
        lookup: Arc<dyn KeyLookup>,
        fetcher: Arc<dyn RegionGrantFetcher>,
        options: ListOptions,
    ) -> Self {
        Self {
            lookup,
            fetcher,
            options,
        }
    }

    /// Resolve `secret_name` to its aliases, fetch every region of every
    /// alias, and reconcile each alias's grants.
    ///
    /// Any lookup or fetch failure aborts the whole listing; no partial
    /// result is ever returned.
    pub async fn list_grants(&self, secret_name: &str) -> Result<AliasReconciliation> {
        let aliases = self.lookup.resolve(secret_name).await?;

        let mut output = AliasReconciliation::new();
        for (alias, regions) in aliases {
            let key = MultiRegionKey::new(alias, regions);
            let region_grants = key
                .get_grant_details(self.fetcher.as_ref(), self.options.fetch_mode)
                .await?;

            self.check_divergences(key.alias(), &region_grants)?;

            let logical = reconcile(&region_grants);
            info!(
                secret = secret_name,
                alias = key.alias(),
                regions = region_grants.len(),
                grants = logical.len(),
                "reconciled grants"
            );
            output.insert(key.alias().to_string(), logical);
        }

        Ok(output)
    }

    fn check_divergences(
        &self,
        alias: &str,
        region_grants: &grantlens_core::RegionGrantMap,
    ) -> Result<()> {
        if self.options.divergence == DivergencePolicy::Ignore {
            return Ok(());
        }

        for divergence in find_divergences(region_grants) {
            match self.options.divergence {
                DivergencePolicy::Fail => {
                    return Err(GrantError::Divergent {
                        alias: alias.to_string(),
                        divergence,
                    });
                }
                _ => warn!(alias, %divergence, "regional grant copies disagree, keeping first region's values"),
            }
        }
        Ok(())
    }
}
