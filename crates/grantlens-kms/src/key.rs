//! Multi-region key handle.

use std::collections::BTreeSet;

use futures::future::try_join_all;
use grantlens_core::config::FetchMode;
use grantlens_core::RegionGrantMap;
use tracing::debug;

use crate::error::{GrantError, Result};
use crate::fetcher::RegionGrantFetcher;

/// One alias and the regions its replicas live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiRegionKey {
    alias: String,
    regions: BTreeSet<String>,
}

impl MultiRegionKey {
    /// Create a handle for `alias` spanning `regions`.
    pub fn new<I, S>(alias: impl Into<String>, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            alias: alias.into(),
            regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// The alias name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The regions spanned, in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(String::as_str)
    }

    /// Fetch the grants of every regional replica.
    ///
    /// All or nothing: the first failing region aborts the call and no
    /// partially filled map is returned. In [`FetchMode::Parallel`] the
    /// outstanding fetches are dropped as soon as one fails.
    pub async fn get_grant_details(
        &self,
        fetcher: &dyn RegionGrantFetcher,
        mode: FetchMode,
    ) -> Result<RegionGrantMap> {
        match mode {
            FetchMode::Sequential => {
                let mut map = RegionGrantMap::new();
                for region in &self.regions {
                    let grants = self.fetch_region(fetcher, region).await?;
                    map.insert(region.clone(), grants);
                }
                Ok(map)
            }
            FetchMode::Parallel => {
                let fetches = self.regions.iter().map(|region| async move {
                    let grants = self.fetch_region(fetcher, region).await?;
                    Ok::<_, GrantError>((region.clone(), grants))
                });
                Ok(try_join_all(fetches).await?.into_iter().collect())
            }
        }
    }

    async fn fetch_region(
        &self,
        fetcher: &dyn RegionGrantFetcher,
        region: &str,
    ) -> Result<Vec<grantlens_core::Grant>> {
        let grants = fetcher
            .fetch_grants(&self.alias, region)
            .await
            .map_err(|source| GrantError::Fetch {
                alias: self.alias.clone(),
                region: region.to_string(),
                source,
            })?;
        debug!(alias = %self.alias, region, count = grants.len(), "fetched region grants");
        Ok(grants)
    }
}
