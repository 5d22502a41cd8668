//! Region grant fetchers.
//!
//! A [`RegionGrantFetcher`] returns every grant active on one regional
//! replica of an alias. Implementations own pagination and retries; callers
//! always receive a complete list or an error.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use grantlens_core::Grant;
use parking_lot::Mutex;

use crate::error::FetchError;

/// Fetches the grants of one regional key replica.
#[async_trait]
pub trait RegionGrantFetcher: Send + Sync {
    /// List every grant on `alias` in `region`, exhausting pagination.
    async fn fetch_grants(&self, alias: &str, region: &str) -> Result<Vec<Grant>, FetchError>;
}

/// Canned response for one (alias, region) pair.
#[derive(Debug, Clone)]
enum Fixture {
    Grants(Vec<Grant>),
    Failure(String),
}

/// In-memory fetcher serving fixed grant lists.
///
/// Unknown (alias, region) pairs fail with [`FetchError::KeyNotFound`].
/// Every call is recorded so tests can assert on fetch behaviour.
#[derive(Debug, Default)]
pub struct StaticGrantFetcher {
    fixtures: HashMap<(String, String), Fixture>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StaticGrantFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `grants` for `alias` in `region`.
    pub fn with_grants(
        mut self,
        alias: impl Into<String>,
        region: impl Into<String>,
        grants: Vec<Grant>,
    ) -> Self {
        self.fixtures
            .insert((alias.into(), region.into()), Fixture::Grants(grants));
        self
    }

    /// Fail every fetch of `alias` in `region` with an SDK error.
    pub fn with_failure(
        mut self,
        alias: impl Into<String>,
        region: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.fixtures
            .insert((alias.into(), region.into()), Fixture::Failure(message.into()));
        self
    }

    /// Delay every response from `region`.
    pub fn with_delay(mut self, region: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(region.into(), delay);
        self
    }

    /// Every (alias, region) fetch started so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RegionGrantFetcher for StaticGrantFetcher {
    async fn fetch_grants(&self, alias: &str, region: &str) -> Result<Vec<Grant>, FetchError> {
        self.calls
            .lock()
            .push((alias.to_string(), region.to_string()));

        if let Some(delay) = self.delays.get(region) {
            tokio::time::sleep(*delay).await;
        }

        match self.fixtures.get(&(alias.to_string(), region.to_string())) {
            Some(Fixture::Grants(grants)) => Ok(grants.clone()),
            Some(Fixture::Failure(message)) => Err(FetchError::sdk(message.clone())),
            None => Err(FetchError::key_not_found(format!("alias/{alias} in {region}"))),
        }
    }
}
