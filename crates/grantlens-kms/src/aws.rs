//! AWS KMS grant fetcher.
//!
//! One [`SdkConfig`] is loaded up front; a region-pinned client is derived
//! from it for every fetch. The alias is first resolved to the replica's key
//! ARN (grant listing does not accept aliases), then `ListGrants` is paged
//! until the provider stops returning a marker.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_kms::config::Region;
use aws_sdk_kms::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_kms::types::GrantListEntry;
use aws_sdk_kms::Client;
use grantlens_core::Grant;
use tracing::debug;

use crate::error::FetchError;
use crate::fetcher::RegionGrantFetcher;

/// Error code KMS returns for unknown keys and aliases.
const NOT_FOUND_CODE: &str = "NotFoundException";

/// [`RegionGrantFetcher`] backed by the AWS KMS API.
#[derive(Debug, Clone)]
pub struct AwsGrantFetcher {
    sdk_config: SdkConfig,
    endpoint_url: Option<String>,
    page_size: Option<i32>,
}

impl AwsGrantFetcher {
    /// Create a fetcher from an already-loaded SDK configuration.
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config,
            endpoint_url: None,
            page_size: None,
        }
    }

    /// Load credentials from the default provider chain, optionally from a
    /// named profile.
    pub async fn from_env(profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        Self::new(loader.load().await)
    }

    /// Send every request to `url` instead of the regional endpoint.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Request at most `size` grants per page.
    pub fn with_page_size(mut self, size: i32) -> Self {
        self.page_size = Some(size);
        self
    }

    fn client_for(&self, region: &str) -> Client {
        let mut builder = aws_sdk_kms::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_string()));
        if let Some(url) = &self.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        Client::from_conf(builder.build())
    }

    /// Resolve `alias/<name>` to the ARN of the key it names in this region.
    async fn resolve_key_arn(&self, client: &Client, alias: &str) -> Result<String, FetchError> {
        let alias_id = format!("alias/{alias}");
        let output = client
            .describe_key()
            .key_id(&alias_id)
            .send()
            .await
            .map_err(|e| match e.code() {
                Some(NOT_FOUND_CODE) => FetchError::key_not_found(alias_id.clone()),
                _ => FetchError::sdk(DisplayErrorContext(&e).to_string()),
            })?;

        output
            .key_metadata()
            .and_then(|m| m.arn())
            .map(str::to_string)
            .ok_or_else(|| FetchError::key_not_found(alias_id))
    }
}

/// Convert a provider grant entry. Missing identifiers pass through as empty strings.
fn grant_from_entry(entry: &GrantListEntry) -> Grant {
    Grant {
        name: entry.name().unwrap_or_default().to_string(),
        grant_id: entry.grant_id().unwrap_or_default().to_string(),
        grantee_principal: entry.grantee_principal().unwrap_or_default().to_string(),
        retiring_principal: entry.retiring_principal().map(str::to_string),
        operations: entry
            .operations()
            .iter()
            .map(|op| op.as_str().to_string())
            .collect(),
    }
}

#[async_trait]
impl RegionGrantFetcher for AwsGrantFetcher {
    async fn fetch_grants(&self, alias: &str, region: &str) -> Result<Vec<Grant>, FetchError> {
        if region.is_empty() {
            return Err(FetchError::config(format!("no region given for alias '{alias}'")));
        }
        let client = self.client_for(region);
        let key_arn = self.resolve_key_arn(&client, alias).await?;
        debug!(alias, region, key = %key_arn, "listing grants");

        let mut grants = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let page = client
                .list_grants()
                .key_id(&key_arn)
                .set_marker(marker.take())
                .set_limit(self.page_size)
                .send()
                .await
                .map_err(|e| FetchError::sdk(DisplayErrorContext(&e).to_string()))?;

            grants.extend(page.grants().iter().map(grant_from_entry));
            debug!(alias, region, total = grants.len(), "fetched grant page");

            match page.next_marker() {
                Some(next) if !next.is_empty() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(grants)
    }
}
