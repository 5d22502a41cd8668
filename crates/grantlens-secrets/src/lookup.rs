//! Resolving a secret name to the KMS aliases that protect it.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tracing::debug;

use crate::arn::KmsAliasArn;
use crate::error::Result;
use crate::store::SecretStore;
use crate::values::{SecretValues, KMS_LABEL};

/// Regions spanned by each alias, keyed by alias name.
pub type AliasRegions = BTreeMap<String, BTreeSet<String>>;

/// Resolves a secret name to the aliases (and their regions) protecting it.
#[async_trait]
pub trait KeyLookup: Send + Sync {
    /// Resolve `secret_name`. Failures are terminal for the caller.
    async fn resolve(&self, secret_name: &str) -> Result<AliasRegions>;
}

/// Group KMS-protected values by alias, collecting the regions each alias
/// was used in.
///
/// Every value must carry an alias ARN; a bare key ARN or a non-ARN key id
/// is rejected.
pub fn resolve_aliases_and_regions(values: &SecretValues) -> Result<AliasRegions> {
    let mut aliases = AliasRegions::new();
    for value in values {
        let arn: KmsAliasArn = value.key_id.parse()?;
        aliases.entry(arn.alias).or_default().insert(arn.region);
    }
    Ok(aliases)
}

/// [`KeyLookup`] over a [`SecretStore`], considering only KMS-managed values.
pub struct StoreKeyLookup<S> {
    store: S,
}

impl<S: SecretStore> StoreKeyLookup<S> {
    /// Wrap a secret store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: SecretStore> KeyLookup for StoreKeyLookup<S> {
    async fn resolve(&self, secret_name: &str) -> Result<AliasRegions> {
        let values = self
            .store
            .get(secret_name)
            .await?
            .filter_by_key_manager(KMS_LABEL);
        let aliases = resolve_aliases_and_regions(&values)?;
        debug!(secret = secret_name, aliases = aliases.len(), "resolved secret to aliases");
        Ok(aliases)
    }
}
