//! Grant types.
//!
//! A multi-region key is a set of region-local replicas, and each replica
//! issues its own grant IDs. [`Grant`] is one replica's view of a grant as
//! the provider returns it; [`LogicalGrant`] is the cross-region view of
//! the same grant, correlated by its creator-assigned name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A grant as returned by the provider for a single regional key replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// Creator-assigned name. Identical across regions for the same logical grant.
    #[serde(default)]
    pub name: String,

    /// Provider-assigned ID, unique only within its region.
    #[serde(default)]
    pub grant_id: String,

    /// Principal receiving the permission.
    pub grantee_principal: String,

    /// Principal allowed to retire the grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retiring_principal: Option<String>,

    /// Operations the grant authorizes, in provider order.
    #[serde(default)]
    pub operations: Vec<String>,
}

impl Grant {
    /// Create a grant with no retiring principal and no operations.
    pub fn new(
        name: impl Into<String>,
        grant_id: impl Into<String>,
        grantee_principal: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            grant_id: grant_id.into(),
            grantee_principal: grantee_principal.into(),
            retiring_principal: None,
            operations: Vec::new(),
        }
    }

    /// Set the retiring principal.
    pub fn with_retiring_principal(mut self, principal: impl Into<String>) -> Self {
        self.retiring_principal = Some(principal.into());
        self
    }

    /// Set the authorized operations.
    pub fn with_operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operations = operations.into_iter().map(Into::into).collect();
        self
    }

    /// Whether two regional instances agree on every field that must be
    /// identical across replicas of one logical grant.
    pub fn same_permissions(&self, other: &Grant) -> bool {
        self.grantee_principal == other.grantee_principal
            && self.retiring_principal == other.retiring_principal
            && self.operations == other.operations
    }
}

/// The cross-region view of one grant name on one alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalGrant {
    /// Principal receiving the permission.
    pub grantee_principal: String,

    /// Principal allowed to retire the grant. Omitted from output when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retiring_principal: Option<String>,

    /// Operations the grant authorizes.
    #[serde(default)]
    pub operations: Vec<String>,

    /// Region-local grant ID for every region the grant was observed in.
    #[serde(default)]
    pub grant_ids: BTreeMap<String, String>,
}

impl LogicalGrant {
    /// Seed a logical grant from the first regional instance seen.
    pub fn seed(region: impl Into<String>, grant: &Grant) -> Self {
        let mut grant_ids = BTreeMap::new();
        grant_ids.insert(region.into(), grant.grant_id.clone());
        Self {
            grantee_principal: grant.grantee_principal.clone(),
            retiring_principal: grant.retiring_principal.clone(),
            operations: grant.operations.clone(),
            grant_ids,
        }
    }

    /// Record the grant ID a region issued for this logical grant.
    pub fn record_region(&mut self, region: impl Into<String>, grant_id: impl Into<String>) {
        self.grant_ids.insert(region.into(), grant_id.into());
    }

    /// The grant ID issued in `region`, if the grant exists there.
    pub fn grant_id(&self, region: &str) -> Option<&str> {
        self.grant_ids.get(region).map(String::as_str)
    }

    /// Regions the grant was observed in, in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.grant_ids.keys().map(String::as_str)
    }
}

/// Grants active on each regional replica of one alias, keyed by region.
///
/// Ordered so that "the first region visited" is always the
/// lexicographically smallest region.
pub type RegionGrantMap = BTreeMap<String, Vec<Grant>>;

/// Logical grants for one alias, keyed by grant name.
pub type LogicalGrants = BTreeMap<String, LogicalGrant>;

/// Logical grants for every alias protecting a secret, keyed by alias name.
pub type AliasReconciliation = BTreeMap<String, LogicalGrants>;
