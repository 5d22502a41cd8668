//! Cross-region grant reconciliation.
//!
//! Regional replicas of a multi-region key issue unrelated grant IDs for the
//! same logical grant. The grant *name* is assigned by whoever created the
//! grant and is the only identity shared across regions, so grants are
//! correlated on it.
//!
//! Precondition: all regional grants sharing a name carry the same grantee,
//! retiring principal and operations. The merged record always takes these
//! fields from the first region visited; [`RegionGrantMap`] iterates regions
//! in sorted order, which makes "first" well defined. [`find_divergences`]
//! reports every place the precondition does not hold.

use std::collections::btree_map::Entry;
use std::collections::HashMap;
use std::fmt;

use grantlens_core::{Grant, LogicalGrant, LogicalGrants, RegionGrantMap};

/// Merge per-region grant lists into one logical grant per grant name.
///
/// Names and IDs are taken as-is, including empty strings.
pub fn reconcile(regions: &RegionGrantMap) -> LogicalGrants {
    let mut logical = LogicalGrants::new();
    for (region, grants) in regions {
        for grant in grants {
            match logical.entry(grant.name.clone()) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().record_region(region, grant.grant_id.clone());
                }
                Entry::Vacant(entry) => {
                    entry.insert(LogicalGrant::seed(region, grant));
                }
            }
        }
    }
    logical
}

/// Field on which two regional copies of a grant disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergentField {
    GranteePrincipal,
    RetiringPrincipal,
    Operations,
}

impl fmt::Display for DivergentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GranteePrincipal => "grantee principal",
            Self::RetiringPrincipal => "retiring principal",
            Self::Operations => "operations",
        })
    }
}

/// A region whose copy of a grant differs from the copy the merged record was seeded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Grant name.
    pub name: String,
    /// Region the merged values came from.
    pub seed_region: String,
    /// Region holding the differing copy.
    pub region: String,
    /// Fields that differ.
    pub fields: Vec<DivergentField>,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} in {} differs from {} ({})",
            self.name,
            self.region,
            self.seed_region,
            fields.join(", ")
        )
    }
}

fn differing_fields(seed: &Grant, other: &Grant) -> Vec<DivergentField> {
    let mut fields = Vec::new();
    if seed.grantee_principal != other.grantee_principal {
        fields.push(DivergentField::GranteePrincipal);
    }
    if seed.retiring_principal != other.retiring_principal {
        fields.push(DivergentField::RetiringPrincipal);
    }
    if seed.operations != other.operations {
        fields.push(DivergentField::Operations);
    }
    fields
}

/// Find every regional grant that disagrees with the first-seen copy of its name.
///
/// Visits regions in the same order as [`reconcile`], so the seed of each
/// divergence is exactly the region whose values [`reconcile`] kept.
pub fn find_divergences(regions: &RegionGrantMap) -> Vec<Divergence> {
    let mut seeds: HashMap<&str, (&str, &Grant)> = HashMap::new();
    let mut divergences = Vec::new();

    for (region, grants) in regions {
        for grant in grants {
            match seeds.get(grant.name.as_str()) {
                Some((seed_region, seed)) => {
                    if seed.same_permissions(grant) {
                        continue;
                    }
                    divergences.push(Divergence {
                        name: grant.name.clone(),
                        seed_region: seed_region.to_string(),
                        region: region.clone(),
                        fields: differing_fields(seed, grant),
                    });
                }
                None => {
                    seeds.insert(grant.name.as_str(), (region.as_str(), grant));
                }
            }
        }
    }
    divergences
}
