//! Multi-region KMS grant listing for grantlens.
//!
//! A multi-region key is a set of region-local replicas sharing one alias.
//! Each replica issues its own grant IDs, so the "same" grant shows up under
//! a different ID in every region. This crate fetches the grants of every
//! replica and reconciles them into one logical grant per grant name.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grantlens_kms::{AwsGrantFetcher, GrantLister, ListOptions};
//! use grantlens_secrets::{FileSecretStore, StoreKeyLookup};
//!
//! let lookup = StoreKeyLookup::new(FileSecretStore::new("secrets.yml"));
//! let fetcher = AwsGrantFetcher::from_env(None).await;
//! let lister = GrantLister::new(Arc::new(lookup), Arc::new(fetcher), ListOptions::default());
//! let grants = lister.list_grants("database_password").await?;
//! ```

mod error;

pub mod aws;
pub mod fetcher;
pub mod key;
pub mod lister;
pub mod reconcile;

pub use aws::AwsGrantFetcher;
pub use error::{FetchError, GrantError, Result};
pub use fetcher::{RegionGrantFetcher, StaticGrantFetcher};
pub use key::MultiRegionKey;
pub use lister::{GrantLister, ListOptions};
pub use reconcile::{find_divergences, reconcile, Divergence, DivergentField};
