//! # grantlens-core
//!
//! Core types, configuration, and utilities for grantlens.
//!
//! This crate provides shared functionality used across all grantlens crates:
//!
//! - **Types**: Provider grants, reconciled logical grants, and the
//!   region/alias maps that connect them
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Utilities**: Path resolution and environment handling

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use types::*;
