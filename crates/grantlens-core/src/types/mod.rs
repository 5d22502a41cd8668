//! Core types for grantlens.

mod grant;

pub use grant::*;
