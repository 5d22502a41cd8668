//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
pub fn get_var_or(name: &str, default: &str) -> String {
    get_var(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable as a boolean.
pub fn get_bool(name: &str) -> bool {
    get_var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Get an environment variable as an i32.
pub fn get_i32(name: &str) -> Option<i32> {
    get_var(name).and_then(|v| v.parse().ok())
}

/// Common environment variable names.
pub mod vars {
    /// grantlens home directory override.
    pub const GRANTLENS_HOME: &str = "GRANTLENS_HOME";

    /// grantlens config file override.
    pub const GRANTLENS_CONFIG: &str = "GRANTLENS_CONFIG";

    /// Secret store file override.
    pub const GRANTLENS_FILENAME: &str = "GRANTLENS_FILENAME";

    /// Log filter directive.
    pub const GRANTLENS_LOG: &str = "GRANTLENS_LOG";

    /// Fetch all regions concurrently.
    pub const GRANTLENS_PARALLEL: &str = "GRANTLENS_PARALLEL";

    /// Grant listing page size.
    pub const GRANTLENS_PAGE_SIZE: &str = "GRANTLENS_PAGE_SIZE";
}
