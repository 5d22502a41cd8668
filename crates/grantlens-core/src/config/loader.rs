//! Configuration loading and persistence.

use super::{Config, DivergencePolicy, FetchMode, LogLevel};
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest page the grant listing API accepts.
pub const MAX_PAGE_SIZE: i32 = 100;

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = paths::config_file()?;
        Self::load(&path)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Some(size) = self.fetch.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                errors.push(format!(
                    "Fetch page_size must be 1-{}, got {}",
                    MAX_PAGE_SIZE, size
                ));
            }
        }

        if let Some(url) = &self.aws.endpoint_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!(
                    "AWS endpoint_url '{}' must start with http:// or https://",
                    url
                ));
            }
        }

        if let Some(profile) = &self.aws.profile {
            if profile.trim().is_empty() {
                errors.push("AWS profile must not be blank".to_string());
            }
        }

        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                errors.push("Store path must not be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Load configuration from the default path, falling back to defaults if no file exists.
    ///
    /// A file that exists but cannot be read or parsed is an error. Environment
    /// overrides are applied on top.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let mut config = match Self::load_default() {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `GRANTLENS_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = env::get_var(env::vars::GRANTLENS_FILENAME) {
            self.store.path = Some(paths::expand_tilde(&path));
        }
        if env::get_bool(env::vars::GRANTLENS_PARALLEL) {
            self.fetch.mode = FetchMode::Parallel;
        }
        if let Some(size) = env::get_i32(env::vars::GRANTLENS_PAGE_SIZE) {
            self.fetch.page_size = Some(size);
        }
    }

    /// Resolve the secret store path, falling back to `~/.grantlens/secrets.yml`.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => paths::default_store_file(),
        }
    }
}

/// Configuration builder for creating configs programmatically.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the secret store path.
    pub fn store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store.path = Some(path.into());
        self
    }

    /// Set the AWS credentials profile.
    pub fn aws_profile(mut self, profile: impl Into<String>) -> Self {
        self.config.aws.profile = Some(profile.into());
        self
    }

    /// Set the KMS endpoint override.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.aws.endpoint_url = Some(url.into());
        self
    }

    /// Set the fetch mode.
    pub fn fetch_mode(mut self, mode: FetchMode) -> Self {
        self.config.fetch.mode = mode;
        self
    }

    /// Set the grant listing page size.
    pub fn page_size(mut self, size: i32) -> Self {
        self.config.fetch.page_size = Some(size);
        self
    }

    /// Set the divergence policy.
    pub fn on_divergence(mut self, policy: DivergencePolicy) -> Self {
        self.config.reconcile.on_divergence = policy;
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Build the config.
    pub fn build(self) -> Config {
        self.config
    }
}
