//! Config save/load roundtrip integration tests.

use grantlens_core::config::{Config, ConfigBuilder, DivergencePolicy, FetchMode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grantlens.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.fetch.mode, config.fetch.mode);
    assert_eq!(loaded.reconcile.on_divergence, config.reconcile.on_divergence);
    assert_eq!(loaded.logging.level, config.logging.level);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grantlens.json5");

    let config = ConfigBuilder::new()
        .store_path("/srv/secrets.yml")
        .aws_profile("audit")
        .endpoint_url("http://localhost:4566")
        .fetch_mode(FetchMode::Parallel)
        .page_size(50)
        .on_divergence(DivergencePolicy::Fail)
        .build();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.store.path, Some(PathBuf::from("/srv/secrets.yml")));
    assert_eq!(loaded.aws.profile.as_deref(), Some("audit"));
    assert_eq!(loaded.aws.endpoint_url.as_deref(), Some("http://localhost:4566"));
    assert_eq!(loaded.fetch.mode, FetchMode::Parallel);
    assert_eq!(loaded.fetch.page_size, Some(50));
    assert_eq!(loaded.reconcile.on_divergence, DivergencePolicy::Fail);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/grantlens.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
