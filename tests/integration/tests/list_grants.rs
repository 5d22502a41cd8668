//! End-to-end grant listing: secret store -> alias lookup -> regional fetch
//! -> reconciliation -> rendered document.

use std::sync::Arc;
use std::time::Duration;

use grantlens_cli::commands::kms::render_listing;
use grantlens_cli::render::OutputFormat;
use grantlens_core::config::{DivergencePolicy, FetchMode};
use grantlens_core::{AliasReconciliation, Grant};
use grantlens_integration_tests::{decrypt_grant, kms_entry, lister, write_store, ACCOUNT};
use grantlens_kms::{GrantError, ListOptions, StaticGrantFetcher};
use grantlens_secrets::SecretError;

fn store_with_app_secret() -> String {
    format!(
        "database_password:\n{}  - key_id: local-dev\n    key_manager: testing\n",
        kms_entry("app", &["us-east-1", "us-west-2"])
    )
}

#[tokio::test]
async fn test_same_grant_in_two_regions_merges() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let fetcher = Arc::new(
        StaticGrantFetcher::new()
            .with_grants("app", "us-east-1", vec![decrypt_grant("svc-a", "g1")])
            .with_grants("app", "us-west-2", vec![decrypt_grant("svc-a", "g2")]),
    );

    let output = lister(store, fetcher, ListOptions::default())
        .list_grants("database_password")
        .await
        .unwrap();

    assert_eq!(output.len(), 1);
    let grants = &output["app"];
    assert_eq!(grants.len(), 1);
    let grant = &grants["svc-a"];
    assert_eq!(grant.grantee_principal, format!("arn:aws:iam::{ACCOUNT}:role/x"));
    assert_eq!(grant.operations, vec!["Decrypt"]);
    assert!(grant.retiring_principal.is_none());
    assert_eq!(grant.grant_id("us-east-1"), Some("g1"));
    assert_eq!(grant.grant_id("us-west-2"), Some("g2"));
}

#[tokio::test]
async fn test_only_kms_values_are_queried() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let fetcher = Arc::new(
        StaticGrantFetcher::new()
            .with_grants("app", "us-east-1", vec![])
            .with_grants("app", "us-west-2", vec![]),
    );

    let output = lister(store, fetcher.clone(), ListOptions::default())
        .list_grants("database_password")
        .await
        .unwrap();

    assert!(output["app"].is_empty());
    assert_eq!(fetcher.calls().len(), 2);
    assert!(fetcher.calls().iter().all(|(alias, _)| alias == "app"));
}

#[tokio::test]
async fn test_partial_propagation_and_multiple_aliases() {
    let content = format!(
        "token:\n{}{}",
        kms_entry("app", &["eu-west-1", "us-east-1"]),
        kms_entry("backup", &["ap-southeast-2"])
    );
    let (store, _dir) = write_store(&content);
    let fetcher = Arc::new(
        StaticGrantFetcher::new()
            .with_grants(
                "app",
                "eu-west-1",
                vec![decrypt_grant("svc-a", "e1"), decrypt_grant("eu-only", "e2")],
            )
            .with_grants("app", "us-east-1", vec![decrypt_grant("svc-a", "u1")])
            .with_grants(
                "backup",
                "ap-southeast-2",
                vec![Grant::new("restore", "b1", "arn:aws:iam::123456789012:role/restore")
                    .with_retiring_principal("arn:aws:iam::123456789012:role/admin")
                    .with_operations(["Decrypt", "GenerateDataKey"])],
            ),
    );

    let output = lister(store, fetcher, ListOptions::default())
        .list_grants("token")
        .await
        .unwrap();

    assert_eq!(output.keys().collect::<Vec<_>>(), vec!["app", "backup"]);
    assert_eq!(output["app"]["svc-a"].grant_ids.len(), 2);
    assert_eq!(
        output["app"]["eu-only"].regions().collect::<Vec<_>>(),
        vec!["eu-west-1"]
    );
    assert_eq!(
        output["backup"]["restore"].retiring_principal.as_deref(),
        Some("arn:aws:iam::123456789012:role/admin")
    );
}

#[tokio::test]
async fn test_missing_secret_is_lookup_error() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let err = lister(store, Arc::new(StaticGrantFetcher::new()), ListOptions::default())
        .list_grants("nope")
        .await
        .unwrap_err();
    assert!(matches!(err, GrantError::Lookup(SecretError::NotFound(_))));
}

#[tokio::test]
async fn test_secret_without_kms_values_is_empty() {
    let (store, _dir) = write_store("local_only:\n  - key_id: dev\n    key_manager: testing\n");
    let output = lister(store, Arc::new(StaticGrantFetcher::new()), ListOptions::default())
        .list_grants("local_only")
        .await
        .unwrap();
    assert!(output.is_empty());
}

#[tokio::test]
async fn test_region_failure_returns_no_grants() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let fetcher = Arc::new(
        StaticGrantFetcher::new()
            .with_grants("app", "us-east-1", vec![decrypt_grant("svc-a", "g1")])
            .with_failure("app", "us-west-2", "AccessDeniedException: not authorized"),
    );

    for mode in [FetchMode::Sequential, FetchMode::Parallel] {
        let listing = lister(
            store.clone(),
            fetcher.clone(),
            ListOptions {
                fetch_mode: mode,
                ..Default::default()
            },
        );
        let err = render_listing(&listing, "database_password", OutputFormat::Yaml)
            .await
            .unwrap_err();
        let grant_err = err.downcast_ref::<GrantError>().expect("grant error");
        assert_eq!(grant_err.failed_region(), Some("us-west-2"));
        assert!(format!("{err:#}").contains("AccessDeniedException"));
    }
}

#[tokio::test(start_paused = true)]
async fn test_parallel_result_independent_of_completion_order() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let slow_east = Arc::new(
        StaticGrantFetcher::new()
            .with_grants("app", "us-east-1", vec![decrypt_grant("svc-a", "g1")])
            .with_grants(
                "app",
                "us-west-2",
                vec![Grant::new("svc-a", "g2", "arn:aws:iam::123456789012:role/other")],
            )
            .with_delay("us-east-1", Duration::from_millis(100)),
    );
    let options = ListOptions {
        fetch_mode: FetchMode::Parallel,
        divergence: DivergencePolicy::Ignore,
    };

    let parallel = lister(store.clone(), slow_east.clone(), options)
        .list_grants("database_password")
        .await
        .unwrap();
    let sequential = lister(store, slow_east, ListOptions::default())
        .list_grants("database_password")
        .await
        .unwrap();

    assert_eq!(parallel, sequential);
    // us-east-1 sorts first, so its copy seeds the merged record
    assert_eq!(
        parallel["app"]["svc-a"].grantee_principal,
        format!("arn:aws:iam::{ACCOUNT}:role/x")
    );
}

#[tokio::test]
async fn test_rendered_yaml_document() {
    let (store, _dir) = write_store(&store_with_app_secret());
    let fetcher = Arc::new(
        StaticGrantFetcher::new()
            .with_grants("app", "us-east-1", vec![decrypt_grant("svc-a", "g1")])
            .with_grants("app", "us-west-2", vec![decrypt_grant("svc-a", "g2")]),
    );
    let listing = lister(store, fetcher, ListOptions::default());

    let yaml = render_listing(&listing, "database_password", OutputFormat::Yaml)
        .await
        .unwrap();
    assert!(yaml.contains("operations: [Decrypt]"), "{yaml}");
    assert!(!yaml.contains("retiring_principal"), "{yaml}");

    let parsed: AliasReconciliation = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed["app"]["svc-a"].grant_id("us-west-2"), Some("g2"));

    let json = render_listing(&listing, "database_password", OutputFormat::Json)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["app"]["svc-a"]["grant_ids"]["us-east-1"], "g1");
}
