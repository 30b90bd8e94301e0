//! Durable-cache integration tests
//!
//! The file backend must carry the last-known-good set across orchestrator
//! (and process) lifetimes, and must honor expiry on read.

use std::sync::Arc;

use overview_refresh::{
    now_millis, FileBackend, MetricSet, RefreshConfig, RefreshError, ResultCache,
};

use test_helpers::{mrr_and_subscribers, orchestrator_with, ScriptedApi};

#[tokio::test]
async fn test_fallback_survives_orchestrator_restart() {
    let dir = tempfile::tempdir().unwrap();

    // "First launch": successful refresh writes through to disk
    {
        let api = Arc::new(ScriptedApi::new().then_ok(mrr_and_subscribers()));
        let backend = Arc::new(FileBackend::new(dir.path()));
        let orchestrator = orchestrator_with(api, backend, RefreshConfig::default());
        let outcome = orchestrator.refresh().await;
        assert!(outcome.is_live());
    }

    // "Relaunch" during an outage: a brand-new backend over the same
    // directory serves the persisted set
    {
        let api = Arc::new(
            ScriptedApi::new()
                .then_status(500)
                .then_status(500)
                .then_status(500),
        );
        let backend = Arc::new(FileBackend::new(dir.path()));
        let orchestrator = orchestrator_with(api, backend, RefreshConfig::default());
        let outcome = orchestrator.refresh().await;

        assert!(outcome.is_degraded());
        assert_eq!(
            outcome.metrics.records()[0].value, "$1,000.00",
            "persisted MRR must be served"
        );
    }
}

#[tokio::test]
async fn test_file_cache_round_trip_and_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::new(Arc::new(FileBackend::new(dir.path())));

    let set = MetricSet::from_values([
        "$1,234.56".into(),
        "1,234".into(),
        "7".into(),
        "$9.00".into(),
        "".into(),
        "42".into(),
    ]);
    let now = now_millis();
    cache.put("widgets/overview", &set, now + 1000).await;

    // Identical ordered sequence before expiry
    let loaded = cache.get("widgets/overview", now).await.unwrap();
    assert_eq!(loaded.records(), set.records());

    // Nothing after expiry
    assert!(cache.get("widgets/overview", now + 1000).await.is_none());
}

#[tokio::test]
async fn test_corrupted_cache_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("widgets_2foverview.json"), b"{truncated").unwrap();

    let api = Arc::new(
        ScriptedApi::new()
            .then_status(500)
            .then_status(500)
            .then_status(500),
    );
    let backend = Arc::new(FileBackend::new(dir.path()));
    let orchestrator = orchestrator_with(api, backend, RefreshConfig::default());

    let outcome = orchestrator.refresh().await;

    assert!(matches!(outcome.error, Some(RefreshError::Service(_))));
    assert!(outcome.metrics.is_empty());
}
