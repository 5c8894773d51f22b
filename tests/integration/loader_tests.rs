use std::sync::Arc;

use httpmock::prelude::*;
use rusqlite::types::Value as SqlValue;

use skilldex::error::{LoadError, SNAPSHOT_GUIDANCE};
use skilldex::storage::LoadStatus;
use skilldex::test_utils::fixtures::SnapshotFixture;

use crate::fixture::{SNAPSHOT_PATH, file_cache, foo_bar_snapshot, http_cache};

#[tokio::test]
async fn concurrent_first_loads_fetch_once() {
    let snapshot = foo_bar_snapshot();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(SNAPSHOT_PATH);
            then.status(200)
                .delay(std::time::Duration::from_millis(100))
                .body(snapshot.bytes());
        })
        .await;

    let cache = http_cache(&server);
    let (first, second) = tokio::join!(cache.ensure_loaded(), cache.ensure_loaded());
    let (first, second) = (first.unwrap(), second.unwrap());

    mock.assert_hits_async(1).await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 2);

    cache.ensure_loaded().await.unwrap();
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn missing_snapshot_is_unavailable_with_guidance() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(SNAPSHOT_PATH);
            then.status(404);
        })
        .await;

    let cache = http_cache(&server);
    let err = cache.ensure_loaded().await.unwrap_err();
    match &err {
        LoadError::SnapshotUnavailable { reason, .. } => assert!(reason.contains("404")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with(SNAPSHOT_GUIDANCE));
    assert_eq!(cache.status(), LoadStatus::Failed);
}

#[tokio::test]
async fn failed_load_is_retried_from_scratch() {
    let snapshot = foo_bar_snapshot();
    let server = MockServer::start_async().await;
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path(SNAPSHOT_PATH);
            then.status(503).body("maintenance");
        })
        .await;

    let cache = http_cache(&server);
    assert!(cache.ensure_loaded().await.is_err());
    failing.assert_hits_async(1).await;
    failing.delete_async().await;

    let serving = server
        .mock_async(|when, then| {
            when.method(GET).path(SNAPSHOT_PATH);
            then.status(200).body(snapshot.bytes());
        })
        .await;

    let skills = cache.ensure_loaded().await.unwrap();
    serving.assert_hits_async(1).await;
    assert_eq!(skills.len(), 2);
    assert_eq!(cache.status(), LoadStatus::Loaded);
}

#[tokio::test]
async fn skills_table_wins_over_others() {
    let fixture = SnapshotFixture::new();
    fixture.create_table("aaa_meta", &["skill_name"]);
    fixture.create_table("skill", &["skill_name"]);
    fixture.create_table("skills", &["skill_name"]);
    fixture.insert("aaa_meta", &[SqlValue::Text("meta".into())]);
    fixture.insert("skill", &[SqlValue::Text("singular".into())]);
    fixture.insert("skills", &[SqlValue::Text("plural".into())]);

    let skills = file_cache(&fixture).ensure_loaded().await.unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].skill_name, "plural");
}

#[tokio::test]
async fn skill_table_wins_over_alphabetic_first() {
    let fixture = SnapshotFixture::new();
    fixture.create_table("aaa_meta", &["skill_name"]);
    fixture.create_table("skill", &["skill_name"]);
    fixture.insert("aaa_meta", &[SqlValue::Text("meta".into())]);
    fixture.insert("skill", &[SqlValue::Text("singular".into())]);

    let skills = file_cache(&fixture).ensure_loaded().await.unwrap();
    assert_eq!(skills[0].skill_name, "singular");
}

#[tokio::test]
async fn tableless_snapshot_loads_as_empty_catalog() {
    let fixture = SnapshotFixture::new();
    let cache = file_cache(&fixture);
    let skills = cache.ensure_loaded().await.unwrap();
    assert!(skills.is_empty());
    assert_eq!(cache.status(), LoadStatus::Loaded);
}

#[tokio::test]
async fn garbage_bytes_are_reported_as_corrupt() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(SNAPSHOT_PATH);
            then.status(200).body("<html>this is a login page, not a database</html>");
        })
        .await;

    let err = http_cache(&server).ensure_loaded().await.unwrap_err();
    assert!(matches!(err, LoadError::SnapshotCorrupt { .. }));
}
