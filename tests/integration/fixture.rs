use std::time::Duration;

use httpmock::prelude::*;
use rusqlite::types::Value as SqlValue;

use skilldex::storage::{SnapshotCache, SnapshotFetcher, SnapshotLocation};
use skilldex::test_utils::fixtures::SnapshotFixture;

pub const SNAPSHOT_PATH: &str = "/skill.db";

/// The two-row snapshot used by the end-to-end scenarios.
pub fn foo_bar_snapshot() -> SnapshotFixture {
    let fixture = SnapshotFixture::new();
    fixture.create_table("skills", &["id", "skill_name", "tags", "updated_at"]);
    fixture.insert(
        "skills",
        &[
            SqlValue::Integer(1),
            SqlValue::Text("Foo".into()),
            SqlValue::Text("a,b".into()),
            SqlValue::Text("2024-01-01".into()),
        ],
    );
    fixture.insert(
        "skills",
        &[
            SqlValue::Integer(2),
            SqlValue::Text("Bar".into()),
            SqlValue::Text(r#"["x"]"#.into()),
            SqlValue::Text("2024-06-01".into()),
        ],
    );
    fixture
}

pub fn http_cache(server: &MockServer) -> SnapshotCache<SnapshotFetcher> {
    let location = SnapshotLocation::parse(&server.url(SNAPSHOT_PATH)).expect("mock url");
    let fetcher = SnapshotFetcher::new(location, Duration::from_secs(5)).expect("fetcher");
    SnapshotCache::new(fetcher)
}

pub fn file_cache(fixture: &SnapshotFixture) -> SnapshotCache<SnapshotFetcher> {
    let location = SnapshotLocation::parse(&fixture.location()).expect("file location");
    let fetcher = SnapshotFetcher::new(location, Duration::from_secs(5)).expect("fetcher");
    SnapshotCache::new(fetcher)
}
