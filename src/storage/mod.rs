//! Snapshot storage: fetching the SQLite catalog and caching its contents.

pub mod cache;
pub mod snapshot;

pub use cache::{LoadStatus, SnapshotCache};
pub use snapshot::{
    SnapshotFetcher, SnapshotLocation, SnapshotSource, choose_table, load_skills, parse_snapshot,
};
