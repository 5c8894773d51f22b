//! Snapshot fetching and parsing.
//!
//! A snapshot is a SQLite database file served over HTTP or read from disk.
//! Loading fetches the bytes, stages them in a temporary file, opens that file
//! read-only, picks the skill table and normalizes every row.

use std::fmt;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OpenFlags};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::SnapshotConfig;
use crate::core::skill::Skill;
use crate::error::{CatalogError, LoadError, Result};
use crate::normalize::record::normalize_row;
use crate::normalize::value::{RawRow, RawValue};

const TABLE_QUERY: &str =
    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

/// Preferred table names, in order.
const PREFERRED_TABLES: [&str; 2] = ["skills", "skill"];

/// Something that can hand over the raw snapshot bytes.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = std::result::Result<Vec<u8>, LoadError>> + Send;

    /// Human-readable location used in logs and errors.
    fn describe(&self) -> String;
}

/// Where the snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotLocation {
    Http(Url),
    File(PathBuf),
}

impl SnapshotLocation {
    /// `http(s)://` locations are fetched over the network; `file://` and bare
    /// paths are read from disk.
    pub fn parse(location: &str) -> Result<Self> {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let url = Url::parse(trimmed).map_err(|err| {
                CatalogError::Config(format!("invalid snapshot URL {trimmed}: {err}"))
            })?;
            return Ok(Self::Http(url));
        }
        let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
        Ok(Self::File(PathBuf::from(path)))
    }
}

impl fmt::Display for SnapshotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches a snapshot from a [`SnapshotLocation`].
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    location: SnapshotLocation,
    client: reqwest::Client,
}

impl SnapshotFetcher {
    pub fn new(location: SnapshotLocation, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skilldex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { location, client })
    }

    pub fn from_config(config: &SnapshotConfig) -> Result<Self> {
        let location = SnapshotLocation::parse(&config.location)?;
        Self::new(location, Duration::from_secs(config.timeout_secs.max(1)))
    }

    #[must_use]
    pub const fn location(&self) -> &SnapshotLocation {
        &self.location
    }

    fn unavailable(&self, reason: impl Into<String>) -> LoadError {
        LoadError::SnapshotUnavailable {
            location: self.location.to_string(),
            reason: reason.into(),
        }
    }
}

impl SnapshotSource for SnapshotFetcher {
    fn fetch(&self) -> impl Future<Output = std::result::Result<Vec<u8>, LoadError>> + Send {
        async move {
            match &self.location {
                SnapshotLocation::Http(url) => {
                    debug!(url = %url, "fetching snapshot");
                    let response = self
                        .client
                        .get(url.clone())
                        .send()
                        .await
                        .map_err(|err| self.unavailable(err.to_string()))?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(self.unavailable(format!("HTTP {status}")));
                    }
                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|err| self.unavailable(err.to_string()))?;
                    Ok(bytes.to_vec())
                }
                SnapshotLocation::File(path) => {
                    debug!(path = %path.display(), "reading snapshot");
                    tokio::fs::read(path)
                        .await
                        .map_err(|err| self.unavailable(err.to_string()))
                }
            }
        }
    }

    fn describe(&self) -> String {
        self.location.to_string()
    }
}

/// Fetch and parse a snapshot. Performs one fetch; no caching.
pub async fn load_skills<S: SnapshotSource>(source: &S) -> std::result::Result<Vec<Skill>, LoadError> {
    let location = source.describe();
    let bytes = source.fetch().await?;
    debug!(location = %location, bytes = bytes.len(), "snapshot fetched");

    let parse_location = location.clone();
    let skills = tokio::task::spawn_blocking(move || parse_snapshot(&bytes, &parse_location))
        .await
        .map_err(|err| LoadError::SnapshotCorrupt {
            reason: format!("snapshot parse task failed: {err}"),
        })??;

    info!(location = %location, skills = skills.len(), "snapshot loaded");
    Ok(skills)
}

/// Open snapshot bytes, select the skill table and normalize its rows.
pub fn parse_snapshot(bytes: &[u8], location: &str) -> std::result::Result<Vec<Skill>, LoadError> {
    let staged = stage_bytes(bytes).map_err(|err| LoadError::SnapshotUnavailable {
        location: location.to_string(),
        reason: format!("could not stage snapshot: {err}"),
    })?;
    let conn = Connection::open_with_flags(
        staged.path(),
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(corrupt)?;

    let names = table_names(&conn).map_err(corrupt)?;
    let Some(table) = choose_table(&names) else {
        return Err(LoadError::NoTableFound {
            location: location.to_string(),
        });
    };
    debug!(table = %table, candidates = names.len(), "selected snapshot table");

    let rows = read_rows(&conn, &table).map_err(corrupt)?;
    Ok(rows
        .iter()
        .enumerate()
        .map(|(index, row)| normalize_row(row, index))
        .collect())
}

fn stage_bytes(bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut staged = NamedTempFile::new()?;
    staged.write_all(bytes)?;
    staged.flush()?;
    Ok(staged)
}

fn corrupt(err: rusqlite::Error) -> LoadError {
    LoadError::SnapshotCorrupt {
        reason: err.to_string(),
    }
}

/// Non-internal table names in alphabetic order.
pub fn table_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(TABLE_QUERY)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// `skills`, else `skill`, else the first name in alphabetic order.
#[must_use]
pub fn choose_table(names: &[String]) -> Option<String> {
    PREFERRED_TABLES
        .iter()
        .find(|preferred| names.iter().any(|name| name == *preferred))
        .map(|preferred| (*preferred).to_string())
        .or_else(|| names.iter().min().cloned())
}

/// Every row of `table` as untyped column/value pairs.
pub fn read_rows(conn: &Connection, table: &str) -> rusqlite::Result<Vec<RawRow>> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let rows = stmt
        .query_map([], |row| {
            let mut raw = RawRow::new();
            for (idx, column) in columns.iter().enumerate() {
                raw.insert(column.clone(), RawValue::from(row.get::<_, SqlValue>(idx)?));
            }
            Ok(raw)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
