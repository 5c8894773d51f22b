//! Error handling for skilldex.
//!
//! This module provides:
//! - [`CatalogError`]: The main error enum for all skilldex operations
//! - [`LoadError`]: The cloneable snapshot-load taxonomy shared by every waiter
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestion and context

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Guidance attached to every unavailable-snapshot error.
pub const SNAPSHOT_GUIDANCE: &str =
    "skill.db not found. Set SKILL_DB_URL or place skill.db in the working directory";

/// Failure of a snapshot load attempt.
///
/// Cloneable so one failed attempt can be handed to every caller that was
/// waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("{} ({location}: {reason})", SNAPSHOT_GUIDANCE)]
    SnapshotUnavailable { location: String, reason: String },

    #[error("No table found in snapshot {location}")]
    NoTableFound { location: String },

    #[error("Snapshot is not a readable database: {reason}")]
    SnapshotCorrupt { reason: String },
}

/// Main error type for skilldex operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Skill not found: {0}")]
    SkillNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Skill has no download URL: {0}")]
    ArchiveUnavailable(String),

    /// Error text returned by the archive endpoint, surfaced verbatim.
    #[error("{0}")]
    ArchiveFailed(String),
}

impl CatalogError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Load(LoadError::SnapshotUnavailable { .. }) => ErrorCode::SnapshotUnavailable,
            Self::Load(LoadError::NoTableFound { .. }) => ErrorCode::NoTableFound,
            Self::Load(LoadError::SnapshotCorrupt { .. }) => ErrorCode::SnapshotCorrupt,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Http(_) => ErrorCode::NetworkUnreachable,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::SkillNotFound(_) => ErrorCode::SkillNotFound,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::ArchiveUnavailable(_) => ErrorCode::ArchiveUnavailable,
            Self::ArchiveFailed(_) => ErrorCode::ArchiveFailed,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::SkillNotFound(id) => Some(serde_json::json!({ "skill_id": id })),
            Self::Load(LoadError::SnapshotUnavailable { location, reason }) => {
                Some(serde_json::json!({ "location": location, "reason": reason }))
            }
            Self::Load(LoadError::NoTableFound { location }) => {
                Some(serde_json::json!({ "location": location }))
            }
            Self::ArchiveUnavailable(name) => Some(serde_json::json!({ "skill_name": name })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_catalog_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "SKILL_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    pub recoverable: bool,

    /// Error category (e.g., "skill", "snapshot", "network")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a `CatalogError`.
    #[must_use]
    pub fn from_catalog_error(err: &CatalogError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&CatalogError> for StructuredError {
    fn from(err: &CatalogError) -> Self {
        Self::from_catalog_error(err)
    }
}

/// Result type alias using `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
