//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Skill errors
//! - 2xx: Snapshot errors
//! - 3xx: Config errors
//! - 5xx: Network errors
//! - 6xx: Storage errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `SkillNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Skill errors (1xx)
    // ========================================
    /// E101: No skill matches the requested identifier
    SkillNotFound,
    /// E102: Skill has no download URL to build an archive from
    ArchiveUnavailable,
    /// E103: Archive endpoint rejected the request
    ArchiveFailed,

    // ========================================
    // Snapshot errors (2xx)
    // ========================================
    /// E201: Snapshot could not be fetched
    SnapshotUnavailable,
    /// E202: Snapshot contains no table
    NoTableFound,
    /// E203: Snapshot bytes are not a readable database
    SnapshotCorrupt,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,

    // ========================================
    // Network errors (5xx)
    // ========================================
    /// E501: HTTP request failed before a response arrived
    NetworkUnreachable,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E604: Database operation failed
    DatabaseError,
    /// E605: Serialization/deserialization failed
    SerializationError,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `SkillNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::SkillNotFound => 101,
            Self::ArchiveUnavailable => 102,
            Self::ArchiveFailed => 103,

            Self::SnapshotUnavailable => 201,
            Self::NoTableFound => 202,
            Self::SnapshotCorrupt => 203,

            Self::ConfigInvalid => 302,

            Self::NetworkUnreachable => 501,

            Self::DatabaseError => 604,
            Self::SerializationError => 605,

            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::SkillNotFound => "Run `skilldex search <query>` to find the skill's identifier",
            Self::ArchiveUnavailable => "This skill has no download URL. Use the source repository link instead",
            Self::ArchiveFailed => "The archive endpoint refused the request. Check `archive.endpoint` and retry",

            Self::SnapshotUnavailable => "Set SKILL_DB_URL or place skill.db in the working directory",
            Self::NoTableFound => "The snapshot has no tables. Regenerate skill.db with a `skills` table",
            Self::SnapshotCorrupt => "The snapshot is not a SQLite database. Re-download skill.db",

            Self::ConfigInvalid => "Check TOML syntax and values in skilldex.toml",

            Self::NetworkUnreachable => "Check your network connection and ensure the remote server is accessible",

            Self::DatabaseError => "The snapshot could not be queried. Re-download skill.db",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",

            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SerializationError)
    }

    /// Get the category name for this error code.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "skill",
            2 => "snapshot",
            3 => "config",
            5 => "network",
            6 => "storage",
            _ => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.numeric())
    }
}
