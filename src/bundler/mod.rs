//! Skill archive downloads.

pub mod archive;

pub use archive::{ArchiveClient, ArchiveRequest, archive_file_name};
