//! skilldex: data access and query core for a skill catalog.
//!
//! A catalog snapshot is a SQLite file. It is fetched once per process,
//! normalized into [`core::Skill`] values and queried in memory.

pub mod app;
pub mod bundler;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod normalize;
pub mod search;
pub mod storage;
pub mod test_utils;
pub mod utils;

pub use error::{CatalogError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
