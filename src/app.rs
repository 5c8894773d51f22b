//! Per-invocation application state shared by every command.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::bundler::ArchiveClient;
use crate::cli::Cli;
use crate::config::Config;
use crate::core::skill::Skill;
use crate::error::Result;
use crate::search::QueryEngine;
use crate::storage::{SnapshotCache, SnapshotFetcher};

pub struct AppContext {
    pub config: Config,
    pub robot_mode: bool,
    pub catalog: SnapshotCache<SnapshotFetcher>,
    pub engine: QueryEngine,
}

impl AppContext {
    /// Resolve configuration (files, environment, then command-line flags) and
    /// prepare the catalog. Nothing is fetched until a command asks for skills.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut config = Config::load(cli.config.as_deref(), &cwd)?;
        if let Some(location) = &cli.db_url {
            config.snapshot.location.clone_from(location);
        }
        if let Some(locale) = cli.locale {
            config.display.locale = locale;
        }
        config.validate()?;
        Self::new(config, cli.robot)
    }

    pub fn new(config: Config, robot_mode: bool) -> Result<Self> {
        let fetcher = SnapshotFetcher::from_config(&config.snapshot)?;
        debug!(location = %fetcher.location(), "catalog configured");
        Ok(Self {
            engine: QueryEngine::new(config.search.page_size),
            catalog: SnapshotCache::new(fetcher),
            config,
            robot_mode,
        })
    }

    /// The loaded catalog, fetching it on first use.
    pub async fn skills(&self) -> Result<Arc<[Skill]>> {
        Ok(self.catalog.ensure_loaded().await?)
    }

    pub fn archive_client(&self) -> Result<ArchiveClient> {
        ArchiveClient::new(
            self.config.archive.endpoint.clone(),
            Duration::from_secs(self.config.snapshot.timeout_secs.max(1)),
        )
    }
}
