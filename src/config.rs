use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::utils::format::Locale;

pub const DEFAULT_SNAPSHOT_LOCATION: &str = "skill.db";
pub const DEFAULT_SNAPSHOT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_ARCHIVE_ENDPOINT: &str = "http://localhost:3000/api/repack";

const PROJECT_CONFIG_FILE: &str = "skilldex.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Defaults, then config files, then environment overrides.
    ///
    /// An explicit path (argument or `SKILLDEX_CONFIG`) replaces the global and
    /// project files.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLDEX_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(CatalogError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            tracing::debug!("no platform config directory; skipping global config");
            return Ok(None);
        };
        Self::load_patch(&dir.join("skilldex/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CatalogError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| CatalogError::Config(format!("parse config {}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.snapshot {
            self.snapshot.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.archive {
            self.archive.merge(patch);
        }
        if let Some(patch) = patch.display {
            self.display.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; the process environment in practice.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = non_empty(lookup("SKILL_DB_URL")) {
            self.snapshot.location = value;
        }
        if let Some(value) = parse_env::<u64>(&lookup, "SKILLDEX_SNAPSHOT_TIMEOUT_SECS")? {
            self.snapshot.timeout_secs = value;
        }
        if let Some(value) = parse_env::<usize>(&lookup, "SKILLDEX_PAGE_SIZE")? {
            self.search.page_size = value;
        }
        if let Some(value) = non_empty(lookup("SKILL_ARCHIVE_ENDPOINT")) {
            self.archive.endpoint = value;
        }
        if let Some(value) = non_empty(lookup("SKILLDEX_LOCALE")) {
            self.display.locale = value.parse().map_err(CatalogError::Config)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.page_size == 0 {
            return Err(CatalogError::Config(
                "search.page_size must be at least 1".to_string(),
            ));
        }
        if self.snapshot.location.trim().is_empty() {
            return Err(CatalogError::Config(
                "snapshot.location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// URL or local path of the SQLite snapshot.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SNAPSHOT_LOCATION.to_string(),
            timeout_secs: DEFAULT_SNAPSHOT_TIMEOUT_SECS,
        }
    }
}

impl SnapshotConfig {
    fn merge(&mut self, patch: SnapshotPatch) {
        if let Some(value) = patch.location {
            self.location = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.page_size {
            self.page_size = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub endpoint: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ARCHIVE_ENDPOINT.to_string(),
        }
    }
}

impl ArchiveConfig {
    fn merge(&mut self, patch: ArchivePatch) {
        if let Some(value) = patch.endpoint {
            self.endpoint = value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: Locale,
}

impl DisplayConfig {
    fn merge(&mut self, patch: DisplayPatch) {
        if let Some(value) = patch.locale {
            self.locale = value;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    snapshot: Option<SnapshotPatch>,
    search: Option<SearchPatch>,
    archive: Option<ArchivePatch>,
    display: Option<DisplayPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotPatch {
    location: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ArchivePatch {
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DisplayPatch {
    locale: Option<Locale>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        Some(value) => value.parse::<T>().map(Some).map_err(|err| {
            CatalogError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
