//! Client for the repack endpoint that turns a skill's source folder into a
//! downloadable zip archive.

use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::skill::Skill;
use crate::error::{CatalogError, Result};

/// Shown when the endpoint fails without saying why.
const FALLBACK_FAILURE: &str = "archive request failed";

const UNSAFE_FILE_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Query parameters for one archive request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveRequest {
    pub url: String,
    pub repo: Option<String>,
    pub skill_path: Option<String>,
    pub name: Option<String>,
}

impl ArchiveRequest {
    /// Request for `skill`; fails when it has no download URL.
    pub fn for_skill(skill: &Skill) -> Result<Self> {
        if skill.download_url.trim().is_empty() {
            return Err(CatalogError::ArchiveUnavailable(
                skill.display_name().to_string(),
            ));
        }
        Ok(Self {
            url: skill.download_url.clone(),
            repo: non_empty(&skill.source_repository),
            skill_path: non_empty(&skill.source_path),
            name: non_empty(&skill.skill_name),
        })
    }

    /// Query pairs in wire order; optional parameters only when present.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("url", self.url.as_str())];
        if let Some(repo) = &self.repo {
            pairs.push(("repo", repo));
        }
        if let Some(path) = &self.skill_path {
            pairs.push(("skillPath", path));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name));
        }
        pairs
    }

    /// Full GET URL against `endpoint`.
    pub fn to_url(&self, endpoint: &str) -> Result<Url> {
        Url::parse_with_params(endpoint, self.query_pairs()).map_err(|err| {
            CatalogError::Config(format!("invalid archive endpoint {endpoint}: {err}"))
        })
    }

    /// File name to save the archive under.
    #[must_use]
    pub fn file_name(&self) -> String {
        archive_file_name(self.name.as_deref().unwrap_or_default())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `name` with path-hostile characters replaced, falling back to `skill`,
/// plus a `.zip` extension.
#[must_use]
pub fn archive_file_name(name: &str) -> String {
    let sanitized = name.replace(UNSAFE_FILE_CHARS, "-");
    let stem = sanitized.trim();
    let stem = if stem.is_empty() { "skill" } else { stem };
    format!("{stem}.zip")
}

/// Archive endpoint client.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ArchiveClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("skilldex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch the archive bytes. A non-2xx response becomes
    /// [`CatalogError::ArchiveFailed`] carrying the response body as-is.
    pub async fn download(&self, request: &ArchiveRequest) -> Result<Vec<u8>> {
        let url = request.to_url(&self.endpoint)?;
        debug!(url = %url, "requesting archive");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "archive endpoint refused request");
            let message = if body.is_empty() {
                FALLBACK_FAILURE.to_string()
            } else {
                body
            };
            return Err(CatalogError::ArchiveFailed(message));
        }

        let bytes = response.bytes().await?;
        info!(bytes = bytes.len(), name = ?request.name, "archive downloaded");
        Ok(bytes.to_vec())
    }
}
