//! skilldex download - Fetch a skill as a zip archive

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::bundler::ArchiveRequest;
use crate::cli::commands::show::find_skill;
use crate::cli::output::{emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Skill identifier, or its (percent-encoded) name
    pub skill: String,

    /// Output file, or directory to place `<name>.zip` in (default: current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct DownloadReport {
    identifier: String,
    path: PathBuf,
    bytes: usize,
}

pub async fn run(ctx: &AppContext, args: &DownloadArgs) -> Result<()> {
    let skills = ctx.skills().await?;
    let skill = find_skill(&skills, &args.skill)?;
    let request = ArchiveRequest::for_skill(skill)?;

    let archive = ctx.archive_client()?.download(&request).await?;
    let path = output_path(args.output.as_deref(), &request.file_name());
    tokio::fs::write(&path, &archive).await?;
    info!(path = %path.display(), bytes = archive.len(), "archive written");

    if ctx.robot_mode {
        return emit_json(&robot_ok(DownloadReport {
            identifier: skill.identifier.clone(),
            path,
            bytes: archive.len(),
        }));
    }
    println!(
        "{} {} ({} bytes)",
        "Saved".green().bold(),
        path.display(),
        archive.len()
    );
    Ok(())
}

/// Explicit file paths are used as given; directories get the default name.
fn output_path(output: Option<&Path>, file_name: &str) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(output_path(Some(dir.path()), "pdf.zip"), dir.path().join("pdf.zip"));
        assert_eq!(
            output_path(Some(Path::new("out/custom.zip")), "pdf.zip"),
            PathBuf::from("out/custom.zip")
        );
        assert_eq!(output_path(None, "pdf.zip"), PathBuf::from("pdf.zip"));
    }
}
