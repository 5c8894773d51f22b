//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::format::Locale;

pub mod commands;
pub mod output;

/// skilldex - browse and search a skill catalog snapshot
#[derive(Parser, Debug)]
#[command(name = "skilldex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit JSON envelopes on stdout for machine consumption
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skilldex/config.toml + ./skilldex.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot URL or path (overrides config and SKILL_DB_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub db_url: Option<String>,

    /// Language for relative dates: zh-CN or en
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog by text, category and sort order
    Search(commands::search::SearchArgs),

    /// Show one skill by identifier or name
    Show(commands::show::ShowArgs),

    /// List categories with skill counts
    Categories(commands::categories::CategoriesArgs),

    /// Download a skill as a zip archive
    Download(commands::download::DownloadArgs),

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skilldex", "search", "pdf", "--robot", "--db-url", "x.db", "--locale", "en",
        ])
        .unwrap();
        assert!(cli.robot);
        assert_eq!(cli.db_url.as_deref(), Some("x.db"));
        assert_eq!(cli.locale, Some(Locale::En));
        assert!(matches!(cli.command, Commands::Search(_)));
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(Cli::try_parse_from(["skilldex", "--locale", "fr", "config"]).is_err());
    }
}
