//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::{CatalogError, Result};

pub mod categories;
pub mod download;
pub mod search;
pub mod show;

pub async fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args).await,
        Commands::Show(args) => show::run(ctx, args).await,
        Commands::Categories(args) => categories::run(ctx, args).await,
        Commands::Download(args) => download::run(ctx, args).await,
        Commands::Config => show_config(ctx),
    }
}

fn show_config(ctx: &AppContext) -> Result<()> {
    if ctx.robot_mode {
        return emit_json(&robot_ok(&ctx.config));
    }
    let rendered = toml::to_string_pretty(&ctx.config)
        .map_err(|err| CatalogError::Config(format!("render config: {err}")))?;
    let mut layout = HumanLayout::new();
    layout.title("Effective configuration").push_line(rendered.trim_end());
    emit_human(layout);
    Ok(())
}
