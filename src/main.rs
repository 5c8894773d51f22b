//! skilldex - browse and search a skill catalog snapshot

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skilldex::Result;
use skilldex::app::AppContext;
use skilldex::cli::Cli;
use skilldex::cli::output::{emit_json, robot_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: structured error on stdout
                if let Err(emit_err) = emit_json(&robot_error(&e)) {
                    eprintln!("Error: {e} ({emit_err})");
                }
            } else {
                eprintln!("Error: {e}");
                eprintln!("Hint: {}", e.code().suggestion());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let ctx = AppContext::from_cli(cli)?;
        skilldex::cli::commands::run(&ctx, &cli.command).await
    })
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn,skilldex=info",
            1 => "info,skilldex=debug",
            2 => "debug,skilldex=trace",
            _ => "trace",
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
