//! Denim CLI - obfuscated native builds from Nim sources
//!
//! Usage: denim <COMMAND>
//!
//! Commands:
//!   compile  Compile Nim sources into an obfuscated binary
//!   version  Show denim, Nim and Obfuscator-LLVM versions

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use denim::presentation::{Cli, Commands};

mod commands;
mod ui;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "DENIM_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Compile(args) => commands::cmd_compile(args, cli.json, cli.verbose, cli.color),
        Commands::Version => commands::cmd_version(cli.json, cli.verbose, cli.color),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
