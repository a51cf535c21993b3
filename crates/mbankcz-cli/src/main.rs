//! mbankcz CLI - mBank CZ statement converter
//!
//! Usage:
//!   mbankcz convert export.csv -o statement.ofx   Convert an export to OFX
//!   mbankcz convert export.csv --format json      Print the statement as JSON
//!   mbankcz summary export.csv                    Show balances, counts and diagnostics

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so converted output can be piped
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match cli.command {
        Commands::Convert {
            file,
            output,
            format,
            overrides,
        } => commands::cmd_convert(&file, output.as_deref(), format, &overrides),
        Commands::Summary { file, overrides } => commands::cmd_summary(&file, &overrides),
    }
}
