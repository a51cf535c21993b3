//! CLI argument definitions using clap
//!
//! This module contains the clap structs for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mbankcz_core::ExportFormat;

/// mbankcz - Convert mBank CZ CSV exports
#[derive(Parser)]
#[command(name = "mbankcz")]
#[command(about = "Convert mBank CZ CSV statement exports to OFX", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an export to OFX, JSON or CSV
    Convert {
        /// mBank CZ CSV export
        file: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: ofx, json, csv
        #[arg(short, long, default_value = "ofx")]
        format: ExportFormat,

        #[command(flatten)]
        overrides: SettingsArgs,
    },

    /// Show statement balances, transaction counts by type and diagnostics
    Summary {
        /// mBank CZ CSV export
        file: PathBuf,

        #[command(flatten)]
        overrides: SettingsArgs,
    },
}

/// Settings file selection and per-run overrides
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Settings file (defaults to the user data dir, then built-in defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Default currency when the export has none
    #[arg(long)]
    pub currency: Option<String>,

    /// Bank id when the export has no account number
    #[arg(long)]
    pub bank: Option<String>,

    /// Account id when the export has no account number
    #[arg(long)]
    pub account: Option<String>,

    /// OFX account type (CHECKING, SAVINGS, ...)
    #[arg(long)]
    pub account_type: Option<String>,

    /// Input code page (cp1250, utf-8, ...)
    #[arg(long)]
    pub charset: Option<String>,
}
