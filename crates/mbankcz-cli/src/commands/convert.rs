//! Convert command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use mbankcz_core::{export, parse_file, ExportFormat, Statement};
use tracing::warn;

use super::resolve_settings;
use crate::cli::SettingsArgs;

pub fn cmd_convert(
    file: &Path,
    output: Option<&Path>,
    format: ExportFormat,
    overrides: &SettingsArgs,
) -> Result<()> {
    let settings = resolve_settings(overrides)?;
    let statement = parse_file(file, &settings)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    if !statement.diagnostics.is_empty() {
        warn!(
            "{} diagnostics for {}, run `mbankcz summary` for details",
            statement.diagnostics.len(),
            file.display()
        );
    }

    match output {
        Some(path) => {
            let out = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_statement(BufWriter::new(out), &statement, format)?;

            // Progress goes to stderr, stdout is reserved for converted output
            eprintln!(
                "✅ Converted {} transactions to {}",
                statement.transactions.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            write_statement(stdout.lock(), &statement, format)?;
        }
    }

    Ok(())
}

/// Export a statement, stamping OFX output with the local time
pub fn write_statement<W: Write>(
    mut writer: W,
    statement: &Statement,
    format: ExportFormat,
) -> Result<()> {
    let generated_at = Local::now().naive_local();
    export(&mut writer, statement, format, generated_at)
        .with_context(|| format!("Failed to write {} output", format))?;
    writer.flush()?;
    Ok(())
}
