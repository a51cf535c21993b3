//! End-to-end conversion of an mBank CZ export into a [`Statement`]

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{RawRow, Statement, StatementSummary};
use crate::normalizer::TransactionNormalizer;
use crate::reader::{read_file, read_rows};
use crate::settings::Settings;
use crate::splitter::SectionSplitter;

/// Run the splitter and normalizer over already tokenized rows
pub fn parse_rows<I>(rows: I, settings: &Settings) -> Result<Statement>
where
    I: IntoIterator<Item = RawRow>,
{
    let (table, summary) = SectionSplitter::split(rows, StatementSummary::from_settings(settings))?;

    let mut normalizer = TransactionNormalizer::new(table);
    let mut transactions = Vec::new();
    for record in normalizer.by_ref() {
        transactions.push(record?);
    }
    let diagnostics = normalizer.into_diagnostics();

    debug!(
        "Parsed {} transactions ({} diagnostics)",
        transactions.len(),
        diagnostics.len()
    );

    Ok(Statement {
        summary,
        transactions,
        diagnostics,
    })
}

/// Parse decoded export text
pub fn parse_statement(text: &str, settings: &Settings) -> Result<Statement> {
    parse_rows(read_rows(text)?, settings)
}

/// Read, decode and parse an export file using the configured charset
pub fn parse_file(path: &Path, settings: &Settings) -> Result<Statement> {
    let text = read_file(path, &settings.charset)?;
    let statement = parse_statement(&text, settings)?;
    info!(
        "Parsed {} transactions from {}",
        statement.transactions.len(),
        path.display()
    );
    Ok(statement)
}
