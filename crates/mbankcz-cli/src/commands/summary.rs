//! Summary command implementation

use std::path::Path;

use anyhow::{Context, Result};
use mbankcz_core::{parse_file, Diagnostic, Statement, TransactionType};
use rust_decimal::Decimal;

use super::{resolve_settings, truncate};
use crate::cli::SettingsArgs;

pub fn cmd_summary(file: &Path, overrides: &SettingsArgs) -> Result<()> {
    let settings = resolve_settings(overrides)?;
    let statement = parse_file(file, &settings)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    for line in summary_lines(&statement) {
        println!("{}", line);
    }

    Ok(())
}

/// Render the summary report
pub fn summary_lines(statement: &Statement) -> Vec<String> {
    let summary = &statement.summary;
    let mut lines = Vec::new();

    lines.push("📊 Statement Summary".to_string());
    lines.push("   ─────────────────────────────────────────────".to_string());
    lines.push(format!(
        "   Account: {} / {} ({})",
        summary.account_id, summary.bank_id, summary.account_type
    ));
    lines.push(format!("   Currency: {}", summary.currency));

    let period = match (summary.period_start, summary.period_end) {
        (Some(start), Some(end)) => format!("{} → {}", start, end),
        _ => "(not stated)".to_string(),
    };
    lines.push(format!("   Period: {}", period));

    let balance = |b: Option<Decimal>| {
        b.map(|b| format!("{:.2} {}", b, summary.currency))
            .unwrap_or_else(|| "-".to_string())
    };
    lines.push(format!("   Opening balance: {}", balance(summary.opening_balance)));
    lines.push(format!("   Closing balance: {}", balance(summary.closing_balance)));

    lines.push(String::new());
    lines.push(format!("   Transactions: {}", statement.transactions.len()));
    for trntype in TransactionType::all() {
        let count = statement.count_by_type(*trntype);
        if count > 0 {
            lines.push(format!("   - {:<12} {}", trntype.as_str(), count));
        }
    }
    lines.push(format!(
        "   Net change: {:.2} {}",
        statement.total_amount(),
        summary.currency
    ));

    if !statement.diagnostics.is_empty() {
        lines.push(String::new());
        lines.push(format!("⚠️  Diagnostics: {}", statement.diagnostics.len()));
        for diagnostic in &statement.diagnostics {
            match diagnostic {
                Diagnostic::UnknownTransactionType { row, description } => lines.push(format!(
                    "   row {}: unknown type \"{}\"",
                    row,
                    truncate(description, 40)
                )),
            }
        }
    }

    lines
}
