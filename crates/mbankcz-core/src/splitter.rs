//! Section splitter
//!
//! An mBank CZ export interleaves a metadata block (label row followed by a
//! value row), an opening-balance marker, the transaction table and a
//! closing-balance marker. The splitter walks the rows once, fills in the
//! [`StatementSummary`] and returns the table rows (header first).

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawRow, StatementSummary};
use crate::text::{parse_balance, parse_period_date};

pub const OPENING_BALANCE_LABEL: &str = "#Počáteční zůstatek:";
pub const CLOSING_BALANCE_LABEL: &str = "#Konečný zůstatek:";
pub const CURRENCY_LABEL: &str = "#Měna účtu:";
pub const ACCOUNT_NUMBER_LABEL: &str = "#Číslo účtu:";
pub const PERIOD_LABEL: &str = "#Za období";

/// Balance marker rows always have this many fields
const MARKER_FIELDS: usize = 9;
const MARKER_LABEL_POS: usize = 6;
const MARKER_VALUE_POS: usize = 7;

/// Single-pass state machine separating metadata from the transaction table
#[derive(Debug)]
pub struct SectionSplitter {
    summary: StatementSummary,
    in_table: bool,
    pending_label: Option<String>,
    table: Vec<RawRow>,
    row: usize,
}

impl SectionSplitter {
    pub fn new(summary: StatementSummary) -> Self {
        Self {
            summary,
            in_table: false,
            pending_label: None,
            table: Vec::new(),
            row: 0,
        }
    }

    /// Split a whole row stream, returning the table rows and the final summary
    pub fn split<I>(rows: I, summary: StatementSummary) -> Result<(Vec<RawRow>, StatementSummary)>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut splitter = Self::new(summary);
        for row in rows {
            splitter.push(row)?;
        }
        Ok(splitter.finish())
    }

    /// Feed one row through the state machine
    pub fn push(&mut self, row: RawRow) -> Result<()> {
        self.row += 1;
        self.handle(row).map_err(|e| e.at_row(self.row))
    }

    fn handle(&mut self, row: RawRow) -> Result<()> {
        if is_blank(&row) {
            return Ok(());
        }

        if is_marker(&row, CLOSING_BALANCE_LABEL) {
            let balance = parse_balance(&row[MARKER_VALUE_POS], &self.summary.currency)?;
            if self.summary.closing_balance.is_none() {
                self.summary.closing_balance = Some(balance);
            }
            debug!("Closing balance {} at row {}", balance, self.row);
            self.in_table = false;
            return Ok(());
        }

        if self.in_table {
            self.table.push(row);
            return Ok(());
        }

        if let Some(label) = self.pending_label.take() {
            return self.apply_metadata(&label, &row);
        }

        if row.len() == 2 {
            self.pending_label = Some(row[0].trim().to_string());
            return Ok(());
        }

        if is_marker(&row, OPENING_BALANCE_LABEL) {
            let balance = parse_balance(&row[MARKER_VALUE_POS], &self.summary.currency)?;
            if self.summary.opening_balance.is_none() {
                self.summary.opening_balance = Some(balance);
            }
            debug!("Opening balance {} at row {}", balance, self.row);
            self.in_table = true;
        }

        Ok(())
    }

    fn apply_metadata(&mut self, label: &str, row: &RawRow) -> Result<()> {
        let first = row.first().map(|s| s.trim()).unwrap_or("");

        match label {
            CURRENCY_LABEL => {
                self.summary.currency = first.to_string();
                debug!("Currency {}", self.summary.currency);
            }
            ACCOUNT_NUMBER_LABEL => {
                let (account, bank) = first
                    .split_once('/')
                    .ok_or_else(|| Error::InvalidAccountNumber(first.to_string()))?;
                self.summary.account_id = account.trim().to_string();
                self.summary.bank_id = bank.trim().to_string();
                debug!(
                    "Account {} at bank {}",
                    self.summary.account_id, self.summary.bank_id
                );
            }
            PERIOD_LABEL => {
                let end = row.get(1).map(|s| s.as_str()).unwrap_or("");
                self.summary.period_start = Some(parse_period_date(first)?);
                self.summary.period_end = Some(parse_period_date(end)?);
            }
            _ => debug!("Ignoring metadata {:?}", label),
        }

        Ok(())
    }

    pub fn summary(&self) -> &StatementSummary {
        &self.summary
    }

    pub fn finish(self) -> (Vec<RawRow>, StatementSummary) {
        debug!("Split {} table rows from {} rows", self.table.len(), self.row);
        (self.table, self.summary)
    }
}

fn is_blank(row: &RawRow) -> bool {
    row.is_empty() || (row.len() == 1 && row[0].trim().is_empty())
}

fn is_marker(row: &RawRow, label: &str) -> bool {
    row.len() == MARKER_FIELDS && row[MARKER_LABEL_POS].trim() == label
}
