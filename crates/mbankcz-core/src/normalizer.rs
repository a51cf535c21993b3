//! Transaction normalizer
//!
//! Turns the transaction table (header row first) into [`TransactionRecord`]s.
//! The normalizer is a lazy iterator: each call pulls rows until one yields a
//! record. Zero-amount rows are skipped, the first error ends the sequence.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::columns::ColumnIndex;
use crate::error::Result;
use crate::models::{Diagnostic, RawRow, TransactionRecord, TransactionType};
use crate::text::{empty_or_null, normalize_field, parse_amount, parse_date};

/// Payee placeholder for rows without a real counterparty
pub const PAYEE_PLACEHOLDER: &str = "-";

/// Payee texts the bank uses for partial card payments and ATM withdrawals
const PSEUDO_PAYEE_PREFIXES: [&str; 2] = ["PLATBA KARTOU Z ČÁSTKY", "VÝBĚR Z BANKOMATU Z ČÁSTKY"];

/// Lazy sequence of normalized transactions over table rows
pub struct TransactionNormalizer<I> {
    rows: I,
    columns: Option<ColumnIndex>,
    row: usize,
    diagnostics: Vec<Diagnostic>,
    done: bool,
}

impl<I> TransactionNormalizer<I>
where
    I: Iterator<Item = RawRow>,
{
    pub fn new<T>(rows: T) -> Self
    where
        T: IntoIterator<Item = RawRow, IntoIter = I>,
    {
        Self {
            rows: rows.into_iter(),
            columns: None,
            row: 0,
            diagnostics: Vec::new(),
            done: false,
        }
    }

    /// Non-fatal events collected so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Column lookup, available once the header row has been consumed
    pub fn columns(&self) -> Option<&ColumnIndex> {
        self.columns.as_ref()
    }

    fn normalize_row(
        &mut self,
        columns: &ColumnIndex,
        row: RawRow,
    ) -> Result<Option<TransactionRecord>> {
        let line: Vec<String> = row.iter().map(|v| normalize_field(v)).collect();
        let field = |idx: usize| line.get(idx).map(|s| s.as_str()).unwrap_or("");

        let mapping = columns.mapping();

        let amount_str = match field(mapping.amount) {
            "" => "0",
            s => s,
        };

        let mut record = BaseRecord {
            date_posted: parse_date(field(mapping.date))?,
            date_user: None,
            amount: parse_amount(amount_str)?,
            payee: field(mapping.payee).to_string(),
            memo: field(mapping.memo).to_string(),
            check_no: Some(field(mapping.check_no).to_string()).filter(|s| !s.is_empty()),
        };

        let executed = field(columns.date);
        if !executed.is_empty() {
            record.date_user = Some(parse_date(executed)?);
        }

        if record.payee.is_empty()
            || PSEUDO_PAYEE_PREFIXES
                .iter()
                .any(|prefix| record.payee.starts_with(prefix))
        {
            record.payee = PAYEE_PLACEHOLDER.to_string();
        } else if let Some(counter) = columns.counter_account.map(field) {
            if !counter.is_empty() {
                record.payee.push_str("|ÚČ: ");
                record.payee.push_str(counter);
            }
        }

        let description = field(columns.description);
        let trntype = classify(description).unwrap_or_else(|| {
            warn!(
                "Unexpected type of payment appeared - \"{}\". Using OTHER transaction type instead",
                description
            );
            self.diagnostics.push(Diagnostic::UnknownTransactionType {
                row: self.row,
                description: description.to_string(),
            });
            TransactionType::Other
        });

        let message = field(columns.message);
        if !message.is_empty() {
            record.memo = message.to_string();
        }
        for (label, idx) in [("VS", columns.vs), ("KS", columns.ks), ("SS", columns.ss)] {
            let value = field(idx);
            if !empty_or_null(value) {
                record.memo.push_str(&format!("|{}: {}", label, value));
            }
        }

        if record.amount.is_zero() {
            debug!("Skipping zero-amount row {}", self.row);
            return Ok(None);
        }

        Ok(Some(record.finish(trntype)))
    }
}

impl<I> Iterator for TransactionNormalizer<I>
where
    I: Iterator<Item = RawRow>,
{
    type Item = Result<TransactionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let row = self.rows.next()?;
            self.row += 1;

            let columns = match self.columns.take() {
                Some(columns) => columns,
                None => match ColumnIndex::from_header(&row) {
                    Ok(columns) => {
                        debug!("Resolved transaction columns: {:?}", columns);
                        self.columns = Some(columns);
                        continue;
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
            };

            let result = self.normalize_row(&columns, row);
            self.columns = Some(columns);

            match result {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.at_row(self.row)));
                }
            }
        }
    }
}

/// Fields of a record before its id is known
struct BaseRecord {
    date_posted: NaiveDate,
    date_user: Option<NaiveDate>,
    amount: Decimal,
    payee: String,
    memo: String,
    check_no: Option<String>,
}

impl BaseRecord {
    fn finish(self, trntype: TransactionType) -> TransactionRecord {
        let id = generate_id(
            &self.date_posted,
            self.date_user.as_ref(),
            self.amount,
            &self.payee,
            &self.memo,
            self.check_no.as_deref(),
            trntype,
        );
        TransactionRecord {
            id,
            date_posted: self.date_posted,
            date_user: self.date_user,
            amount: self.amount,
            payee: self.payee,
            trntype,
            memo: self.memo,
            check_no: self.check_no,
        }
    }
}

/// Generate a stable id from the final record fields
fn generate_id(
    date_posted: &NaiveDate,
    date_user: Option<&NaiveDate>,
    amount: Decimal,
    payee: &str,
    memo: &str,
    check_no: Option<&str>,
    trntype: TransactionType,
) -> String {
    let mut hasher = Sha256::new();
    let mut field = |bytes: &[u8]| {
        hasher.update(bytes);
        // Unit separator keeps adjacent fields from running together
        hasher.update([0x1fu8]);
    };
    field(date_posted.to_string().as_bytes());
    field(date_user.map(|d| d.to_string()).unwrap_or_default().as_bytes());
    field(amount.normalize().to_string().as_bytes());
    field(payee.as_bytes());
    field(memo.as_bytes());
    field(check_no.unwrap_or("").as_bytes());
    field(trntype.as_str().as_bytes());
    hex::encode(hasher.finalize())
}
