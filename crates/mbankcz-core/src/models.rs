//! Domain models for mbankcz

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One CSV row as a list of fields
pub type RawRow = Vec<String>;

/// OFX transaction types produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Int,
    Fee,
    Xfer,
    Atm,
    Pos,
    DirectDebit,
    Other,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Int => "INT",
            Self::Fee => "FEE",
            Self::Xfer => "XFER",
            Self::Atm => "ATM",
            Self::Pos => "POS",
            Self::DirectDebit => "DIRECTDEBIT",
            Self::Other => "OTHER",
        }
    }

    /// Get all transaction types
    pub fn all() -> &'static [TransactionType] {
        &[
            Self::Debit,
            Self::Int,
            Self::Fee,
            Self::Xfer,
            Self::Atm,
            Self::Pos,
            Self::DirectDebit,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBIT" => Ok(Self::Debit),
            "INT" => Ok(Self::Int),
            "FEE" => Ok(Self::Fee),
            "XFER" => Ok(Self::Xfer),
            "ATM" => Ok(Self::Atm),
            "POS" => Ok(Self::Pos),
            "DIRECTDEBIT" => Ok(Self::DirectDebit),
            "OTHER" => Ok(Self::Other),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account and period metadata collected while splitting the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub currency: String,
    pub bank_id: String,
    pub account_id: String,
    pub account_type: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
}

impl StatementSummary {
    /// Start a summary from caller defaults; file metadata overrides them later
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: settings.currency.clone(),
            bank_id: settings.bank.clone(),
            account_id: settings.account.clone(),
            account_type: settings.account_type.clone(),
            period_start: None,
            period_end: None,
            opening_balance: None,
            closing_balance: None,
        }
    }
}

impl Default for StatementSummary {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// A normalized transaction, ready for statement output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Deterministic fingerprint of the other fields
    pub id: String,
    pub date_posted: NaiveDate,
    pub date_user: Option<NaiveDate>,
    pub amount: Decimal,
    pub payee: String,
    pub trntype: TransactionType,
    pub memo: String,
    /// Variable symbol as mapped by the base columns
    pub check_no: Option<String>,
}

/// A non-fatal event surfaced while normalizing rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Description matched no known prefix; the record was typed OTHER
    UnknownTransactionType { row: usize, description: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTransactionType { row, description } => write!(
                f,
                "row {}: unexpected type of payment \"{}\", using OTHER",
                row, description
            ),
        }
    }
}

/// Result of converting one export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub summary: StatementSummary,
    pub transactions: Vec<TransactionRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Statement {
    /// Number of emitted transactions of the given type
    pub fn count_by_type(&self, trntype: TransactionType) -> usize {
        self.transactions
            .iter()
            .filter(|tx| tx.trntype == trntype)
            .count()
    }

    /// Sum of all emitted amounts
    pub fn total_amount(&self) -> Decimal {
        self.transactions.iter().map(|tx| tx.amount).sum()
    }
}
