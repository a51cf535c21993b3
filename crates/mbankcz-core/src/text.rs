//! Field-level text helpers shared by the splitter and the normalizer

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Date format of transaction rows (e.g. 15-01-2024)
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Date formats accepted for the statement period row
const PERIOD_DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", DATE_FORMAT];

/// Normalize a transaction field: colons become spaces, outer whitespace is
/// stripped and inner whitespace runs collapse to a single space.
pub fn normalize_field(value: &str) -> String {
    value
        .replace(':', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reference symbols use "0" as a placeholder for "not set"
pub fn empty_or_null(value: &str) -> bool {
    value.is_empty() || value == "0"
}

/// Parse a Czech-formatted amount ("-1 500,00") as an exact decimal
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(s.to_string()))
}

/// Parse a balance marker value ("CZK 1 234,56") for the active currency
pub fn parse_balance(s: &str, currency: &str) -> Result<Decimal> {
    let stripped = if currency.is_empty() {
        s.to_string()
    } else {
        s.replace(currency, "")
    };
    parse_amount(&stripped).map_err(|_| Error::InvalidAmount(s.to_string()))
}

/// Parse a transaction date (DD-MM-YYYY)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Parse a statement period bound (DD.MM.YYYY, or DD-MM-YYYY)
pub fn parse_period_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    PERIOD_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::InvalidDate(s.to_string()))
}
