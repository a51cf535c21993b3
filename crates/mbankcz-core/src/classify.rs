//! Transaction type classification from the bank's description text

use crate::models::TransactionType;

/// Known description prefixes, tested in order; the first match wins.
pub const PREFIX_RULES: &[(&str, TransactionType)] = &[
    ("ZÚČTOVÁNÍ ÚROKŮ", TransactionType::Debit),
    ("PŘIPSÁNÍ ÚROKŮ", TransactionType::Int),
    ("POPLATEK", TransactionType::Fee),
    ("ODCHOZÍ", TransactionType::Xfer),
    ("PŘÍCHOZÍ", TransactionType::Xfer),
    ("POS VRÁCENÍ ZBOŽÍ", TransactionType::Xfer),
    ("PŘEDDEF. ODCHOZÍ", TransactionType::Xfer),
    ("VLASTNÍ PŘEVOD", TransactionType::Xfer),
    ("PŘEVOD NA", TransactionType::Xfer),
    ("VÝBĚR Z BANKOMATU", TransactionType::Atm),
    ("PLATBA KARTOU", TransactionType::Pos),
    ("INKASO", TransactionType::DirectDebit),
];

/// Classify a description, returning None when no prefix matches
pub fn classify(description: &str) -> Option<TransactionType> {
    PREFIX_RULES
        .iter()
        .find(|(prefix, _)| description.starts_with(prefix))
        .map(|(_, trntype)| *trntype)
}
