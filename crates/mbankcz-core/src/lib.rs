//! mbankcz Core Library
//!
//! Converts mBank CZ CSV statement exports into normalized transactions:
//! - Reader for the cp1250, `;`-delimited export
//! - Section splitter separating account metadata from the transaction table
//! - Transaction normalizer (type classification, memo composition, stable ids)
//! - Exporters for OFX, JSON and CSV
//! - Settings with file overrides

pub mod classify;
pub mod columns;
pub mod convert;
pub mod error;
pub mod export;
pub mod models;
pub mod normalizer;
pub mod reader;
pub mod settings;
pub mod splitter;
pub mod text;

pub use classify::classify;
pub use columns::ColumnIndex;
pub use convert::{parse_file, parse_rows, parse_statement};
pub use error::{Error, Result};
pub use export::{export, ExportFormat};
pub use models::{
    Diagnostic, RawRow, Statement, StatementSummary, TransactionRecord, TransactionType,
};
pub use normalizer::TransactionNormalizer;
pub use settings::Settings;
pub use splitter::SectionSplitter;
