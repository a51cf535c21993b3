//! Input decoding and CSV tokenizing
//!
//! The bank exports `;`-delimited, `"`-quoted CSV in windows-1250. Rows have
//! irregular lengths (metadata pairs, balance markers, table rows), so the
//! reader is flexible and header-less.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawRow;

/// Resolve a charset name such as "cp1250", "windows-1250" or "utf-8"
pub fn resolve_charset(charset: &str) -> Result<&'static Encoding> {
    let label = charset.trim().to_ascii_lowercase();
    // Python-style code page names are not WHATWG labels
    let label = match label.strip_prefix("cp") {
        Some(page) if page.chars().all(|c| c.is_ascii_digit()) => format!("windows-{}", page),
        _ => label,
    };

    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnknownCharset(charset.to_string()))
}

/// Decode raw bytes using the given charset
///
/// Malformed input is fatal, since a mismatched charset garbles the section labels.
pub fn decode(bytes: &[u8], charset: &str) -> Result<String> {
    let encoding = resolve_charset(charset)?;
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(Error::Decode {
            charset: used.name().to_string(),
        });
    }
    debug!("Decoded {} bytes as {}", bytes.len(), used.name());
    Ok(text.into_owned())
}

/// Read and decode a whole file
pub fn read_file(path: &Path, charset: &str) -> Result<String> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    decode(&bytes, charset)
}

/// Tokenize decoded export text into raw rows
pub fn read_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    debug!("Tokenized {} rows", rows.len());
    Ok(rows)
}
