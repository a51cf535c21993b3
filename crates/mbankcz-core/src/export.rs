//! Statement export
//!
//! Supports:
//! - OFX 1.02 (SGML), the format personal finance tools import
//! - JSON (summary, transactions and diagnostics)
//! - Flat transaction CSV

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{Statement, TransactionRecord};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Ofx,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ofx => "ofx",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ofx" => Ok(Self::Ofx),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write a statement in the requested format
pub fn export<W: Write>(
    writer: W,
    statement: &Statement,
    format: ExportFormat,
    generated_at: NaiveDateTime,
) -> Result<()> {
    match format {
        ExportFormat::Ofx => write_ofx(writer, statement, generated_at),
        ExportFormat::Json => write_json(writer, statement),
        ExportFormat::Csv => write_csv(writer, statement),
    }
}

/// Write the statement as pretty-printed JSON
pub fn write_json<W: Write>(mut writer: W, statement: &Statement) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, statement)?;
    writeln!(writer)?;
    Ok(())
}

/// Write one CSV line per transaction
pub fn write_csv<W: Write>(writer: W, statement: &Statement) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record([
        "id",
        "date_posted",
        "date_user",
        "type",
        "amount",
        "payee",
        "memo",
        "check_no",
    ])?;

    for tx in &statement.transactions {
        let date_posted = tx.date_posted.to_string();
        let date_user = tx.date_user.map(|d| d.to_string()).unwrap_or_default();
        let amount = tx.amount.to_string();
        wtr.write_record([
            tx.id.as_str(),
            date_posted.as_str(),
            date_user.as_str(),
            tx.trntype.as_str(),
            amount.as_str(),
            tx.payee.as_str(),
            tx.memo.as_str(),
            tx.check_no.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the statement as an OFX 1.02 SGML document
pub fn write_ofx<W: Write>(
    mut writer: W,
    statement: &Statement,
    generated_at: NaiveDateTime,
) -> Result<()> {
    let summary = &statement.summary;
    let mut out = OfxBuilder::default();

    out.open("OFX");
    out.open("SIGNONMSGSRSV1");
    out.open("SONRS");
    status(&mut out);
    out.leaf("DTSERVER", &generated_at.format("%Y%m%d%H%M%S").to_string());
    out.leaf("LANGUAGE", "ENG");
    out.close("SONRS");
    out.close("SIGNONMSGSRSV1");

    out.open("BANKMSGSRSV1");
    out.open("STMTTRNRS");
    out.leaf("TRNUID", "0");
    status(&mut out);
    out.open("STMTRS");
    out.leaf("CURDEF", &summary.currency);

    out.open("BANKACCTFROM");
    out.leaf("BANKID", &summary.bank_id);
    out.leaf("ACCTID", &summary.account_id);
    out.leaf("ACCTTYPE", &summary.account_type);
    out.close("BANKACCTFROM");

    out.open("BANKTRANLIST");
    let dates = || statement.transactions.iter().map(|tx| tx.date_posted);
    if let Some(start) = summary.period_start.or_else(|| dates().min()) {
        out.leaf("DTSTART", &ofx_date(start));
    }
    if let Some(end) = summary.period_end.or_else(|| dates().max()) {
        out.leaf("DTEND", &ofx_date(end));
    }
    for tx in &statement.transactions {
        transaction(&mut out, tx);
    }
    out.close("BANKTRANLIST");

    if let Some(balance) = summary.closing_balance {
        let as_of = summary
            .period_end
            .or_else(|| dates().max())
            .unwrap_or_else(|| generated_at.date());
        out.open("LEDGERBAL");
        out.leaf("BALAMT", &ofx_amount(balance));
        out.leaf("DTASOF", &ofx_date(as_of));
        out.close("LEDGERBAL");
    }

    out.close("STMTRS");
    out.close("STMTTRNRS");
    out.close("BANKMSGSRSV1");
    out.close("OFX");

    writer.write_all(OFX_HEADER.as_bytes())?;
    writer.write_all(out.finish().as_bytes())?;
    writer.flush()?;
    Ok(())
}

const OFX_HEADER: &str = "OFXHEADER:100\n\
DATA:OFXSGML\n\
VERSION:102\n\
SECURITY:NONE\n\
ENCODING:UTF-8\n\
CHARSET:NONE\n\
COMPRESSION:NONE\n\
OLDFILEUID:NONE\n\
NEWFILEUID:NONE\n\
\n";

fn status(out: &mut OfxBuilder) {
    out.open("STATUS");
    out.leaf("CODE", "0");
    out.leaf("SEVERITY", "INFO");
    out.close("STATUS");
}

fn transaction(out: &mut OfxBuilder, tx: &TransactionRecord) {
    out.open("STMTTRN");
    out.leaf("TRNTYPE", tx.trntype.as_str());
    out.leaf("DTPOSTED", &ofx_date(tx.date_posted));
    if let Some(date_user) = tx.date_user {
        out.leaf("DTUSER", &ofx_date(date_user));
    }
    out.leaf("TRNAMT", &ofx_amount(tx.amount));
    out.leaf("FITID", &tx.id);
    if let Some(check_no) = &tx.check_no {
        out.leaf("CHECKNUM", check_no);
    }
    if !tx.payee.is_empty() {
        out.leaf("NAME", &tx.payee);
    }
    if !tx.memo.is_empty() {
        out.leaf("MEMO", &tx.memo);
    }
    out.close("STMTTRN");
}

fn ofx_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn ofx_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Minimal SGML writer: aggregates get closing tags, leaves do not
#[derive(Default)]
struct OfxBuilder {
    buf: String,
    depth: usize,
}

impl OfxBuilder {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.buf.push_str(&format!("<{}>\n", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str(&format!("</{}>\n", tag));
    }

    fn leaf(&mut self, tag: &str, value: &str) {
        self.indent();
        self.buf.push_str(&format!("<{}>{}\n", tag, escape_sgml(value)));
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn escape_sgml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', " ")
}
