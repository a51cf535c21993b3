//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mbankcz_core::{parse_file, ExportFormat, Settings};

use crate::cli::{Cli, Commands, SettingsArgs};
use crate::commands::{self, truncate};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../mbankcz-core/tests/fixtures/mbank_cz_2024_01.csv")
}

fn settings_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Overrides pointing at an explicit settings file so the user's data dir is never read
fn args_with_config(file: &tempfile::NamedTempFile) -> SettingsArgs {
    SettingsArgs {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    }
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_convert_args() {
    let cli = Cli::try_parse_from([
        "mbankcz",
        "convert",
        "export.csv",
        "-o",
        "out.json",
        "--format",
        "json",
        "--charset",
        "utf-8",
        "--account-type",
        "savings",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Convert {
            file,
            output,
            format,
            overrides,
        } => {
            assert_eq!(file, PathBuf::from("export.csv"));
            assert_eq!(output, Some(PathBuf::from("out.json")));
            assert_eq!(format, ExportFormat::Json);
            assert_eq!(overrides.charset.as_deref(), Some("utf-8"));
            assert_eq!(overrides.account_type.as_deref(), Some("savings"));
        }
        _ => panic!("expected convert"),
    }
}

#[test]
fn test_parse_convert_defaults_to_ofx() {
    let cli = Cli::try_parse_from(["mbankcz", "convert", "export.csv"]).unwrap();
    match cli.command {
        Commands::Convert { format, output, .. } => {
            assert_eq!(format, ExportFormat::Ofx);
            assert!(output.is_none());
        }
        _ => panic!("expected convert"),
    }
}

#[test]
fn test_parse_rejects_unknown_format() {
    let result = Cli::try_parse_from(["mbankcz", "convert", "export.csv", "--format", "qif"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_summary_args() {
    let cli = Cli::try_parse_from(["mbankcz", "summary", "export.csv", "--currency", "EUR"])
        .unwrap();
    match cli.command {
        Commands::Summary { file, overrides } => {
            assert_eq!(file, PathBuf::from("export.csv"));
            assert_eq!(overrides.currency.as_deref(), Some("EUR"));
        }
        _ => panic!("expected summary"),
    }
}

// ========== Settings Resolution Tests ==========

#[test]
fn test_resolve_settings_from_config_file() {
    let file = settings_file("[statement]\ncurrency = \"EUR\"\nbank = \"BANKXX\"\n");
    let settings = commands::resolve_settings(&args_with_config(&file)).unwrap();

    assert_eq!(settings.currency, "EUR");
    assert_eq!(settings.bank, "BANKXX");
    assert_eq!(settings.charset, Settings::default().charset);
}

#[test]
fn test_resolve_settings_flags_override_file() {
    let file = settings_file("[statement]\ncurrency = \"EUR\"\naccount = \"FROM-FILE\"\n");
    let args = SettingsArgs {
        currency: Some("USD".to_string()),
        account_type: Some("savings".to_string()),
        charset: Some("utf-8".to_string()),
        ..args_with_config(&file)
    };
    let settings = commands::resolve_settings(&args).unwrap();

    assert_eq!(settings.currency, "USD");
    assert_eq!(settings.account, "FROM-FILE");
    assert_eq!(settings.account_type, "SAVINGS");
    assert_eq!(settings.charset, "utf-8");
}

#[test]
fn test_resolve_settings_missing_config() {
    let args = SettingsArgs {
        config: Some(PathBuf::from("/nonexistent/settings.toml")),
        ..Default::default()
    };
    let err = commands::resolve_settings(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to load settings"));
}

// ========== Convert Command Tests ==========

#[test]
fn test_cmd_convert_writes_ofx_file() {
    let config = settings_file("");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("statement.ofx");

    commands::cmd_convert(
        &fixture(),
        Some(&out),
        ExportFormat::Ofx,
        &args_with_config(&config),
    )
    .unwrap();

    let ofx = std::fs::read_to_string(&out).unwrap();
    assert!(ofx.starts_with("OFXHEADER:100"));
    assert_eq!(ofx.matches("<STMTTRN>").count(), 6);
    assert!(ofx.contains("<ACCTID>670100-2200000000"));
}

#[test]
fn test_cmd_convert_writes_json_file() {
    let config = settings_file("");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("statement.json");

    commands::cmd_convert(
        &fixture(),
        Some(&out),
        ExportFormat::Json,
        &args_with_config(&config),
    )
    .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["transactions"].as_array().unwrap().len(), 6);
    assert_eq!(json["summary"]["currency"], "CZK");
    assert_eq!(json["diagnostics"][0]["kind"], "unknown_transaction_type");
}

#[test]
fn test_cmd_convert_missing_input() {
    let config = settings_file("");
    let result = commands::cmd_convert(
        &PathBuf::from("/nonexistent/export.csv"),
        None,
        ExportFormat::Ofx,
        &args_with_config(&config),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to convert"));
}

#[test]
fn test_cmd_convert_bad_output_dir() {
    let config = settings_file("");
    let out = PathBuf::from("/nonexistent/dir/statement.ofx");
    let result = commands::cmd_convert(
        &fixture(),
        Some(&out),
        ExportFormat::Ofx,
        &args_with_config(&config),
    );
    assert!(result.is_err());
}

#[test]
fn test_write_statement_csv() {
    let statement = parse_file(&fixture(), &Settings::default()).unwrap();
    let mut buf = Vec::new();
    commands::write_statement(&mut buf, &statement, ExportFormat::Csv).unwrap();

    let csv = String::from_utf8(buf).unwrap();
    assert_eq!(csv.lines().count(), 7);
    assert!(csv.starts_with("id,date_posted,"));
}

// ========== Summary Command Tests ==========

#[test]
fn test_summary_lines() {
    let statement = parse_file(&fixture(), &Settings::default()).unwrap();
    let lines = commands::summary_lines(&statement);
    let text = lines.join("\n");

    assert!(text.contains("Account: 670100-2200000000 / 6210 (CHECKING)"));
    assert!(text.contains("Period: 2024-01-01 → 2024-01-31"));
    assert!(text.contains("Opening balance: 10000.00 CZK"));
    assert!(text.contains("Closing balance: 20353.21 CZK"));
    assert!(text.contains("Transactions: 6"));
    assert!(text.contains("Net change: 10353.21 CZK"));
    assert!(text.contains("Diagnostics: 1"));
    assert!(text.contains("row 7: unknown type \"SPLÁTKA ÚVĚRU\""));
}

#[test]
fn test_summary_lines_counts_by_type() {
    let statement = parse_file(&fixture(), &Settings::default()).unwrap();
    let lines = commands::summary_lines(&statement);

    let xfer = lines.iter().find(|l| l.trim_start().starts_with("- XFER")).unwrap();
    assert!(xfer.ends_with(" 2"));
    assert!(!lines.iter().any(|l| l.trim_start().starts_with("- FEE")));
}

#[test]
fn test_cmd_summary() {
    let config = settings_file("");
    let result = commands::cmd_summary(&fixture(), &args_with_config(&config));
    assert!(result.is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is too long", 10), "this is...");
    assert_eq!(truncate("ŘEŘICHA ŽLUŤOUČKÁ", 10), "ŘEŘICHA...");
}
