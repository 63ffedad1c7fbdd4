//! Integration tests for the command-line driver.

use std::process::Command;

fn run(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        // Tests must be deterministic and not depend on a user's ~/.config/sheetscope/config.toml.
        .args(["--config", "tests/fixtures/default.toml"])
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_text_report() {
    let (stdout, _, code) = run(&["tests/fixtures/workbook.json"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Spreadsheet analysis report\n"));
    assert!(stdout.contains("Total formulas: 2\n"));
    assert!(stdout.contains("  - LOOKUP: 1\n  - AGGREGATION: 1\n"));
    assert!(stdout.contains("Cross-sheet dependencies (1)\n  Sheet1 → Sheet2\n"));
    assert!(stdout.ends_with("Complexity score: 9\n"));
    assert!(!stdout.contains("Data flow"));
}

#[test]
fn test_json_output() {
    let (stdout, _, code) = run(&["--json", "tests/fixtures/workbook.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("\"totalFormulas\": 2"));
    assert!(stdout.contains("\"complexity\": 9"));
    assert!(stdout.contains("\"LOOKUP\": 1"));
}

#[test]
fn test_optional_sections() {
    let (stdout, _, code) = run(&["--data-flow", "--data-ranges", "tests/fixtures/workbook.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Data flow (1)\n  Sheet1 → Sheet2\n"));
    assert!(stdout.contains("Data ranges:\n  - Sheet1: rows 1-1 (2 columns)\n"));
}

#[test]
fn test_config_file_enables_sections() {
    let (stdout, _, code) = run(&[
        "--config",
        "tests/fixtures/report.toml",
        "tests/fixtures/workbook.json",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Data flow (1)\n"));
}

#[test]
fn test_csv_sheet_joins_snapshot() {
    let (stdout, _, code) = run(&[
        "tests/fixtures/workbook.json",
        "--csv",
        "tests/fixtures/Totals.csv",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Sheets (3)\n"));
    assert!(stdout.contains("  - Totals: 1 formula\n"));
    assert!(stdout.contains("Cross-sheet dependencies (2)\n"));
    assert!(stdout.contains("  Totals → Sheet1\n"));
    assert!(stdout.contains("Complexity score: 14\n"));
}

#[test]
fn test_parallel_output_matches() {
    let (sequential, _, _) = run(&["tests/fixtures/workbook.json", "--csv", "tests/fixtures/Totals.csv"]);
    let (parallel, _, code) = run(&[
        "--parallel",
        "tests/fixtures/workbook.json",
        "--csv",
        "tests/fixtures/Totals.csv",
    ]);
    assert_eq!(code, 0);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_output_file() {
    let path = std::env::temp_dir().join(format!("sheetscope-cli-{}.txt", std::process::id()));
    let path_str = path.to_str().expect("temp path is UTF-8");
    let (stdout, _, code) = run(&["-o", path_str, "tests/fixtures/workbook.json"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Wrote "));

    let written = std::fs::read_to_string(&path).expect("output file written");
    assert!(written.contains("Complexity score: 9\n"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_invalid_sheet_fails_fast() {
    let (stdout, stderr, code) = run(&["tests/fixtures/bad_sheet.json"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Invalid sheet at index 1 (Bad): data is not a grid"));
}

#[test]
fn test_missing_snapshot() {
    let (_, stderr, code) = run(&["tests/fixtures/missing.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to load snapshot"));
}

#[test]
fn test_no_input() {
    let (_, stderr, code) = run(&[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No input given"));
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run(&["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --frobnicate"));
}

#[test]
fn test_missing_config_file_warns() {
    let (stdout, stderr, code) = run(&[
        "--config",
        "tests/fixtures/nope.toml",
        "tests/fixtures/workbook.json",
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning: Config file not found"));
    assert!(stdout.contains("Complexity score: 9\n"));
}
