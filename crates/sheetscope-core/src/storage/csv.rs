//! CSV sheet import.
//!
//! One CSV file becomes one [`Sheet`]. Fields keep their grid position, so
//! blank lines become empty rows and still split data ranges.

use std::path::Path;

use sheetscope_engine::engine::Cell;

use crate::error::{Result, SheetscopeError};
use crate::snapshot::Sheet;

/// Read a CSV file as a sheet named after the file stem.
pub fn parse_csv_sheet(path: &Path) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    parse_csv_sheet_content(&name, &content)
}

/// Parse CSV text into a sheet with the given name.
pub fn parse_csv_sheet_content(name: &str, content: &str) -> Result<Sheet> {
    let records = parse_csv_records(content).map_err(|line| SheetscopeError::Csv {
        line,
        message: "unterminated quoted field".to_string(),
    })?;

    let rows = records
        .iter()
        .map(|fields| fields.iter().map(|f| parse_csv_field(f)).collect())
        .collect();

    Ok(Sheet::new(name, rows))
}

/// Split CSV text into records of fields.
///
/// Quoted fields may span lines; `\r\n` inside them becomes `\n`. A record
/// with nothing on it but whitespace is an empty row. On an unterminated
/// quote, returns the 1-based line where that quote opened.
pub(crate) fn parse_csv_records(content: &str) -> std::result::Result<Vec<Vec<String>>, usize> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut record_was_quoted = false;
    let mut record_started = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    // Check for escaped quote
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    line += 1;
                    current.push('\n');
                }
                _ => current.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                field_was_quoted = true;
                record_was_quoted = true;
                record_started = true;
                quote_line = line;
            }
            ',' => {
                finish_field(&mut fields, &mut current, field_was_quoted);
                field_was_quoted = false;
                record_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_field(&mut fields, &mut current, field_was_quoted);
                records.push(finish_record(std::mem::take(&mut fields), record_was_quoted));
                field_was_quoted = false;
                record_was_quoted = false;
                record_started = false;
                line += 1;
            }
            _ => {
                current.push(c);
                record_started = true;
            }
        }
    }

    if in_quotes {
        return Err(quote_line);
    }
    if record_started {
        finish_field(&mut fields, &mut current, field_was_quoted);
        records.push(finish_record(fields, record_was_quoted));
    }
    Ok(records)
}

fn finish_field(fields: &mut Vec<String>, current: &mut String, quoted: bool) {
    if quoted {
        fields.push(std::mem::take(current));
    } else {
        fields.push(current.trim().to_string());
        current.clear();
    }
}

fn finish_record(fields: Vec<String>, quoted: bool) -> Vec<String> {
    if !quoted && fields.len() == 1 && fields[0].is_empty() {
        Vec::new()
    } else {
        fields
    }
}

/// Parse a CSV field into a cell. Quoted whitespace is kept as text.
pub(crate) fn parse_csv_field(field: &str) -> Cell {
    if !field.is_empty() && field.trim().is_empty() {
        return Cell::new_text(field);
    }
    Cell::from_input(field)
}
