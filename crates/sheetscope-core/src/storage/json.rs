//! JSON snapshot loading.
//!
//! Input shape: `{ "sheets": [ { "name": string, "data": Cell[][] } ] }` where
//! a cell is a string, number, boolean or null. The document is walked by
//! hand rather than derived so shape errors can name the offending sheet.

use serde_json::Value;
use std::fs;
use std::path::Path;

use sheetscope_engine::engine::Cell;

use crate::error::{Result, SheetscopeError};
use crate::snapshot::{Sheet, Spreadsheet};

const MAX_SNAPSHOT_BYTES: u64 = 256 * 1_048_576; // 256 MiB

/// Read and validate a JSON snapshot file.
pub fn parse_snapshot(path: &Path) -> Result<Spreadsheet> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_SNAPSHOT_BYTES {
        return Err(SheetscopeError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: snapshot too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_SNAPSHOT_BYTES
            ),
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_snapshot_content(&content)
}

/// Parse and validate snapshot JSON from a string.
/// Fails on the first shape error, before any sheet is analyzed.
pub fn parse_snapshot_content(content: &str) -> Result<Spreadsheet> {
    let value: Value = serde_json::from_str(content)?;

    let Some(sheet_values) = value.get("sheets").and_then(Value::as_array) else {
        return Err(SheetscopeError::InvalidSnapshot(
            "expected an object with a \"sheets\" array".to_string(),
        ));
    };

    let mut sheets = Vec::with_capacity(sheet_values.len());
    for (index, sheet_value) in sheet_values.iter().enumerate() {
        sheets.push(parse_sheet(index, sheet_value)?);
    }

    Spreadsheet::new(sheets)
}

fn parse_sheet(index: usize, value: &Value) -> Result<Sheet> {
    let Some(name) = value.get("name").and_then(Value::as_str) else {
        return Err(SheetscopeError::invalid_sheet(index, None, "missing sheet name"));
    };

    let Some(rows) = value.get("data").and_then(Value::as_array) else {
        return Err(SheetscopeError::invalid_sheet(
            index,
            Some(name),
            "data is not a grid",
        ));
    };

    let mut grid = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let Some(cells) = row.as_array() else {
            return Err(SheetscopeError::invalid_sheet(
                index,
                Some(name),
                format!("row {} is not an array", row_idx),
            ));
        };

        let mut parsed = Vec::with_capacity(cells.len());
        for (col_idx, cell) in cells.iter().enumerate() {
            let cell = parse_cell(cell).ok_or_else(|| {
                SheetscopeError::invalid_sheet(
                    index,
                    Some(name),
                    format!("cell ({}, {}) is not a scalar", row_idx, col_idx),
                )
            })?;
            parsed.push(cell);
        }
        grid.push(parsed);
    }

    Ok(Sheet::new(name, grid))
}

fn parse_cell(value: &Value) -> Option<Cell> {
    match value {
        Value::Null => Some(Cell::Empty),
        Value::Bool(b) => Some(Cell::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(Cell::Number),
        Value::String(s) => Some(Cell::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jagged_grid() {
        let book = parse_snapshot_content(
            r#"{"sheets": [{"name": "Sheet1", "data": [["=A2", 1, true], [null], []]}]}"#,
        )
        .unwrap();
        let sheet = &book.sheets()[0];
        assert_eq!(sheet.name(), "Sheet1");
        assert_eq!(sheet.rows().len(), 3);
        assert_eq!(
            sheet.rows()[0],
            vec![Cell::new_text("=A2"), Cell::Number(1.0), Cell::Boolean(true)]
        );
        assert_eq!(sheet.rows()[1], vec![Cell::Empty]);
        assert!(sheet.rows()[2].is_empty());
    }

    #[test]
    fn test_missing_sheets_array() {
        let err = parse_snapshot_content(r#"{"tabs": []}"#).unwrap_err();
        assert!(matches!(err, SheetscopeError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_missing_name_reports_index() {
        let err = parse_snapshot_content(
            r#"{"sheets": [{"name": "ok", "data": []}, {"data": []}]}"#,
        )
        .unwrap_err();
        match err {
            SheetscopeError::InvalidSheet { index, name, .. } => {
                assert_eq!(index, 1);
                assert_eq!(name, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_grid_data_reports_name() {
        let err = parse_snapshot_content(r#"{"sheets": [{"name": "Budget", "data": "A1"}]}"#)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid sheet at index 0 (Budget): data is not a grid"
        );

        let err = parse_snapshot_content(r#"{"sheets": [{"name": "Budget", "data": [1, 2]}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("row 0 is not an array"));
    }

    #[test]
    fn test_nested_cell_is_rejected() {
        let err = parse_snapshot_content(
            r#"{"sheets": [{"name": "S", "data": [["a", {"v": 1}]]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cell (0, 1) is not a scalar"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = parse_snapshot_content(
            r#"{"sheets": [{"name": "S", "data": []}, {"name": "S", "data": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SheetscopeError::DuplicateSheet { index: 1, .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_snapshot_content("{").unwrap_err();
        assert!(matches!(err, SheetscopeError::Json(_)));
    }
}
