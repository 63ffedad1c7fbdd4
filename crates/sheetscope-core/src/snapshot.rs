//! Immutable spreadsheet snapshots.
//!
//! A [`Spreadsheet`] is handed to the analyzer once and only read from.
//! Construction validates sheet names, so analysis itself cannot fail.

use std::collections::HashSet;

use sheetscope_engine::engine::Cell;

use crate::error::{Result, SheetscopeError};

/// One sheet: a name and a jagged grid of cells (rows may differ in length).
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Ordered, validated list of sheets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spreadsheet {
    sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Build a snapshot, failing fast on the first empty or duplicate name.
    pub fn new(sheets: Vec<Sheet>) -> Result<Self> {
        validate_names(&sheets)?;
        Ok(Spreadsheet { sheets })
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }
}

fn validate_names(sheets: &[Sheet]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, sheet) in sheets.iter().enumerate() {
        if sheet.name.trim().is_empty() {
            return Err(SheetscopeError::invalid_sheet(
                index,
                None,
                "sheet name is empty",
            ));
        }
        if !seen.insert(sheet.name.as_str()) {
            return Err(SheetscopeError::DuplicateSheet {
                index,
                name: sheet.name.clone(),
            });
        }
    }
    Ok(())
}
