//! Cell values as they appear in a spreadsheet snapshot.
//!
//! A snapshot cell is one of four scalar kinds. Formulas are not a separate
//! kind: they are text whose first character is `=`, exactly as the sheet
//! provider hands them over.

use serde::{Deserialize, Serialize};

/// The value stored in one cell of a snapshot grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Boolean(bool),
    #[default]
    Empty,
}

impl Cell {
    pub fn new_text(text: &str) -> Cell {
        Cell::Text(text.to_string())
    }

    pub fn new_number(n: f64) -> Cell {
        Cell::Number(n)
    }

    /// Parse raw input (e.g. a CSV field) into the closest cell kind.
    /// - Empty string or whitespace -> Empty
    /// - `TRUE` / `FALSE` (any case) -> Boolean
    /// - Finite number without leading zeros -> Number
    /// - Otherwise -> Text, untouched (formulas stay text)
    pub fn from_input(input: &str) -> Cell {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }

        if trimmed.eq_ignore_ascii_case("TRUE") {
            return Cell::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("FALSE") {
            return Cell::Boolean(false);
        }

        // "007" is an identifier, not seven.
        let leading_zero = trimmed.starts_with('0')
            && trimmed.len() > 1
            && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit());
        if !leading_zero
            && let Ok(n) = trimmed.parse::<f64>()
            && n.is_finite()
        {
            return Cell::Number(n);
        }

        Cell::Text(input.to_string())
    }

    /// The formula text (including the leading `=`) if this cell holds one.
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// True for `Empty` and for text that is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) | Cell::Boolean(_) => false,
        }
    }
}
