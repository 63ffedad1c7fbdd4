//! Cell locations and A1 notation.
//!
//! A [`CellRef`] is the zero-indexed (row, col) position of a cell inside its
//! sheet grid. Formula locations are `CellRef`s; reference tokens are checked
//! against A1 notation with [`CellRef::parse`] so `A0` never counts as a cell.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::parse("$B3").unwrap();
//! assert_eq!((cell.row, cell.col), (2, 1)); // 0-indexed
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A cell position by row and column (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse A1 notation, with optional `$` anchors and any letter case.
    /// Row 0, missing parts and columns past `usize` are rejected.
    pub fn parse(text: &str) -> Option<CellRef> {
        let caps = a1_re().captures(text)?;

        let col = caps["letters"]
            .bytes()
            .try_fold(0usize, |acc, b| {
                let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
                acc.checked_mul(26)?.checked_add(digit)
            })?
            .checked_sub(1)?;
        let row = caps["numbers"].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(row, col))
    }

    /// Column letters for a 0-indexed column: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
    pub fn column_name(col: usize) -> String {
        let mut letters = Vec::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\$?(?<letters>[A-Za-z]+)\$?(?<numbers>[0-9]+)$")
            .expect("A1 reference regex must compile")
    })
}

impl FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::column_name(self.col), self.row + 1)
    }
}
