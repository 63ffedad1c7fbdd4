//! Snapshot loading from files.

mod csv;
mod json;

pub use csv::{parse_csv_sheet, parse_csv_sheet_content};
pub use json::{parse_snapshot, parse_snapshot_content};
