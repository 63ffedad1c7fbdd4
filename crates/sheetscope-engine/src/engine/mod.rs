//! Formula lexing API.
//!
//! Everything needed to turn one cell into analysis facts:
//!
//! - [`Cell`] - Snapshot cell values (text, number, boolean, empty)
//! - [`CellRef`] - Formula locations (row/col indices ↔ A1 notation)
//! - [`classify_formula`] - Ordered-precedence formula categories
//! - [`formula_arguments`] - Depth-aware top-level argument splitting
//! - [`ReferenceTokenizer`] - Lexical reference tokens behind a swappable seam
//! - [`extract_references`] - References per formula argument
//! - [`Formula`] - A parsed formula cell with its complexity

mod args;
mod cell;
mod cell_ref;
mod classify;
mod deps;
mod formula;
mod tokenize;

pub use args::{call_body, formula_arguments, function_name, split_arguments};
pub use cell::Cell;
pub use cell_ref::CellRef;
pub use classify::{CLASSIFICATION_RULES, FormulaType, Predicate, classify_formula};
pub use deps::{Reference, extract_references, extract_references_with};
pub use formula::{Formula, formula_complexity};
pub use tokenize::{RefToken, ReferenceTokenizer, RegexTokenizer};
