//! sheetscope_engine - Formula lexing for spreadsheet analysis.

pub mod engine;
