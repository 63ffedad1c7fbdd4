//! sheetscope-core - Snapshot model, storage, and spreadsheet analysis.

pub mod analysis;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;

pub use analysis::{
    ReportOptions, SheetAnalysis, SpreadsheetAnalysis, analyze_spreadsheet, generate_report,
    generate_report_with,
};
pub use config::AnalyzerConfig;
pub use error::{Result, SheetscopeError};
pub use snapshot::{Sheet, Spreadsheet};

pub use sheetscope_engine::engine::{Cell, CellRef, FormulaType};
