//! Error types for Sheetscope core.

use thiserror::Error;

/// Errors that can occur while loading or validating a snapshot.
///
/// Malformed formulas never produce an error; they degrade to best-effort
/// analysis. Only the shape of the input can fail.
#[derive(Error, Debug)]
pub enum SheetscopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(
        "Invalid sheet at index {index} ({}): {message}",
        .name.as_deref().unwrap_or("<unnamed>")
    )]
    InvalidSheet {
        index: usize,
        name: Option<String>,
        message: String,
    },

    #[error("Duplicate sheet name at index {index}: {name}")]
    DuplicateSheet { index: usize, name: String },

    #[error("CSV error at line {line}: {message}")]
    Csv { line: usize, message: String },
}

impl SheetscopeError {
    pub(crate) fn invalid_sheet(index: usize, name: Option<&str>, message: impl Into<String>) -> Self {
        SheetscopeError::InvalidSheet {
            index,
            name: name.map(str::to_string),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetscopeError>;
