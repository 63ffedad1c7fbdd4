//! Reference extraction from formula arguments.
//!
//! Every argument of a parsed [`Formula`] is run through a
//! [`ReferenceTokenizer`]; each token becomes one [`Reference`] recorded
//! against the formula's location. Nothing is resolved or validated: a
//! reference to a sheet that does not exist is still a reference.

use serde::Serialize;

use super::cell_ref::CellRef;
use super::formula::Formula;
use super::tokenize::{ReferenceTokenizer, RegexTokenizer};

/// A cell, row, column or range token used by a formula.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Location of the formula that holds the reference.
    pub from: CellRef,
    /// The token without sheet qualifier, e.g. `A1:B2`.
    pub to_token: String,
    /// Qualifying sheet; None means the formula's own sheet.
    pub sheet_name: Option<String>,
}

impl Reference {
    /// True when the reference names a sheet other than `owner`.
    pub fn is_cross_sheet(&self, owner: &str) -> bool {
        self.sheet_name.as_deref().is_some_and(|sheet| sheet != owner)
    }
}

/// Extract references from all arguments of a formula.
pub fn extract_references(formula: &Formula) -> Vec<Reference> {
    extract_references_with(formula, &RegexTokenizer)
}

/// Extract references using a caller-supplied tokenizer.
pub fn extract_references_with(
    formula: &Formula,
    tokenizer: &dyn ReferenceTokenizer,
) -> Vec<Reference> {
    formula
        .arguments
        .iter()
        .flat_map(|arg| tokenizer.tokenize(arg))
        .map(|token| Reference {
            from: formula.location,
            to_token: token.text,
            sheet_name: token.sheet,
        })
        .collect()
}
