//! Sheet-level dependency edges.

use serde::Serialize;

use super::sheet::SheetAnalysis;

/// "Sheet `from` has a formula referencing `reference` on sheet `to`."
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub reference: String,
}

/// One edge per cross-sheet reference, in sheet then reference order.
/// Repeated references yield repeated edges.
pub fn analyze_dependencies(sheets: &[SheetAnalysis]) -> Vec<Dependency> {
    let mut dependencies = Vec::new();

    for sheet in sheets {
        for reference in sheet.cross_sheet_references() {
            let Some(target) = reference.sheet_name.as_deref() else {
                continue;
            };
            dependencies.push(Dependency {
                from: sheet.name.clone(),
                to: target.to_string(),
                reference: reference.to_token.clone(),
            });
        }
    }

    dependencies
}
