//! Spreadsheet analysis.
//!
//! Per-sheet scanning ([`analyze_sheet`]) has no shared state and may run in
//! parallel. The cross-sheet steps ([`analyze_dependencies`],
//! [`analyze_data_flow`], [`calculate_complexity`]) need every sheet's result
//! and run after the join.

mod flow;
mod graph;
mod report;
mod score;
mod sheet;

use serde::Serialize;
use std::collections::BTreeMap;

use sheetscope_engine::engine::FormulaType;

use crate::config::AnalyzerConfig;
use crate::snapshot::{Sheet, Spreadsheet};

pub use flow::{FlowStep, analyze_data_flow};
pub use graph::{Dependency, analyze_dependencies};
pub use report::{ReportOptions, generate_report, generate_report_with};
pub use score::{DEPENDENCY_WEIGHT, calculate_complexity};
pub use sheet::{DataRange, SheetAnalysis, analyze_sheet, identify_data_ranges};

/// Formula counts per type, iterated in precedence order.
pub type TypeCounts = BTreeMap<FormulaType, usize>;

/// Result of analyzing one snapshot. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetAnalysis {
    pub sheets: Vec<SheetAnalysis>,
    pub total_formulas: usize,
    pub formula_type_counts: TypeCounts,
    pub dependencies: Vec<Dependency>,
    pub data_flow: Vec<FlowStep>,
    pub complexity: usize,
}

/// Analyze a validated snapshot.
pub fn analyze_spreadsheet(
    spreadsheet: &Spreadsheet,
    config: &AnalyzerConfig,
) -> SpreadsheetAnalysis {
    if config.verbose {
        log::info!("analyzing {} sheets", spreadsheet.len());
    }

    let sheets = analyze_sheets(spreadsheet.sheets(), config);

    let mut total_formulas = 0;
    let mut formula_type_counts = TypeCounts::new();
    for sheet in &sheets {
        total_formulas += sheet.formulas.len();
        for (formula_type, count) in &sheet.formula_type_counts {
            *formula_type_counts.entry(*formula_type).or_insert(0) += count;
        }
    }

    let dependencies = analyze_dependencies(&sheets);
    let data_flow = analyze_data_flow(&sheets);
    let complexity = calculate_complexity(total_formulas, dependencies.len(), &formula_type_counts);

    if config.verbose {
        log::info!(
            "analysis complete: {} sheets, {} formulas, {} dependencies, complexity {}",
            sheets.len(),
            total_formulas,
            dependencies.len(),
            complexity
        );
    }

    SpreadsheetAnalysis {
        sheets,
        total_formulas,
        formula_type_counts,
        dependencies,
        data_flow,
        complexity,
    }
}

#[cfg(feature = "parallel")]
fn analyze_sheets(sheets: &[Sheet], config: &AnalyzerConfig) -> Vec<SheetAnalysis> {
    use rayon::prelude::*;

    if config.parallel {
        // Indexed collect keeps input order.
        sheets.par_iter().map(analyze_sheet).collect()
    } else {
        sheets.iter().map(analyze_sheet).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn analyze_sheets(sheets: &[Sheet], config: &AnalyzerConfig) -> Vec<SheetAnalysis> {
    if config.parallel {
        log::warn!("parallel analysis requested but the `parallel` feature is disabled");
    }
    sheets.iter().map(analyze_sheet).collect()
}
