//! Per-sheet analysis.

use serde::Serialize;

use sheetscope_engine::engine::{Cell, CellRef, Formula, Reference, extract_references};

use super::TypeCounts;
use crate::snapshot::Sheet;

/// A maximal run of non-empty rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRange {
    /// First row of the run (0-indexed, inclusive).
    pub start: usize,
    /// Last row of the run (inclusive).
    pub end: usize,
    /// Longest row length inside the run.
    pub column_width: usize,
}

/// Everything learned from one sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetAnalysis {
    pub name: String,
    pub formulas: Vec<Formula>,
    pub formula_type_counts: TypeCounts,
    pub references: Vec<Reference>,
    pub data_ranges: Vec<DataRange>,
}

impl SheetAnalysis {
    /// References that point at a sheet other than this one.
    pub fn cross_sheet_references(&self) -> impl Iterator<Item = &Reference> {
        self.references
            .iter()
            .filter(|r| r.is_cross_sheet(&self.name))
    }
}

/// Scan every cell of a sheet, row by row, left to right.
pub fn analyze_sheet(sheet: &Sheet) -> SheetAnalysis {
    let mut formulas = Vec::new();
    let mut formula_type_counts = TypeCounts::new();
    let mut references = Vec::new();

    for (row, cells) in sheet.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let Some(text) = cell.as_formula() else {
                continue;
            };
            let Some(formula) = Formula::parse(text, CellRef::new(row, col)) else {
                continue;
            };

            log::trace!("{}!{} is {}", sheet.name(), formula.location, formula.formula_type);
            *formula_type_counts.entry(formula.formula_type).or_insert(0) += 1;
            references.extend(extract_references(&formula));
            formulas.push(formula);
        }
    }

    log::debug!(
        "sheet {}: {} formulas, {} references",
        sheet.name(),
        formulas.len(),
        references.len()
    );

    SheetAnalysis {
        name: sheet.name().to_string(),
        formulas,
        formula_type_counts,
        references,
        data_ranges: identify_data_ranges(sheet.rows()),
    }
}

/// Find maximal runs of rows that hold at least one non-blank cell.
pub fn identify_data_ranges(rows: &[Vec<Cell>]) -> Vec<DataRange> {
    let mut ranges = Vec::new();
    let mut start: Option<usize> = None;

    for (row, cells) in rows.iter().enumerate() {
        let has_data = cells.iter().any(|cell| !cell.is_blank());
        match (has_data, start) {
            (true, None) => start = Some(row),
            (false, Some(first)) => {
                ranges.push(data_range(rows, first, row - 1));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(first) = start {
        ranges.push(data_range(rows, first, rows.len() - 1));
    }

    ranges
}

fn data_range(rows: &[Vec<Cell>], start: usize, end: usize) -> DataRange {
    let column_width = rows[start..=end].iter().map(Vec::len).max().unwrap_or(0);
    DataRange {
        start,
        end,
        column_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetscope_engine::engine::FormulaType;

    fn text(s: &str) -> Cell {
        Cell::new_text(s)
    }

    #[test]
    fn test_analyze_sheet_collects_formulas_in_order() {
        let sheet = Sheet::new(
            "Sheet1",
            vec![
                vec![text("=SUM(A2:A10)"), text("label"), Cell::Number(3.0)],
                vec![Cell::Empty, text("=Sheet2!B1")],
            ],
        );
        let analysis = analyze_sheet(&sheet);

        assert_eq!(analysis.name, "Sheet1");
        assert_eq!(analysis.formulas.len(), 2);
        assert_eq!(analysis.formulas[0].location, CellRef::new(0, 0));
        assert_eq!(analysis.formulas[1].location, CellRef::new(1, 1));
        assert_eq!(analysis.formula_type_counts.get(&FormulaType::Aggregation), Some(&1));
        assert_eq!(analysis.formula_type_counts.get(&FormulaType::Other), Some(&1));
        assert_eq!(analysis.references.len(), 2);
        assert_eq!(analysis.cross_sheet_references().count(), 1);
    }

    #[test]
    fn test_self_qualified_reference_is_not_cross_sheet() {
        let sheet = Sheet::new("Sheet1", vec![vec![text("=Sheet1!A1")]]);
        let analysis = analyze_sheet(&sheet);
        assert_eq!(analysis.references.len(), 1);
        assert_eq!(analysis.cross_sheet_references().count(), 0);
    }

    #[test]
    fn test_data_ranges_split_on_empty_rows() {
        let rows = vec![
            vec![text("a"), text("b")],
            vec![text("c")],
            vec![],
            vec![Cell::Empty, text(" ")],
            vec![Cell::Number(1.0), Cell::Empty, Cell::Empty],
        ];
        assert_eq!(
            identify_data_ranges(&rows),
            vec![
                DataRange {
                    start: 0,
                    end: 1,
                    column_width: 2
                },
                DataRange {
                    start: 4,
                    end: 4,
                    column_width: 3
                },
            ]
        );
    }

    #[test]
    fn test_data_ranges_empty_sheet() {
        assert!(identify_data_ranges(&[]).is_empty());
        assert!(identify_data_ranges(&[vec![], vec![Cell::Empty]]).is_empty());
    }

    #[test]
    fn test_booleans_and_zero_count_as_data() {
        let rows = vec![vec![Cell::Boolean(false)], vec![Cell::Number(0.0)]];
        assert_eq!(
            identify_data_ranges(&rows),
            vec![DataRange {
                start: 0,
                end: 1,
                column_width: 1
            }]
        );
    }
}
