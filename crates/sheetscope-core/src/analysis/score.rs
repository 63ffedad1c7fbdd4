//! Spreadsheet complexity score.

use super::TypeCounts;

/// Weight of one cross-sheet dependency edge.
pub const DEPENDENCY_WEIGHT: usize = 3;

/// `formulas + 3 × edges + Σ count × type weight`.
///
/// Pure function of the aggregates; see [`FormulaType::weight`] for the
/// per-type weights.
///
/// [`FormulaType::weight`]: sheetscope_engine::engine::FormulaType::weight
pub fn calculate_complexity(
    total_formulas: usize,
    dependency_count: usize,
    formula_type_counts: &TypeCounts,
) -> usize {
    let weighted: usize = formula_type_counts
        .iter()
        .map(|(formula_type, count)| count * formula_type.weight())
        .sum();
    total_formulas + dependency_count * DEPENDENCY_WEIGHT + weighted
}
