//! Plain-text analysis report.

use super::SpreadsheetAnalysis;

/// Optional report sections. The default report has none of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub data_flow: bool,
    pub data_ranges: bool,
}

/// Render the default report.
pub fn generate_report(analysis: &SpreadsheetAnalysis) -> String {
    generate_report_with(analysis, ReportOptions::default())
}

/// Render a report. Sections follow the field order of the analysis.
pub fn generate_report_with(analysis: &SpreadsheetAnalysis, options: ReportOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Spreadsheet analysis report".to_string());
    lines.push("=".repeat(50));
    lines.push(String::new());

    lines.push(format!("Sheets ({})", analysis.sheets.len()));
    for sheet in &analysis.sheets {
        lines.push(format!(
            "  - {}: {} {}",
            sheet.name,
            sheet.formulas.len(),
            plural(sheet.formulas.len(), "formula", "formulas")
        ));
    }
    lines.push(String::new());

    if options.data_ranges {
        lines.push("Data ranges:".to_string());
        for sheet in &analysis.sheets {
            if sheet.data_ranges.is_empty() {
                lines.push(format!("  - {}: no data", sheet.name));
                continue;
            }
            for range in &sheet.data_ranges {
                lines.push(format!(
                    "  - {}: rows {}-{} ({} {})",
                    sheet.name,
                    range.start + 1,
                    range.end + 1,
                    range.column_width,
                    plural(range.column_width, "column", "columns")
                ));
            }
        }
        lines.push(String::new());
    }

    lines.push(format!("Total formulas: {}", analysis.total_formulas));
    lines.push(String::new());

    lines.push("Formula types:".to_string());
    for (formula_type, count) in &analysis.formula_type_counts {
        lines.push(format!("  - {}: {}", formula_type, count));
    }
    lines.push(String::new());

    if !analysis.dependencies.is_empty() {
        lines.push(format!(
            "Cross-sheet dependencies ({})",
            analysis.dependencies.len()
        ));
        for dep in &analysis.dependencies {
            lines.push(format!("  {} → {}", dep.from, dep.to));
        }
        lines.push(String::new());
    }

    if options.data_flow && !analysis.data_flow.is_empty() {
        lines.push(format!("Data flow ({})", analysis.data_flow.len()));
        for step in &analysis.data_flow {
            lines.push(format!("  {} → {}", step.path.join(" → "), step.to));
        }
        lines.push(String::new());
    }

    lines.push(format!("Complexity score: {}", analysis.complexity));
    lines.push(String::new());

    lines.join("\n")
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
