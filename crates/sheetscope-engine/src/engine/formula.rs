//! Parsed formula cells and per-formula complexity.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use super::args::{formula_arguments, function_name};
use super::cell_ref::CellRef;
use super::classify::{FormulaType, classify_formula};

/// One formula cell after classification and argument splitting.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    /// Cell text including the leading `=`, original case.
    pub original_text: String,
    pub location: CellRef,
    #[serde(rename = "type")]
    pub formula_type: FormulaType,
    pub function_name: Option<String>,
    pub arguments: Vec<String>,
    pub complexity: usize,
}

impl Formula {
    /// Parse formula text found at `location`.
    /// Returns None unless the text starts with `=`. Malformed bodies still
    /// parse: they classify as `OTHER` with a best-effort argument list.
    pub fn parse(text: &str, location: CellRef) -> Option<Formula> {
        let body = text.strip_prefix('=')?;
        Some(Formula {
            original_text: text.to_string(),
            location,
            formula_type: classify_formula(body),
            function_name: function_name(body),
            arguments: formula_arguments(body),
            complexity: formula_complexity(body),
        })
    }
}

/// Heuristic weight of one formula body:
/// `1 + 2 per '(' + 3 per standalone IF + 5 if ARRAYFORMULA appears`.
///
/// Parentheses are counted, not nesting depth.
pub fn formula_complexity(body: &str) -> usize {
    let parens = body.matches('(').count();
    let conditionals = if_re().find_iter(body).count();
    let array = if body.to_uppercase().contains("ARRAYFORMULA") {
        5
    } else {
        0
    };
    1 + parens * 2 + conditionals * 3 + array
}

fn if_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?-u:\b)IF(?-u:\b)").expect("IF counting regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_equals() {
        assert!(Formula::parse("SUM(A1)", CellRef::new(0, 0)).is_none());
        assert!(Formula::parse("=SUM(A1)", CellRef::new(0, 0)).is_some());
    }

    #[test]
    fn test_parse_fields() {
        let f = Formula::parse("=vlookup(B1,Sheet2!A:B,2,FALSE)", CellRef::new(3, 1)).unwrap();
        assert_eq!(f.original_text, "=vlookup(B1,Sheet2!A:B,2,FALSE)");
        assert_eq!(f.location, CellRef::new(3, 1));
        assert_eq!(f.formula_type, FormulaType::Lookup);
        assert_eq!(f.function_name.as_deref(), Some("VLOOKUP"));
        assert_eq!(f.arguments, vec!["B1", "Sheet2!A:B", "2", "FALSE"]);
        assert_eq!(f.complexity, 3);
    }

    #[test]
    fn test_complexity_formula() {
        assert_eq!(formula_complexity("A1"), 1);
        assert_eq!(formula_complexity("SUM(A1:A10)"), 3);
        // two '(' and two IF: 1 + 4 + 6
        assert_eq!(formula_complexity("IF(A1,IF(B1,1,2),3)"), 11);
        // IFS and COUNTIF are not standalone IF
        assert_eq!(formula_complexity("IFS(A1,1)"), 3);
        assert_eq!(formula_complexity("COUNTIF(A:A,1)"), 3);
        // lower-case if still counts
        assert_eq!(formula_complexity("if(A1,1,0)"), 6);
        // one '(' + ARRAYFORMULA bonus
        assert_eq!(formula_complexity("ArrayFormula(A1:A*2)"), 8);
    }

    #[test]
    fn test_complexity_counts_parens_not_depth() {
        assert_eq!(formula_complexity("(((A1)))"), 7);
        assert_eq!(formula_complexity("((("), 7);
    }

    #[test]
    fn test_malformed_formula_still_parses() {
        let f = Formula::parse("=SUM((A1,", CellRef::new(0, 0)).unwrap();
        assert_eq!(f.formula_type, FormulaType::Aggregation);
        assert_eq!(f.arguments, vec!["SUM((A1,"]);
        assert!(f.complexity >= 1);

        let f = Formula::parse("=", CellRef::new(0, 0)).unwrap();
        assert_eq!(f.formula_type, FormulaType::Other);
        assert!(f.arguments.is_empty());
        assert_eq!(f.complexity, 1);
    }
}
