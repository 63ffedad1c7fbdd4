//! Formula classification.
//!
//! Every formula body lands in exactly one [`FormulaType`]. Rules live in a
//! single ordered table, [`CLASSIFICATION_RULES`]; the first rule whose
//! predicate holds wins, so a lookup that also aggregates is a `LOOKUP` and an
//! `IF` wrapped around `INDEX`/`MATCH` is an `INDEX_MATCH`.
//!
//! Matching runs on the upper-cased body. Word boundaries are ASCII so that
//! non-Latin text next to a function name does not hide it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Category of a formula. Declaration order is precedence order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormulaType {
    Lookup,
    IndexMatch,
    ConditionalAggregation,
    Aggregation,
    Conditional,
    Switch,
    Array,
    ArrayFilter,
    Datetime,
    Text,
    Other,
}

impl FormulaType {
    pub const ALL: [FormulaType; 11] = [
        FormulaType::Lookup,
        FormulaType::IndexMatch,
        FormulaType::ConditionalAggregation,
        FormulaType::Aggregation,
        FormulaType::Conditional,
        FormulaType::Switch,
        FormulaType::Array,
        FormulaType::ArrayFilter,
        FormulaType::Datetime,
        FormulaType::Text,
        FormulaType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormulaType::Lookup => "LOOKUP",
            FormulaType::IndexMatch => "INDEX_MATCH",
            FormulaType::ConditionalAggregation => "CONDITIONAL_AGGREGATION",
            FormulaType::Aggregation => "AGGREGATION",
            FormulaType::Conditional => "CONDITIONAL",
            FormulaType::Switch => "SWITCH",
            FormulaType::Array => "ARRAY",
            FormulaType::ArrayFilter => "ARRAY_FILTER",
            FormulaType::Datetime => "DATETIME",
            FormulaType::Text => "TEXT",
            FormulaType::Other => "OTHER",
        }
    }

    /// Weight of one formula of this type in the spreadsheet complexity score.
    pub fn weight(self) -> usize {
        match self {
            FormulaType::Lookup => 3,
            FormulaType::IndexMatch => 4,
            FormulaType::ConditionalAggregation => 3,
            FormulaType::Array => 5,
            FormulaType::Conditional => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FormulaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate over an upper-cased formula body.
pub type Predicate = fn(&str) -> bool;

/// Classification rules in precedence order. `OTHER` is the fallback and has
/// no entry.
pub const CLASSIFICATION_RULES: &[(FormulaType, Predicate)] = &[
    (FormulaType::Lookup, is_lookup),
    (FormulaType::IndexMatch, is_index_match),
    (FormulaType::ConditionalAggregation, is_conditional_aggregation),
    (FormulaType::Aggregation, is_aggregation),
    (FormulaType::Conditional, is_conditional),
    (FormulaType::Switch, is_switch),
    (FormulaType::Array, is_array),
    (FormulaType::ArrayFilter, is_array_filter),
    (FormulaType::Datetime, is_datetime),
    (FormulaType::Text, is_text),
];

/// Classify a formula body (text after the leading `=`).
pub fn classify_formula(body: &str) -> FormulaType {
    let upper = body.to_uppercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|(_, matches)| matches(&upper))
        .map(|(formula_type, _)| *formula_type)
        .unwrap_or(FormulaType::Other)
}

fn is_lookup(upper: &str) -> bool {
    upper.contains("VLOOKUP") || upper.contains("HLOOKUP")
}

fn is_index_match(upper: &str) -> bool {
    upper.contains("INDEX") && upper.contains("MATCH")
}

fn is_conditional_aggregation(upper: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_re(r"(?-u:\b)(SUM|AVERAGE|COUNT|MAX|MIN)IF"))
        .is_match(upper)
}

fn is_aggregation(upper: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_re(r"(?-u:\b)(SUM|AVERAGE|COUNT|MAX|MIN)(?-u:\b)"))
        .is_match(upper)
}

fn is_conditional(upper: &str) -> bool {
    upper.starts_with("IF(") || upper.contains("IFS(")
}

fn is_switch(upper: &str) -> bool {
    upper.contains("SWITCH(")
}

fn is_array(upper: &str) -> bool {
    upper.contains("ARRAYFORMULA")
}

fn is_array_filter(upper: &str) -> bool {
    upper.contains("FILTER(") || upper.contains("UNIQUE(")
}

fn is_datetime(upper: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_re(r"(?-u:\b)(DATE|TIME|NOW|TODAY|YEAR|MONTH|DAY)(?-u:\b)"))
        .is_match(upper)
}

fn is_text(upper: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        word_re(r"(?-u:\b)(CONCATENATE|TEXTJOIN|LEFT|RIGHT|MID|TRIM)(?-u:\b)")
    })
    .is_match(upper)
}

fn word_re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("classification regex must compile")
}
