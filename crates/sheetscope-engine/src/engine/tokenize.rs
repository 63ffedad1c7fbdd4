//! Lexical reference tokens.
//!
//! Reference extraction only needs to know where cell and range tokens sit in
//! a piece of formula text and which sheet, if any, qualifies them. That job
//! sits behind [`ReferenceTokenizer`] so a real formula parser can replace the
//! regex scanner without touching classification or graph code.
//!
//! Recognised tokens (each optionally `$`-anchored):
//! - cell range `A1:B2`
//! - open-ended range `A2:A`
//! - column range `A:A`
//! - row range `1:1`
//! - single cell `A1`
//!
//! A `Sheet!` or `'Sheet Name'!` prefix is captured as the qualifier.

use regex::Regex;
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// One reference token found in formula text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefToken {
    /// The token without its sheet qualifier, e.g. `A:B`.
    pub text: String,
    /// Sheet qualifier with quotes removed.
    pub sheet: Option<String>,
}

/// Finds reference tokens in a piece of formula text.
pub trait ReferenceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<RefToken>;
}

/// Regex-backed tokenizer used by default.
///
/// Text inside double-quoted string literals is ignored. A token must stand
/// alone on both sides: anything touching an identifier character (named
/// ranges such as `Q1_Total`) or followed by `(` (function names such as
/// `LOG10(`) is skipped, as are tokens naming row 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegexTokenizer;

impl ReferenceTokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<RefToken> {
        let text = strip_string_literals(text);
        let mut tokens = Vec::new();

        for caps in reference_re().captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let Some(token) = caps.name("token") else {
                continue;
            };

            // Must not start or end in the middle of an identifier
            // (`xA1`, `Q1_Total`), and `LOG10(` is a call, not a cell.
            let before = text[..whole.start()].chars().next_back();
            let after = text[whole.end()..].chars().next();
            if before.is_some_and(is_identifier_char)
                || after.is_some_and(|c| c == '(' || is_identifier_char(c))
            {
                continue;
            }
            if !cell_parts_are_valid(token.as_str()) {
                continue;
            }

            let sheet = caps
                .name("quoted")
                .map(|m| m.as_str().replace("''", "'"))
                .or_else(|| caps.name("sheet").map(|m| m.as_str().to_string()));

            tokens.push(RefToken {
                text: token.as_str().to_string(),
                sheet,
            });
        }

        tokens
    }
}

/// Every part of the token that names a cell must be a real A1 cell (`A0`
/// is not). Column-only and row-only parts are not checked.
fn cell_parts_are_valid(token: &str) -> bool {
    token
        .split(':')
        .filter(|part| {
            part.bytes().any(|b| b.is_ascii_alphabetic()) && part.bytes().any(|b| b.is_ascii_digit())
        })
        .all(|part| CellRef::parse(part).is_some())
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?:(?:'(?<quoted>(?:[^']|'')+)'|(?<sheet>[A-Za-z0-9_.]+))!)?",
            r"(?<token>",
            r"\$?[A-Z]+\$?[0-9]+:\$?[A-Z]+\$?[0-9]+",
            r"|\$?[A-Z]+\$?[0-9]+:\$?[A-Z]+",
            r"|\$?[A-Z]+:\$?[A-Z]+",
            r"|\$?[0-9]+:\$?[0-9]+",
            r"|\$?[A-Z]+\$?[0-9]+",
            r")",
        ))
        .expect("reference token regex must compile")
    })
}

/// Blank out the contents of `"..."` literals, keeping the quotes.
/// Doubled quotes inside a literal toggle out and back in, which leaves them
/// blank as well.
fn strip_string_literals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;

    for ch in text.chars() {
        if ch == '"' {
            in_string = !in_string;
            out.push('"');
        } else if in_string {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    out
}
