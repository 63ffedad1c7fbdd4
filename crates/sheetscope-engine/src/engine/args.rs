//! Function name and top-level argument extraction.
//!
//! Only the outermost call is split. Nested calls come back verbatim as one
//! argument each (`IF(B1>0,C1,D1)` stays whole); nothing here recurses.

use regex::Regex;
use std::sync::OnceLock;

/// Leading function name of a formula body, upper-cased.
/// `VLOOKUP(...)` -> `Some("VLOOKUP")`, `A1+B1` -> `None`.
pub fn function_name(body: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_.]*)\(").expect("function name regex must compile")
    });
    re.captures(body).map(|caps| caps[1].to_uppercase())
}

/// Text between the first `(` and a `)` that closes the body.
/// Returns None when the body does not end in a call.
pub fn call_body(body: &str) -> Option<&str> {
    let trimmed = body.trim_end();
    let open = trimmed.find('(')?;
    let inner = trimmed.strip_suffix(')')?;
    inner.get(open + 1..)
}

/// Arguments of a formula body.
///
/// A body ending in a call yields that call's top-level arguments. Anything
/// else (`Sheet2!A1`, `A1+B1`) is a single argument so its references are
/// still seen.
pub fn formula_arguments(body: &str) -> Vec<String> {
    match call_body(body) {
        Some(inner) => split_arguments(inner),
        None => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
    }
}

/// Split an argument list on commas at nesting depth zero.
///
/// Unbalanced parentheses are tolerated: whatever has accumulated at the end
/// of input is returned as the last argument.
pub fn split_arguments(inner: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in inner.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                args.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if !current.trim().is_empty() {
        args.push(current.trim().to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_comma_does_not_split() {
        assert_eq!(
            formula_arguments("SUM(A1,IF(B1>0,C1,D1))"),
            vec!["A1", "IF(B1>0,C1,D1)"]
        );
    }

    #[test]
    fn test_arguments_are_trimmed() {
        assert_eq!(
            formula_arguments("VLOOKUP( B1 , Sheet2!A:B ,2, FALSE )"),
            vec!["B1", "Sheet2!A:B", "2", "FALSE"]
        );
    }

    #[test]
    fn test_empty_call_has_no_arguments() {
        assert!(formula_arguments("TODAY()").is_empty());
        assert!(formula_arguments("").is_empty());
    }

    #[test]
    fn test_inner_empty_arguments_are_kept() {
        assert_eq!(split_arguments("A1,,B1"), vec!["A1", "", "B1"]);
    }

    #[test]
    fn test_body_without_call_is_one_argument() {
        assert_eq!(formula_arguments("Sheet2!A1"), vec!["Sheet2!A1"]);
        assert_eq!(formula_arguments(" A1+B1 "), vec!["A1+B1"]);
        assert_eq!(formula_arguments("SUM(A1)+1"), vec!["SUM(A1)+1"]);
    }

    #[test]
    fn test_unbalanced_parentheses_do_not_panic() {
        assert_eq!(split_arguments("A1,(B1,C1"), vec!["A1", "(B1,C1"]);
        assert_eq!(split_arguments("A1),B1"), vec!["A1),B1"]);
        assert_eq!(formula_arguments("SUM((A1)"), vec!["(A1"]);
    }

    #[test]
    fn test_call_body_spans_first_open_to_last_close() {
        assert_eq!(call_body("SUM(A1)+MAX(B1)"), Some("A1)+MAX(B1"));
        assert_eq!(call_body("A1+B1"), None);
        assert_eq!(call_body("SUM(A1"), None);
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("vlookup(A1,B:C,2)"), Some("VLOOKUP".to_string()));
        assert_eq!(function_name("LOG10(A1)"), Some("LOG10".to_string()));
        assert_eq!(function_name("T.TEST(A:A,B:B,2,1)"), Some("T.TEST".to_string()));
        assert_eq!(function_name("A1+B1"), None);
        assert_eq!(function_name("(A1)"), None);
    }
}
