//! Data flow tracing across sheets.
//!
//! Walks the sheet graph depth-first, starting from each sheet in input order
//! that has not been reached yet. A single visited set spans the whole walk,
//! so every sheet is entered at most once and cycles terminate. The cost is
//! that a sheet reachable along two paths is only recorded along the first
//! one found.
//!
//! The walk is iterative; call stack depth does not grow with chain length.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::sheet::SheetAnalysis;

/// Data reaches `to` along `path` (which ends at the referencing sheet).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowStep {
    pub path: Vec<String>,
    pub to: String,
}

struct Frame<'a> {
    path: Vec<&'a str>,
    next: usize,
}

/// Trace data flow over the cross-sheet references of `sheets`.
pub fn analyze_data_flow(sheets: &[SheetAnalysis]) -> Vec<FlowStep> {
    let targets: HashMap<&str, Vec<&str>> = sheets
        .iter()
        .map(|sheet| (sheet.name.as_str(), distinct_targets(sheet)))
        .collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut flow = Vec::new();

    for sheet in sheets {
        let root = sheet.name.as_str();
        if !visited.insert(root) {
            continue;
        }

        let mut stack = vec![Frame {
            path: vec![root],
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let current = frame.path[frame.path.len() - 1];
            let outgoing = targets.get(current).map(Vec::as_slice).unwrap_or(&[]);

            let Some(&target) = outgoing.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if !visited.insert(target) {
                continue;
            }

            flow.push(FlowStep {
                path: frame.path.iter().map(|s| s.to_string()).collect(),
                to: target.to_string(),
            });

            let mut path = frame.path.clone();
            path.push(target);
            stack.push(Frame { path, next: 0 });
        }
    }

    flow
}

/// Cross-sheet targets of one sheet, first-reference order, no repeats.
fn distinct_targets(sheet: &SheetAnalysis) -> Vec<&str> {
    let mut seen = HashSet::new();
    sheet
        .cross_sheet_references()
        .filter_map(|r| r.sheet_name.as_deref())
        .filter(|name| seen.insert(*name))
        .collect()
}
