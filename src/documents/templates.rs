//! Static catalog of ISO 27001 clause documents and natural clause ordering.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;

macro_rules! clause_template {
    ($clause:literal) => {
        (
            $clause,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/clauses/", $clause, ".md")),
        )
    };
}

static CLAUSE_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        clause_template!("4.1"),
        clause_template!("4.2"),
        clause_template!("4.3"),
        clause_template!("5.1"),
        clause_template!("5.2"),
        clause_template!("6.1"),
        clause_template!("6.1.3"),
        clause_template!("6.2"),
        clause_template!("7.2"),
        clause_template!("7.3"),
        clause_template!("8.1"),
        clause_template!("9.1"),
        clause_template!("9.2"),
        clause_template!("9.3"),
        clause_template!("10.1"),
        clause_template!("10.2"),
    ])
});

pub fn clause_template(clause: &str) -> Option<&'static str> {
    CLAUSE_TEMPLATES.get(clause).copied()
}

/// Clause numbers with a dedicated template, in natural order.
pub fn available_clauses() -> Vec<&'static str> {
    let mut clauses: Vec<&'static str> = CLAUSE_TEMPLATES.keys().copied().collect();
    clauses.sort_by(|a, b| compare_clause_refs(a, b));
    clauses
}

const NON_NUMERIC_SEGMENT: i64 = 1 << 30;
const MISSING_SEGMENT: i64 = -1;

fn clause_segments(clause: &str) -> Vec<i64> {
    clause
        .split('.')
        .map(|part| part.parse::<i64>().unwrap_or(NON_NUMERIC_SEGMENT))
        .collect()
}

/// Orders dotted clause references segment by segment as numbers, so `6.1.3`
/// sorts before `6.1.12` and `9.3` before `10.2`. A shorter reference sorts
/// before its own extensions. Equal numeric sequences fall back to plain
/// string order.
pub fn compare_clause_refs(a: &str, b: &str) -> Ordering {
    let left = clause_segments(a);
    let right = clause_segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(MISSING_SEGMENT);
        let r = right.get(i).copied().unwrap_or(MISSING_SEGMENT);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a.cmp(b)
}
