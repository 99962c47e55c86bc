//! Weak-line detection — flags resume lines built on stock phrasing with no number behind them.

use crate::analysis::digits::contains_digit;

/// Generic phrases that usually describe a duty rather than an outcome.
const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "worked on",
    "involved in",
    "tasked with",
    "duties included",
    "helped with",
];

/// Scans resume text for weak lines.
///
/// The text is split on newlines and periods. A trimmed, non-empty piece is weak when
/// its lowercase form contains one of [`WEAK_PHRASES`] and it carries no decimal digit
/// in any script: any digit is taken as a sign of a quantified accomplishment.
/// Pieces are returned trimmed and in their original order; duplicates are kept.
pub fn find_weak_lines(resume_text: &str) -> Vec<String> {
    resume_text
        .split(['\n', '.'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_weak(line))
        .map(String::from)
        .collect()
}

fn is_weak(line: &str) -> bool {
    let lower = line.to_lowercase();
    !contains_digit(line) && WEAK_PHRASES.iter().any(|p| lower.contains(p))
}
