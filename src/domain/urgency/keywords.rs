//! Crisis-language keyword table.
//!
//! Free text is scanned against a fixed table of patterns. Matches are
//! reported as structured slugs (`crisis_language:<slug>`); the matched
//! text itself is never carried into results, logs, or events.

use once_cell::sync::Lazy;
use regex::Regex;

/// One row of the keyword table: a stable slug and its pattern.
struct CrisisPattern {
    slug: &'static str,
    regex: Regex,
}

static CRISIS_PATTERNS: Lazy<Vec<CrisisPattern>> = Lazy::new(|| {
    let table: &[(&str, &str)] = &[
        ("suicidal_language", r"(?i)\bsuicid(e|al)\b|\bkill(ing)? myself\b"),
        ("self_harm", r"(?i)\bself[- ]harm\b|\bhurt(ing)? myself\b|\bcut(ting)? myself\b"),
        ("hopelessness", r"(?i)\bhopeless\b|\bno hope\b|\bnothing matters\b"),
        ("no_way_out", r"(?i)\bno way out\b|\bcan'?t go on\b|\bend it all\b"),
        ("worthlessness", r"(?i)\bworthless\b|\bbetter off without me\b"),
        ("giving_up", r"(?i)\bgiv(e|ing) up\b|\bdone with everything\b"),
    ];

    table
        .iter()
        .map(|(slug, pattern)| CrisisPattern {
            slug,
            regex: Regex::new(pattern).expect("crisis pattern table must compile"),
        })
        .collect()
});

/// Scans free text and returns the slugs of matched crisis patterns.
///
/// Each pattern reports at most once regardless of repetition, and the
/// output order follows the fixed table order, so results are
/// deterministic for identical input.
pub fn scan_crisis_language(text: &str) -> Vec<&'static str> {
    CRISIS_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(text))
        .map(|p| p.slug)
        .collect()
}
