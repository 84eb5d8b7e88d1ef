//! Per-lambda suppression of diagnostics.
//!
//! Front ends copy `@Suppress("DSLMandatory")` (or `@Suppress("all")`) found
//! on or around a lambda into the lambda's `suppress` list.

use super::Diagnostic;

/// Suppresses every issue.
pub const SUPPRESS_ALL: &str = "all";

/// Whether `issue_id` is silenced by a `suppress` list.
pub fn is_suppressed(suppress: &[String], issue_id: &str) -> bool {
    suppress
        .iter()
        .any(|s| s == issue_id || s.eq_ignore_ascii_case(SUPPRESS_ALL))
}

/// Split diagnostics into (active, suppressed).
pub fn filter_suppressed(
    diagnostics: Vec<Diagnostic>,
    suppress: &[String],
) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
    if suppress.is_empty() {
        return (diagnostics, Vec::new());
    }
    diagnostics
        .into_iter()
        .partition(|d| !is_suppressed(suppress, &d.issue))
}
