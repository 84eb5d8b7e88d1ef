//! Detection of DSL convention issues.

mod fix;
mod mandatory;
mod runner;
mod suppress;
mod types;

pub use fix::{FixGroupBuilder, LintFix, ReplaceFix, ReplaceFixBuilder};
pub use mandatory::{
    build_fix, count_calls, message_for, missing_groups, GroupCounts, MandatoryDetector,
    MandatoryProperty, PropertyGroups, PropertyKind, ISSUE,
};
pub use runner::Runner;
pub use suppress::{filter_suppressed, is_suppressed, SUPPRESS_ALL};
pub use types::{Category, DetectionResult, Diagnostic, Issue, Severity};

/// All issues dslint can report.
pub fn issues() -> &'static [&'static Issue] {
    static ISSUES: [&Issue; 1] = [&ISSUE];
    &ISSUES
}
