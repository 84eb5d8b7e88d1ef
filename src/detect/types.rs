//! Core types for detection results.

use serde::{Deserialize, Serialize};

use super::fix::LintFix;
use crate::analysis::Span;

/// Severity levels for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Correctness,
    Usability,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Correctness => "correctness",
            Category::Usability => "usability",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static identity of a reportable issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issue {
    pub id: &'static str,
    pub brief: &'static str,
    pub explanation: &'static str,
    pub category: Category,
    /// 1 (lowest) to 10 (highest).
    pub priority: u8,
    pub severity: Severity,
}

/// A single reported problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Issue id, e.g. `DSLMandatory`.
    pub issue: String,
    pub severity: Severity,
    pub file: String,
    /// Span of the whole lambda.
    pub span: Span,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<LintFix>,
}

impl Diagnostic {
    pub fn line(&self) -> usize {
        self.span.start_line
    }
}

/// Results of running detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics silenced by a lambda's `suppress` list.
    #[serde(default)]
    pub suppressed: Vec<Diagnostic>,
    /// Number of fact documents scanned.
    pub scanned: usize,
    /// Number of DSL lambdas the detector visited.
    pub lambdas_visited: usize,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DetectionResult) {
        self.diagnostics.extend(other.diagnostics);
        self.suppressed.extend(other.suppressed);
        self.scanned += other.scanned;
        self.lambdas_visited += other.lambdas_visited;
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Sort by file, then position. Diagnostics of one lambda keep their
    /// reporting order.
    pub fn sort(&mut self) {
        let by_location = |a: &Diagnostic, b: &Diagnostic| {
            (&a.file, a.span.start_line, a.span.start_col).cmp(&(
                &b.file,
                b.span.start_line,
                b.span.start_col,
            ))
        };
        self.diagnostics.sort_by(by_location);
        self.suppressed.sort_by(by_location);
    }
}
