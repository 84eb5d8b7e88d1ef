//! Suggested edits attached to diagnostics.
//!
//! Fixes are assembled with builders and frozen into immutable values on
//! `build()`; nothing is observable before that.

use serde::{Deserialize, Serialize};

use crate::analysis::Span;

/// Replace the first occurrence of `old_text` inside `range` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceFix {
    /// Label shown to the user, e.g. `Define "timeout" property`.
    pub label: String,
    pub range: Span,
    pub old_text: String,
    pub new_text: String,
    /// Ask the applying editor to reformat the edited region.
    pub reformat: bool,
}

/// A fix offered with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LintFix {
    Replace(ReplaceFix),
    /// Mutually exclusive alternatives; applying one resolves the diagnostic.
    Alternatives { fixes: Vec<ReplaceFix> },
}

impl LintFix {
    /// Start a text replacement.
    pub fn replace() -> ReplaceFixBuilder {
        ReplaceFixBuilder::default()
    }

    /// Start a group of alternative fixes.
    pub fn group() -> FixGroupBuilder {
        FixGroupBuilder::default()
    }

    /// All edits this fix may perform, in offer order.
    pub fn alternatives(&self) -> &[ReplaceFix] {
        match self {
            LintFix::Replace(fix) => std::slice::from_ref(fix),
            LintFix::Alternatives { fixes } => fixes,
        }
    }
}

#[derive(Debug, Default)]
pub struct ReplaceFixBuilder {
    label: String,
    range: Span,
    old_text: String,
    new_text: String,
    reformat: bool,
}

impl ReplaceFixBuilder {
    pub fn name(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn range(mut self, range: Span) -> Self {
        self.range = range;
        self
    }

    pub fn text(mut self, old_text: impl Into<String>) -> Self {
        self.old_text = old_text.into();
        self
    }

    pub fn with(mut self, new_text: impl Into<String>) -> Self {
        self.new_text = new_text.into();
        self
    }

    pub fn reformat(mut self, reformat: bool) -> Self {
        self.reformat = reformat;
        self
    }

    pub fn build(self) -> ReplaceFix {
        ReplaceFix {
            label: self.label,
            range: self.range,
            old_text: self.old_text,
            new_text: self.new_text,
            reformat: self.reformat,
        }
    }
}

#[derive(Debug, Default)]
pub struct FixGroupBuilder {
    fixes: Vec<ReplaceFix>,
}

impl FixGroupBuilder {
    pub fn add(&mut self, fix: ReplaceFix) -> &mut Self {
        self.fixes.push(fix);
        self
    }

    pub fn build(self) -> LintFix {
        LintFix::Alternatives { fixes: self.fixes }
    }
}
