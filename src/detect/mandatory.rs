//! Mandatory DSL property detection.
//!
//! Methods of a DSL root annotated with `@DSLMandatory` must be invoked inside
//! every lambda configuring that root. Mandatory methods sharing a `group` are
//! interchangeable: the group is satisfied as soon as any member is set or
//! called. Ungrouped methods form a group of their own, keyed by their name.
//!
//! For each lambda the detector runs four steps:
//!
//! 1. [`MandatoryDetector::discover`] collects the mandatory properties of the
//!    receiver class, grouped.
//! 2. [`count_calls`] tallies matching top-level statements per group.
//! 3. [`missing_groups`] keeps the groups with no matching statement.
//! 4. [`build_fix`] offers one stub insertion per property of a missing group.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::fix::LintFix;
use super::types::{Category, Diagnostic, Issue, Severity};
use crate::analysis::{
    AnnotationRef, BeanNaming, DslClass, DslMethod, LambdaNode, PropertyNaming, Span, Statement,
};
use crate::annotations::{mandatory, AnnotationNames};

/// Issue reported for a lambda missing a mandatory property group.
pub static ISSUE: Issue = Issue {
    id: "DSLMandatory",
    brief: "Mandatory DSL property not defined",
    explanation: "Mandatory DSL property not defined",
    category: Category::Correctness,
    priority: 6,
    severity: Severity::Error,
};

/// How a mandatory property is supplied inside the lambda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Invoked as a function, e.g. `enableLogging()` or `retry { }`.
    Function,
    /// Assigned as a property, e.g. `timeout = 30`.
    Property,
}

/// One `@DSLMandatory` method of a DSL root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryProperty {
    /// Property name for setters, method name otherwise.
    pub name: String,
    pub kind: PropertyKind,
    /// Explicit group; never blank.
    pub group: Option<String>,
    /// Custom report message; never blank.
    pub message: Option<String>,
}

impl MandatoryProperty {
    /// The group this property counts towards.
    pub fn group_key(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.name)
    }

    /// Statement inserted by the quick fix.
    fn stub(&self) -> String {
        match self.kind {
            PropertyKind::Property => format!("{} = ", self.name),
            PropertyKind::Function => format!("{}{{\n}}", self.name),
        }
    }
}

/// Group key to member properties, in discovery order.
pub type PropertyGroups = IndexMap<String, Vec<MandatoryProperty>>;

/// Group key to number of matching statements.
pub type GroupCounts = IndexMap<String, usize>;

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

/// Detector for `@DSLMandatory` properties.
pub struct MandatoryDetector {
    annotations: AnnotationNames,
    naming: Box<dyn PropertyNaming>,
    severity: Severity,
}

impl Default for MandatoryDetector {
    fn default() -> Self {
        Self::new(AnnotationNames::default())
    }
}

impl MandatoryDetector {
    pub fn new(annotations: AnnotationNames) -> Self {
        Self {
            annotations,
            naming: Box::new(BeanNaming),
            severity: ISSUE.severity,
        }
    }

    /// Use a different setter naming convention.
    pub fn with_naming(mut self, naming: Box<dyn PropertyNaming>) -> Self {
        self.naming = naming;
        self
    }

    /// Report with a severity other than the issue default.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn issue(&self) -> &'static Issue {
        &ISSUE
    }

    /// Check one lambda configuring `class`.
    pub fn visit_lambda<C: DslClass>(&self, lambda: LambdaNode<'_>, class: &C) -> Vec<Diagnostic> {
        let groups = self.discover(class);
        if groups.is_empty() {
            return Vec::new();
        }

        let counts = count_calls(&groups, lambda.body);
        tracing::trace!(
            class = class.name(),
            file = lambda.file,
            at = %lambda.span,
            ?counts,
            "counted mandatory calls"
        );

        missing_groups(&counts)
            .map(|group| self.report(lambda, group, &groups[group]))
            .collect()
    }

    fn report(
        &self,
        lambda: LambdaNode<'_>,
        group: &str,
        properties: &[MandatoryProperty],
    ) -> Diagnostic {
        let message = message_for(group, properties);
        tracing::debug!(file = lambda.file, at = %lambda.span, %message, "missing mandatory group");
        Diagnostic {
            issue: ISSUE.id.to_string(),
            severity: self.severity,
            file: lambda.file.to_string(),
            span: lambda.span,
            message,
            fix: Some(build_fix(properties, lambda.span)),
        }
    }

    /// Collect the mandatory properties of `class`, grouped by explicit
    /// group or, when ungrouped, by the property's own name.
    ///
    /// A method name yields at most one property: the first annotated
    /// occurrence in `all_methods` wins, so a marked override replaces the
    /// inherited marker while an unmarked one leaves it in place.
    pub fn discover<C: DslClass>(&self, class: &C) -> PropertyGroups {
        let mut groups = PropertyGroups::new();
        let mut seen: IndexSet<&str> = IndexSet::new();
        for method in class.all_methods() {
            let Some(property) = self.mandatory_property(method) else {
                continue;
            };
            if seen.insert(method.name()) {
                groups
                    .entry(property.group_key().to_string())
                    .or_default()
                    .push(property);
            }
        }
        groups
    }

    /// Describe `method` if it carries `@DSLMandatory`.
    pub fn mandatory_property<M: DslMethod>(&self, method: &M) -> Option<MandatoryProperty> {
        let annotation = method.annotation(&self.annotations.mandatory)?;
        let group = non_blank(annotation.string_attribute(mandatory::GROUP));
        let message = non_blank(annotation.string_attribute(mandatory::MESSAGE));

        let (name, kind) = match self.naming.property_name(method.name()) {
            Some(property) => (property, PropertyKind::Property),
            None => (method.name().to_string(), PropertyKind::Function),
        };

        Some(MandatoryProperty {
            name,
            kind,
            group,
            message,
        })
    }
}

/// Count, per group, the top-level statements that assign or call one of its
/// properties. Every group of `groups` is present in the result.
///
/// Nested blocks are not inspected, and assignments to anything but a bare
/// identifier are skipped.
pub fn count_calls(groups: &PropertyGroups, statements: &[Statement]) -> GroupCounts {
    let assignments = tally(
        groups,
        statements.iter().filter_map(|s| match s {
            Statement::Assignment { target } => target.identifier(),
            _ => None,
        }),
    );
    let calls = tally(
        groups,
        statements.iter().filter_map(|s| match s {
            Statement::Call { name } => Some(name.as_str()),
            _ => None,
        }),
    );

    let mut counts = assignments;
    for (group, n) in calls {
        *counts.entry(group).or_insert(0) += n;
    }
    for group in groups.keys() {
        counts.entry(group.clone()).or_insert(0);
    }
    counts
}

fn tally<'a>(groups: &PropertyGroups, names: impl Iterator<Item = &'a str>) -> GroupCounts {
    let mut counts = GroupCounts::new();
    for name in names {
        if let Some(group) = group_of(groups, name) {
            *counts.entry(group.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// First group with a property named exactly `name`.
fn group_of<'g>(groups: &'g PropertyGroups, name: &str) -> Option<&'g str> {
    groups
        .iter()
        .find(|(_, properties)| properties.iter().any(|p| p.name == name))
        .map(|(group, _)| group.as_str())
}

/// Groups without a single matching statement.
pub fn missing_groups(counts: &GroupCounts) -> impl Iterator<Item = &str> {
    counts
        .iter()
        .filter(|(_, n)| **n == 0)
        .map(|(group, _)| group.as_str())
}

/// The first property's custom message, or a generated one.
pub fn message_for(group: &str, properties: &[MandatoryProperty]) -> String {
    properties
        .first()
        .and_then(|p| p.message.clone())
        .unwrap_or_else(|| format!("\"{}\" property must be defined", group))
}

/// One alternative per property, each inserting a stub right after the
/// lambda's opening brace.
pub fn build_fix(properties: &[MandatoryProperty], lambda_span: Span) -> LintFix {
    let mut group = LintFix::group();
    for property in properties {
        group.add(
            LintFix::replace()
                .name(format!("Define \"{}\" property", property.name))
                .range(lambda_span)
                .text("{")
                .with(format!("{{\n{}", property.stub()))
                .reformat(true)
                .build(),
        );
    }
    group.build()
}
