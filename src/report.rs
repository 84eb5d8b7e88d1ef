//! Output formatting for dslint results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::detect::{self, DetectionResult, Diagnostic, Issue, ReplaceFix, Severity};

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub passed: bool,
    pub files_scanned: usize,
    pub lambdas_visited: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<JsonDiagnostic>,
    pub suppressed_count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub issue: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<JsonFix>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFix {
    pub label: String,
    pub old: String,
    pub new: String,
    pub reformat: bool,
}

/// Build the JSON report structure.
pub fn json_report(path: &str, result: &DetectionResult) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        passed: !result.has_errors(),
        files_scanned: result.scanned,
        lambdas_visited: result.lambdas_visited,
        diagnostics: result.diagnostics.iter().map(diagnostic_to_json).collect(),
        suppressed: result.suppressed.iter().map(diagnostic_to_json).collect(),
        suppressed_count: result.suppressed.len(),
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, result: &DetectionResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(path, result))?;
    println!("{}", json);
    Ok(())
}

fn fix_alternatives(d: &Diagnostic) -> &[ReplaceFix] {
    d.fix.as_ref().map(|f| f.alternatives()).unwrap_or(&[])
}

fn diagnostic_to_json(d: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        issue: d.issue.clone(),
        severity: d.severity.to_string(),
        file: d.file.clone(),
        line: d.span.start_line,
        column: d.span.start_col,
        message: d.message.clone(),
        fixes: fix_alternatives(d)
            .iter()
            .map(|f| JsonFix {
                label: f.label.clone(),
                old: f.old_text.clone(),
                new: f.new_text.clone(),
                reformat: f.reformat,
            })
            .collect(),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "dslint";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    pub version: String,
    #[serde(rename = "$schema")]
    pub schema: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRule {
    pub id: String,
    #[serde(rename = "shortDescription")]
    pub short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    pub full_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    pub default_config: SarifRuleConfig,
    pub properties: SarifRuleProperties,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleConfig {
    pub level: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRuleProperties {
    pub category: String,
    pub priority: u8,
}

#[derive(Serialize, Deserialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<SarifFix>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
pub struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifact {
    pub uri: String,
}

#[derive(Serialize, Deserialize)]
pub struct SarifRegion {
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "startColumn")]
    pub start_column: usize,
    #[serde(rename = "endLine", skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(rename = "endColumn", skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifFix {
    pub description: SarifMessage,
    #[serde(rename = "artifactChanges")]
    pub artifact_changes: Vec<SarifArtifactChange>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifArtifactChange {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: SarifArtifact,
    pub replacements: Vec<SarifReplacement>,
}

#[derive(Serialize, Deserialize)]
pub struct SarifReplacement {
    #[serde(rename = "deletedRegion")]
    pub deleted_region: SarifRegion,
    #[serde(rename = "insertedContent")]
    pub inserted_content: SarifMessage,
}

fn map_severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

fn uri(file: &str) -> String {
    file.replace('\\', "/")
}

fn sarif_rule(issue: &Issue) -> SarifRule {
    SarifRule {
        id: issue.id.to_string(),
        short_description: SarifMessage {
            text: issue.brief.to_string(),
        },
        full_description: SarifMessage {
            text: issue.explanation.to_string(),
        },
        default_config: SarifRuleConfig {
            level: map_severity_to_level(issue.severity).to_string(),
        },
        properties: SarifRuleProperties {
            category: issue.category.to_string(),
            priority: issue.priority,
        },
    }
}

/// The opening brace is the first character of the lambda span.
fn sarif_fix(file: &str, fix: &ReplaceFix) -> SarifFix {
    SarifFix {
        description: SarifMessage {
            text: fix.label.clone(),
        },
        artifact_changes: vec![SarifArtifactChange {
            artifact_location: SarifArtifact { uri: uri(file) },
            replacements: vec![SarifReplacement {
                deleted_region: SarifRegion {
                    start_line: fix.range.start_line.max(1),
                    start_column: fix.range.start_col.max(1),
                    end_line: Some(fix.range.start_line.max(1)),
                    end_column: Some(fix.range.start_col.max(1) + fix.old_text.chars().count()),
                },
                inserted_content: SarifMessage {
                    text: fix.new_text.clone(),
                },
            }],
        }],
    }
}

/// Build the SARIF report structure.
pub fn sarif_report(result: &DetectionResult) -> SarifReport {
    let reported: BTreeSet<&str> = result.diagnostics.iter().map(|d| d.issue.as_str()).collect();
    let rules = detect::issues()
        .iter()
        .filter(|issue| reported.contains(issue.id))
        .map(|issue| sarif_rule(issue))
        .collect();

    let results = result
        .diagnostics
        .iter()
        .map(|d| SarifResult {
            rule_id: d.issue.clone(),
            level: map_severity_to_level(d.severity).to_string(),
            message: SarifMessage {
                text: d.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact { uri: uri(&d.file) },
                    region: SarifRegion {
                        start_line: d.span.start_line.max(1),
                        start_column: d.span.start_col.max(1),
                        end_line: (d.span.end_line > 0).then_some(d.span.end_line),
                        end_column: (d.span.end_col > 0).then_some(d.span.end_col),
                    },
                },
            }],
            fixes: fix_alternatives(d)
                .iter()
                .map(|f| sarif_fix(&d.file, f))
                .collect(),
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(result: &DetectionResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&sarif_report(result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, result: &DetectionResult, show_suppressed: bool) {
    println!();
    print!("  ");
    print!("{}", "dslint".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    println!();

    write_result_summary(result);
    println!();

    if !result.diagnostics.is_empty() {
        write_diagnostics(&result.diagnostics);
    }

    if !result.suppressed.is_empty() {
        write_suppressed_summary(&result.suppressed, show_suppressed);
        println!();
    }
}

fn write_result_summary(result: &DetectionResult) {
    if result.has_errors() {
        print!("  {}", "✗ FAIL".red());
    } else {
        print!("  {}", "✓ PASS".green());
    }

    print!(
        "  {} file(s), {} DSL lambda(s), {} issue(s)",
        result.scanned,
        result.lambdas_visited,
        result.diagnostics.len()
    );

    if !result.suppressed.is_empty() {
        print!(
            "  {}",
            format!("({} suppressed)", result.suppressed.len()).dimmed()
        );
    }
    println!();
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        write_severity_tag(d.severity);
        print!("   ");
        print!("{:<14}", d.issue.dimmed());
        print!("{}", d.file.blue());
        if d.span.start_line > 0 {
            print!("{}", format!(":{}", d.span).dimmed());
        }
        println!();

        println!("            {}", d.message);
        for fix in fix_alternatives(d) {
            println!("            {} {}", "fix:".green(), fix.label);
        }
        println!();
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
    }
}

fn write_suppressed_summary(suppressed: &[Diagnostic], show_details: bool) {
    println!("  {} ({}):", "Suppressed".dimmed(), suppressed.len());

    if !show_details {
        println!("    {}", "(use --show-suppressed to see details)".dimmed());
        return;
    }

    println!();
    for d in suppressed {
        print!("    {:<14}", d.issue.dimmed());
        print!("{}", d.file.blue());
        print!("{}", format!(":{}", d.span).dimmed());
        println!();
        println!("            {}", d.message.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Span;
    use crate::detect::{build_fix, MandatoryProperty, PropertyKind};

    fn result() -> DetectionResult {
        let properties = vec![
            MandatoryProperty {
                name: "host".to_string(),
                kind: PropertyKind::Property,
                group: Some("network".to_string()),
                message: None,
            },
            MandatoryProperty {
                name: "connect".to_string(),
                kind: PropertyKind::Function,
                group: Some("network".to_string()),
                message: None,
            },
        ];
        let span = Span::new(3, 14, 6, 2);
        let mut result = DetectionResult::new();
        result.scanned = 1;
        result.lambdas_visited = 1;
        result.add_diagnostic(Diagnostic {
            issue: "DSLMandatory".to_string(),
            severity: Severity::Error,
            file: "src\\Server.kt".to_string(),
            span,
            message: "\"network\" property must be defined".to_string(),
            fix: Some(build_fix(&properties, span)),
        });
        result
    }

    #[test]
    fn test_json_report() {
        let report = json_report("facts", &result());
        assert!(!report.passed);
        assert_eq!(report.diagnostics.len(), 1);
        let d = &report.diagnostics[0];
        assert_eq!(d.line, 3);
        assert_eq!(d.column, 14);
        assert_eq!(d.severity, "error");
        assert_eq!(d.fixes.len(), 2);
        assert_eq!(d.fixes[1].new, "{\nconnect{\n}");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("suppressed").is_none());
        assert_eq!(json["suppressed_count"], 0);
    }

    #[test]
    fn test_sarif_report() {
        let report = sarif_report(&result());
        let run = &report.runs[0];
        assert_eq!(run.tool.driver.rules.len(), 1);
        assert_eq!(run.tool.driver.rules[0].id, "DSLMandatory");
        assert_eq!(run.tool.driver.rules[0].properties.priority, 6);

        let r = &run.results[0];
        assert_eq!(r.level, "error");
        assert_eq!(
            r.locations[0].physical_location.artifact_location.uri,
            "src/Server.kt"
        );
        assert_eq!(r.fixes.len(), 2);
        let replacement = &r.fixes[0].artifact_changes[0].replacements[0];
        assert_eq!(replacement.deleted_region.start_column, 14);
        assert_eq!(replacement.deleted_region.end_column, Some(15));
        assert_eq!(replacement.inserted_content.text, "{\nhost = ");
    }

    #[test]
    fn test_sarif_without_diagnostics_has_no_rules() {
        let report = sarif_report(&DetectionResult::new());
        assert!(report.runs[0].tool.driver.rules.is_empty());
        assert!(report.runs[0].results.is_empty());
    }
}
