//! Tests for the JSON and SARIF output structures.

use std::path::PathBuf;

use dslint::config::Config;
use dslint::detect::{DetectionResult, Runner};
use dslint::report::{json_report, sarif_report};

fn run_single(name: &str) -> DetectionResult {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    let runner = Runner::new(&Config::default()).unwrap();
    let mut result = runner.check_file(&path).expect("detection should succeed");
    result.sort();
    result
}

#[test]
fn test_json_report_structure() {
    let result = run_single("client.dslint.json");
    let report = json_report("testdata/client.dslint.json", &result);

    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    assert!(!report.passed);
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.lambdas_visited, 1);
    assert_eq!(report.diagnostics.len(), 1);

    let json = serde_json::to_value(&report).unwrap();
    let d = &json["diagnostics"][0];
    assert_eq!(d["issue"], "DSLMandatory");
    assert_eq!(d["severity"], "error");
    assert_eq!(d["file"], "src/Client.kt");
    assert_eq!(d["line"], 5);
    assert_eq!(d["column"], 12);
    assert_eq!(d["message"], "\"endpoint\" property must be defined");
    assert_eq!(d["fixes"][0]["label"], "Define \"endpoint\" property");
    assert_eq!(d["fixes"][0]["old"], "{");
    assert_eq!(d["fixes"][0]["reformat"], true);
}

#[test]
fn test_json_report_lists_suppressed() {
    let result = run_single("server.dslint.yaml");
    let report = json_report("testdata/server.dslint.yaml", &result);

    assert_eq!(report.suppressed_count, 3);
    assert_eq!(report.suppressed.len(), 3);
    assert_eq!(report.diagnostics.len(), 4);
}

#[test]
fn test_sarif_report_structure() {
    let result = run_single("server.dslint.yaml");
    let json = serde_json::to_value(sarif_report(&result)).unwrap();

    assert_eq!(json["version"], "2.1.0");
    assert!(json["$schema"].as_str().unwrap().contains("sarif-schema-2.1.0"));

    let run = &json["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "dslint");
    assert_eq!(run["tool"]["driver"]["rules"][0]["id"], "DSLMandatory");
    assert_eq!(
        run["tool"]["driver"]["rules"][0]["defaultConfiguration"]["level"],
        "error"
    );

    let results = run["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    let first = &results[0];
    assert_eq!(first["ruleId"], "DSLMandatory");
    assert_eq!(
        first["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
        "src/Empty.kt"
    );
    assert_eq!(
        first["locations"][0]["physicalLocation"]["region"]["startLine"],
        3
    );
    assert_eq!(
        first["fixes"][0]["artifactChanges"][0]["replacements"][0]["insertedContent"]["text"],
        "{\ntimeout = "
    );
}
