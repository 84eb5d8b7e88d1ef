//! dslint - mandatory property checks for builder-style DSL lambdas.
//!
//! Kotlin-style DSLs configure a receiver object inside a lambda:
//!
//! ```kotlin
//! server {
//!     host = "localhost"
//!     enableLogging()
//! }
//! ```
//!
//! Setters and functions of the receiver class annotated with `@DSLMandatory`
//! must be used in every such lambda. dslint reports each lambda that leaves a
//! mandatory property (or every member of a mandatory group) unset, together
//! with quick fixes inserting a stub.
//!
//! # Architecture
//!
//! - `annotations`: fully-qualified names and attribute keys of the markers
//! - `analysis`: symbol capabilities, the statement model and fact documents
//! - `detect`: the mandatory-property detector, fixes, suppression, runner
//! - `config`: `dslint.yaml` configuration
//! - `report`: output formatting (pretty, JSON, SARIF)
//!
//! An embedding lint engine implements [`analysis::DslClass`] for its own
//! symbols and calls [`MandatoryDetector::visit_lambda`] directly; the CLI
//! instead reads fact documents produced by a front end.

pub mod analysis;
pub mod annotations;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;

pub use analysis::{ClassIndex, FactsDocument, LambdaNode, Span, Statement};
pub use annotations::{AnnotationNames, DslAnnotation};
pub use config::Config;
pub use detect::{DetectionResult, Diagnostic, LintFix, MandatoryDetector, Runner, Severity};
