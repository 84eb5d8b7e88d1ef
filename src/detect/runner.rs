//! Detection runner: resolves DSL lambdas in fact documents and hands them to
//! the detector.

use anyhow::Context;
use globset::GlobSet;
use indexmap::IndexSet;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::analysis::{Annotated, AnnotationRef, ClassFact, ClassIndex, FactsDocument};
use crate::annotations::{extension, AnnotationNames};
use crate::config::{Config, ConfigError};

use super::{filter_suppressed, DetectionResult, MandatoryDetector};

/// Executes detection against a set of fact documents.
pub struct Runner {
    annotations: AnnotationNames,
    detector: MandatoryDetector,
    excluded: GlobSet,
    enabled: bool,
}

impl Runner {
    /// Create a runner from a validated configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let annotations = config.annotation_names();
        let mut detector = MandatoryDetector::new(annotations.clone());
        if let Some(severity) = config.severity {
            detector = detector.with_severity(severity);
        }
        let enabled = !config.is_disabled(detector.issue().id);
        Ok(Self {
            annotations,
            detector,
            excluded: config.excluded_matcher()?,
            enabled,
        })
    }

    /// Check every document in parallel. Documents that fail to load are
    /// logged and skipped.
    pub fn run(&self, files: &[PathBuf]) -> DetectionResult {
        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.check_file(path)))
            .collect();

        let mut result = DetectionResult::new();
        for (path, outcome) in results {
            match outcome {
                Ok(file_result) => result.merge(file_result),
                Err(e) => tracing::warn!(path = %path.display(), "skipping fact document: {:#}", e),
            }
        }
        result.sort();
        result
    }

    /// Load and check a single fact document.
    pub fn check_file(&self, path: &Path) -> anyhow::Result<DetectionResult> {
        let document = FactsDocument::parse_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        let mut result = self.check_document(&document, &path.to_string_lossy());
        result.scanned = 1;
        Ok(result)
    }

    /// Check all lambdas of a document. `default_file` names lambdas that do
    /// not carry their own `file`.
    pub fn check_document(&self, document: &FactsDocument, default_file: &str) -> DetectionResult {
        let mut result = DetectionResult::new();
        if !self.enabled {
            return result;
        }

        let index = ClassIndex::new(&document.classes);
        for lambda in &document.lambdas {
            let node = lambda.node(default_file);
            if self.excluded.is_match(node.file) {
                tracing::debug!(file = node.file, "lambda excluded by configuration");
                continue;
            }
            if !self.is_dsl_root(&index, &lambda.receiver) {
                tracing::debug!(
                    file = node.file,
                    receiver = %lambda.receiver,
                    "receiver is not a DSL root"
                );
                continue;
            }
            let Some(class) = index.resolve(&lambda.receiver) else {
                continue;
            };

            result.lambdas_visited += 1;
            let diagnostics = self.detector.visit_lambda(node, &class);
            let (active, suppressed) = filter_suppressed(diagnostics, &lambda.suppress);
            result.diagnostics.extend(active);
            result.suppressed.extend(suppressed);
        }
        result
    }

    /// A class is a DSL root if it carries `@DSLint`, or carries
    /// `@DSLExtension` whose `extensionFor` is itself a DSL root.
    pub fn is_dsl_root(&self, index: &ClassIndex<'_>, class_name: &str) -> bool {
        let mut visiting = IndexSet::new();
        index
            .get(class_name)
            .is_some_and(|class| self.is_dsl_root_inner(index, class, &mut visiting))
    }

    fn is_dsl_root_inner<'n>(
        &self,
        index: &ClassIndex<'n>,
        class: &'n ClassFact,
        visiting: &mut IndexSet<&'n str>,
    ) -> bool {
        if !visiting.insert(class.name.as_str()) {
            return false;
        }
        if class.has_annotation(&self.annotations.dslint) {
            return true;
        }
        class
            .annotation(&self.annotations.extension)
            .and_then(|a| a.string_attribute(extension::EXTENSION_FOR))
            .and_then(|target| index.get(target))
            .is_some_and(|parent| self.is_dsl_root_inner(index, parent, visiting))
    }
}
