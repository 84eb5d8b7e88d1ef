//! Fact documents: the symbol and lambda facts a front end emits per file.
//!
//! A document is YAML or JSON and looks like:
//!
//! ```yaml
//! classes:
//!   - name: ServerConfig
//!     supertypes: [BaseConfig]
//!     annotations:
//!       - name: com.hananrh.dslint.annotations.DSLint
//!     methods:
//!       - name: setTimeout
//!         annotations:
//!           - name: com.hananrh.dslint.annotations.DSLMandatory
//!             attributes: { group: limits }
//! lambdas:
//!   - file: src/Server.kt
//!     receiver: ServerConfig
//!     span: { start_line: 3, start_col: 14, end_line: 6, end_col: 2 }
//!     statements:
//!       - kind: assignment
//!         target: timeout
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::model::{LambdaNode, Span, Statement};
use super::traits::{Annotated, AnnotationRef, DslClass, DslMethod};

/// Errors raised while loading fact documents.
#[derive(Error, Debug)]
pub enum FactsError {
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {}: {}", .path.display(), .source)]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {}: {}", .path.display(), .source)]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported fact document: {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Serialization format of a fact document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactsFormat {
    Yaml,
    Json,
}

impl FactsFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(FactsFormat::Yaml),
            Some("json") => Some(FactsFormat::Json),
            _ => None,
        }
    }
}

/// An annotation as recorded by the front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationFact {
    pub name: String,
    #[serde(default)]
    pub attributes: IndexMap<String, serde_json::Value>,
}

impl AnnotationRef for AnnotationFact {
    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn string_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }
}

fn find_annotation<'a>(
    annotations: &'a [AnnotationFact],
    qualified_name: &str,
) -> Option<&'a AnnotationFact> {
    annotations
        .iter()
        .find(|a| a.qualified_name() == qualified_name)
}

/// A method symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodFact {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationFact>,
}

impl Annotated for MethodFact {
    type Annotation = AnnotationFact;

    fn annotation(&self, qualified_name: &str) -> Option<&AnnotationFact> {
        find_annotation(&self.annotations, qualified_name)
    }
}

impl DslMethod for MethodFact {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A class symbol with its declared methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassFact {
    pub name: String,
    /// Direct supertypes, nearest first.
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationFact>,
    #[serde(default)]
    pub methods: Vec<MethodFact>,
}

impl Annotated for ClassFact {
    type Annotation = AnnotationFact;

    fn annotation(&self, qualified_name: &str) -> Option<&AnnotationFact> {
        find_annotation(&self.annotations, qualified_name)
    }
}

/// A lambda literal together with its resolved receiver type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LambdaFact {
    /// Source file; defaults to the document path when empty.
    #[serde(default)]
    pub file: String,
    /// Name of the receiver class.
    pub receiver: String,
    #[serde(default)]
    pub span: Span,
    /// Issue ids suppressed on this lambda.
    #[serde(default)]
    pub suppress: Vec<String>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl LambdaFact {
    pub fn node<'a>(&'a self, default_file: &'a str) -> LambdaNode<'a> {
        LambdaNode {
            file: if self.file.is_empty() {
                default_file
            } else {
                &self.file
            },
            span: self.span,
            body: &self.statements,
        }
    }
}

/// Top-level fact document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactsDocument {
    #[serde(default)]
    pub classes: Vec<ClassFact>,
    #[serde(default)]
    pub lambdas: Vec<LambdaFact>,
}

impl FactsDocument {
    /// Parse a fact document, choosing the format from the file extension.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, FactsError> {
        let path = path.as_ref();
        let format = FactsFormat::from_path(path)
            .ok_or_else(|| FactsError::UnsupportedFormat(path.to_path_buf()))?;
        let content = fs::read_to_string(path).map_err(|source| FactsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content, format, path)
    }

    /// Parse document content. `path` is only used for error messages.
    pub fn parse_str(content: &str, format: FactsFormat, path: &Path) -> Result<Self, FactsError> {
        match format {
            FactsFormat::Yaml if content.trim().is_empty() => Ok(Self::default()),
            FactsFormat::Yaml => serde_yaml::from_str(content).map_err(|source| FactsError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            FactsFormat::Json => serde_json::from_str(content).map_err(|source| FactsError::Json {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Class lookup by name for a single document.
pub struct ClassIndex<'a> {
    classes: IndexMap<&'a str, &'a ClassFact>,
}

impl<'a> ClassIndex<'a> {
    /// Index the classes of a document. Later duplicates of a name are ignored.
    pub fn new(classes: &'a [ClassFact]) -> Self {
        let mut map = IndexMap::with_capacity(classes.len());
        for class in classes {
            map.entry(class.name.as_str()).or_insert(class);
        }
        Self { classes: map }
    }

    pub fn get(&self, name: &str) -> Option<&'a ClassFact> {
        self.classes.get(name).copied()
    }

    /// Resolve a class and its full method set.
    pub fn resolve(&self, name: &str) -> Option<ResolvedClass<'a>> {
        let fact = self.get(name)?;
        Some(ResolvedClass {
            fact,
            methods: self.collect_methods(fact),
        })
    }

    /// Declared methods first, then inherited ones depth-first through
    /// `supertypes`. Redeclared methods are kept alongside the inherited ones;
    /// consumers pick the first occurrence of a name they care about.
    fn collect_methods(&self, root: &'a ClassFact) -> Vec<&'a MethodFact> {
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut methods = Vec::new();
        self.walk(root, &mut visited, &mut methods);
        methods
    }

    fn walk(
        &self,
        class: &'a ClassFact,
        visited: &mut IndexSet<&'a str>,
        methods: &mut Vec<&'a MethodFact>,
    ) {
        if !visited.insert(class.name.as_str()) {
            return;
        }

        methods.extend(class.methods.iter());

        for supertype in &class.supertypes {
            match self.get(supertype) {
                Some(parent) => self.walk(parent, visited, methods),
                None => tracing::trace!(class = %class.name, %supertype, "supertype not in document"),
            }
        }
    }
}

/// A class paired with its declared and inherited methods.
#[derive(Debug, Clone)]
pub struct ResolvedClass<'a> {
    fact: &'a ClassFact,
    methods: Vec<&'a MethodFact>,
}

impl Annotated for ResolvedClass<'_> {
    type Annotation = AnnotationFact;

    fn annotation(&self, qualified_name: &str) -> Option<&AnnotationFact> {
        self.fact.annotation(qualified_name)
    }
}

impl DslClass for ResolvedClass<'_> {
    type Method = MethodFact;

    fn name(&self) -> &str {
        &self.fact.name
    }

    fn all_methods(&self) -> Vec<&MethodFact> {
        self.methods.clone()
    }
}
