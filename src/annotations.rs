//! Marker registry for the dslint annotations.
//!
//! DSL authors tag their builder classes and setters with these annotations.
//! Only the fully-qualified names and attribute keys live here; reading the
//! markers off a class or method goes through [`crate::analysis::Annotated`].

/// Package the annotation library ships in.
pub const DEFAULT_PACKAGE: &str = "com.hananrh.dslint.annotations";

/// The markers understood by dslint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DslAnnotation {
    /// Class-level marker identifying a DSL root.
    DsLint,
    /// Method-level marker for a property that must be set inside the lambda.
    DslMandatory,
    /// Class-level marker for a class extending another DSL root.
    DslExtension,
}

impl DslAnnotation {
    /// Simple (unqualified) annotation name.
    pub fn simple_name(&self) -> &'static str {
        match self {
            DslAnnotation::DsLint => "DSLint",
            DslAnnotation::DslMandatory => "DSLMandatory",
            DslAnnotation::DslExtension => "DSLExtension",
        }
    }

    /// Fully-qualified name under the given package.
    pub fn qualified_name(&self, package: &str) -> String {
        format!("{}.{}", package, self.simple_name())
    }

    /// Fully-qualified name under [`DEFAULT_PACKAGE`].
    pub fn name(&self) -> String {
        self.qualified_name(DEFAULT_PACKAGE)
    }
}

/// Attribute keys of `@DSLMandatory`.
pub mod mandatory {
    pub const GROUP: &str = "group";
    pub const MESSAGE: &str = "message";
}

/// Attribute keys of `@DSLExtension`.
pub mod extension {
    pub const EXTENSION_FOR: &str = "extensionFor";
}

/// Resolves annotation names for one configured package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationNames {
    pub dslint: String,
    pub mandatory: String,
    pub extension: String,
}

impl AnnotationNames {
    pub fn new(package: &str) -> Self {
        Self {
            dslint: DslAnnotation::DsLint.qualified_name(package),
            mandatory: DslAnnotation::DslMandatory.qualified_name(package),
            extension: DslAnnotation::DslExtension.qualified_name(package),
        }
    }

    pub fn get(&self, annotation: DslAnnotation) -> &str {
        match annotation {
            DslAnnotation::DsLint => &self.dslint,
            DslAnnotation::DslMandatory => &self.mandatory,
            DslAnnotation::DslExtension => &self.extension,
        }
    }
}

impl Default for AnnotationNames {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE)
    }
}
