//! Capabilities the detector consumes from the host's symbol model.
//!
//! The detection logic only ever talks to these traits. The fact documents in
//! [`super::facts`] implement them, and an embedding lint engine can implement
//! them over its own symbol tables.

/// An annotation instance attached to a class or method.
pub trait AnnotationRef {
    /// The annotation's fully-qualified name.
    fn qualified_name(&self) -> &str;

    /// Value of a string attribute.
    ///
    /// Returns `None` when the attribute is absent or is not a string.
    fn string_attribute(&self, key: &str) -> Option<&str>;
}

/// Something annotations can be attached to.
pub trait Annotated {
    type Annotation: AnnotationRef;

    /// Look up an attached annotation by fully-qualified name.
    fn annotation(&self, qualified_name: &str) -> Option<&Self::Annotation>;

    fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotation(qualified_name).is_some()
    }
}

/// A method symbol.
pub trait DslMethod: Annotated {
    fn name(&self) -> &str;
}

/// A resolved class-like symbol.
pub trait DslClass: Annotated {
    type Method: DslMethod;

    fn name(&self) -> &str;

    /// Declared and inherited methods, in a deterministic order.
    fn all_methods(&self) -> Vec<&Self::Method>;
}
