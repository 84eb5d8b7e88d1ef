//! The symbol and syntax model the detector runs against.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Front end       │────▶│ Fact docs    │────▶│ ClassIndex    │
//! │ (lint engine)   │     │ (YAML/JSON)  │     │ + LambdaNodes │
//! └─────────────────┘     └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌───────────────┐
//!                                              │ Detection     │
//!                                              │ (DslClass,    │
//!                                              │  Statement)   │
//!                                              └───────────────┘
//! ```
//!
//! Detection code depends only on the traits in [`traits`] and the closed
//! [`Statement`] variant, never on the document types directly.

mod facts;
mod model;
mod naming;
mod traits;

pub use facts::{
    AnnotationFact, ClassFact, ClassIndex, FactsDocument, FactsError, FactsFormat, LambdaFact,
    MethodFact, ResolvedClass,
};
pub use model::{AssignTarget, LambdaNode, Span, Statement};
pub use naming::{BeanNaming, PropertyNaming};
pub use traits::{Annotated, AnnotationRef, DslClass, DslMethod};
