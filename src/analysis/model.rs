//! Syntax shapes handed to the detector.
//!
//! Front ends lower their native lambda bodies into the closed [`Statement`]
//! variant before detection runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span with line/column positions (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    #[serde(default)]
    pub end_line: usize,
    #[serde(default)]
    pub end_col: usize,
}

impl Span {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignTarget {
    /// A bare identifier, e.g. `timeout = 30`.
    Identifier(String),
    /// Anything else, e.g. `other.timeout = 30` or `values[0] = 1`.
    Expression { expression: String },
}

impl AssignTarget {
    /// The referenced name when the target is a simple identifier.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            AssignTarget::Identifier(name) => Some(name),
            AssignTarget::Expression { .. } => None,
        }
    }
}

/// One top-level statement of a lambda body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Property-style assignment.
    Assignment { target: AssignTarget },
    /// Direct call of a named function.
    Call { name: String },
    /// Nested control flow (`if`, `for`, nested lambdas, ...).
    Block {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        statements: Vec<Statement>,
    },
    /// Any other expression.
    Other {
        #[serde(default)]
        text: Option<String>,
    },
}

impl Statement {
    pub fn assign(name: &str) -> Self {
        Statement::Assignment {
            target: AssignTarget::Identifier(name.to_string()),
        }
    }

    pub fn call(name: &str) -> Self {
        Statement::Call {
            name: name.to_string(),
        }
    }
}

/// A lambda whose receiver resolved to a DSL root.
#[derive(Debug, Clone, Copy)]
pub struct LambdaNode<'a> {
    /// File the lambda lives in.
    pub file: &'a str,
    /// Span of the whole lambda, braces included.
    pub span: Span,
    /// Top-level statements of the body.
    pub body: &'a [Statement],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_yaml_shapes() {
        let yaml = r#"
- kind: assignment
  target: timeout
- kind: assignment
  target:
    expression: other.port
- kind: call
  name: enableLogging
- kind: block
  label: if
  statements:
    - kind: assignment
      target: host
- kind: other
"#;
        let statements: Vec<Statement> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(statements.len(), 5);
        assert_eq!(statements[0], Statement::assign("timeout"));
        match &statements[1] {
            Statement::Assignment { target } => assert_eq!(target.identifier(), None),
            other => panic!("expected assignment, got {:?}", other),
        }
        assert_eq!(statements[2], Statement::call("enableLogging"));
        match &statements[3] {
            Statement::Block { label, statements } => {
                assert_eq!(label.as_deref(), Some("if"));
                assert_eq!(statements.len(), 1);
            }
            other => panic!("expected block, got {:?}", other),
        }
        assert_eq!(statements[4], Statement::Other { text: None });
    }

    #[test]
    fn test_statement_json_shapes() {
        let json = r#"[{"kind":"call","name":"doOther"},{"kind":"assignment","target":"port"}]"#;
        let statements: Vec<Statement> = serde_json::from_str(json).unwrap();
        assert_eq!(statements, vec![Statement::call("doOther"), Statement::assign("port")]);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(12, 5, 15, 2).to_string(), "12:5");
    }
}
