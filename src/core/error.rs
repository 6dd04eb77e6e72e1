use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rules::Rule;

/// Errors that can occur while reading, building or writing an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// Malformed XML reported by the tokenizer, or an unexpected document structure.
    #[error("XML error: {0}")]
    Xml(String),

    /// A numeric element did not hold a decimal number.
    #[error("invalid decimal value {value:?} in {element}")]
    InvalidDecimal { element: String, value: String },

    /// A date element did not match the syntax's date format.
    #[error("invalid date value {value:?} in {element}")]
    InvalidDate { element: String, value: String },

    /// An embedded attachment was not valid base64.
    #[error("invalid base64 content in {element}")]
    InvalidBase64 { element: String },

    /// The root element is neither a CII invoice nor a UBL invoice or credit note.
    #[error("unsupported document: root element {{{namespace}}}{name}")]
    UnsupportedDocument { namespace: String, name: String },

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The invoice violates one or more business rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A single business-rule violation: the rule that failed and a message
/// describing the concrete values involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    pub text: String,
}

impl Violation {
    pub fn new(rule: Rule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: text.into(),
        }
    }

    /// Rule code, e.g. `BR-CO-10`.
    pub fn code(&self) -> &'static str {
        self.rule.code
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule.code, self.text)
    }
}

/// Every violation found by one validation run, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// True if any violation carries the given rule code.
    pub fn has_rule_code(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.rule.code == code)
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invoice violates {} business rule(s)",
            self.violations.len()
        )?;
        for v in &self.violations {
            write!(f, "\n  {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
