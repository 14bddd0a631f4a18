//! Developer-visible diagnostics produced while normalizing raw specs.
//!
//! Normalization never rejects input; every field it has to correct is
//! reported as a [`Diagnostic`] alongside the canonical config and mirrored
//! through `log::warn!` so misconfigured reveals are visible during
//! development without breaking the page in production.

use std::fmt;

use serde::Serialize;

/// What kind of correction was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A keyword did not match any known value and the default was used.
    UnknownKeyword,
    /// A keyword the family structurally needs was absent and defaulted.
    MissingKeyword,
    /// A field was supplied on a family that does not use it.
    IgnoredField,
    /// A numeric value was clamped into its documented range.
    OutOfRange,
    /// An expression failed to parse and the default was substituted.
    MalformedExpression,
    /// Two fields contradicted each other and one was neutralized.
    Contradiction,
}

impl DiagnosticKind {
    fn label(&self) -> &'static str {
        match self {
            Self::UnknownKeyword => "unknown keyword",
            Self::MissingKeyword => "missing keyword",
            Self::IgnoredField => "ignored field",
            Self::OutOfRange => "out of range",
            Self::MalformedExpression => "malformed expression",
            Self::Contradiction => "contradiction",
        }
    }
}

/// One corrected field, with enough detail to fix the authored spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The spec field the correction applies to.
    pub field: &'static str,
    /// The category of correction.
    pub kind: DiagnosticKind,
    /// Human-readable explanation including the offending value.
    pub detail: String,
}

impl Diagnostic {
    pub(crate) fn new(field: &'static str, kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        let diag = Self {
            field,
            kind,
            detail: detail.into(),
        };
        log::warn!("reveal config `{}`: {} ({})", diag.field, diag.detail, diag.kind.label());
        diag
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {} ({})", self.field, self.detail, self.kind.label())
    }
}
