//! Immutable diagnostic messages with a severity, summary, and optional detail.

use crate::severity::Severity;
use serde::Serialize;

/// A single reportable problem.
///
/// Diagnostics produced by the CLI are never tied to a configuration source
/// location, so every value of this type is sourceless. Fields are private and
/// there are no setters: once built, a diagnostic does not change. Operations
/// that need a different diagnostic (such as warning consolidation) build a
/// new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    similar: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Diagnostic {
    /// Creates a sourceless diagnostic.
    ///
    /// # Panics
    ///
    /// Panics if `summary` is empty. A diagnostic without a summary is a
    /// programming error at the call site, not a user-facing condition.
    pub fn sourceless(
        severity: Severity,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        let summary = summary.into();
        assert!(!summary.is_empty(), "diagnostic summary must not be empty");
        let detail = detail.into();
        Self {
            severity,
            summary,
            detail: (!detail.is_empty()).then_some(detail),
            similar: 0,
        }
    }

    /// Creates an error diagnostic with the given summary and detail.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::sourceless(Severity::Error, summary, detail)
    }

    /// Creates a warning diagnostic with the given summary and detail.
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::sourceless(Severity::Warning, summary, detail)
    }

    /// The severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The short, one-line description of the problem.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The longer explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Number of similar warnings folded into this one by consolidation.
    pub fn similar(&self) -> usize {
        self.similar
    }

    /// Total number of occurrences this diagnostic stands for (itself plus
    /// everything it absorbed).
    pub fn occurrences(&self) -> usize {
        self.similar + 1
    }

    /// Returns a copy of this diagnostic that represents `similar` additional
    /// occurrences.
    pub(crate) fn representing(&self, similar: usize) -> Self {
        Self {
            similar: self.similar + similar,
            ..self.clone()
        }
    }
}
