//! Validation diagnostics.
//!
//! Extraction never aborts on an invalid member: the member is excluded and
//! a diagnostic with a fixed code and message is recorded instead. Reporting
//! any error-severity diagnostic fails the host build without blocking
//! generation for the remaining members.

use serde::{Deserialize, Serialize};

use crate::shared::models::Span;

/// Fixed diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// An event delegate declares a non-void return type.
    Hqipc01,
    /// A member name collides with another member's derived identifiers.
    Hqipc02,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::Hqipc01 => "HQIPC01",
            DiagnosticCode::Hqipc02 => "HQIPC02",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

/// One validation failure, bound to the offending declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn non_void_event_delegate(span: Span) -> Self {
        Self {
            code: DiagnosticCode::Hqipc01,
            severity: Severity::Error,
            span,
            message: "an event delegate used for this channel cannot carry a return value"
                .to_string(),
        }
    }

    pub fn member_name_collision(span: Span) -> Self {
        Self {
            code: DiagnosticCode::Hqipc02,
            severity: Severity::Error,
            span,
            message: "a member name collides with another member's derived identifiers on this interface"
                .to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Port through which the pipeline surfaces diagnostics to the host build.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Collects reported diagnostics; the test-side sink.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Whether the build as a whole must fail.
    pub fn build_failed(&self) -> bool {
        self.error_count() > 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

/// Logs each diagnostic through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        tracing::error!(
            code = diagnostic.code.as_str(),
            line = diagnostic.span.start_line,
            col = diagnostic.span.start_col,
            "{}",
            diagnostic.message
        );
    }
}
