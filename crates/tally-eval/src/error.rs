//! Runtime error types for the Tally evaluator.

use tally_types::{Diagnostic, SourceLines, Span, TallyError};
use thiserror::Error;

/// An error raised while running a block, with the span of the node that
/// raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {error}", line = .span.start_line)]
pub struct RunError {
    pub error: TallyError,
    pub span: Span,
}

impl RunError {
    pub fn new(error: TallyError, span: Span) -> Self {
        Self { error, span }
    }

    /// Attach the raw source line and turn the error into a diagnostic.
    pub fn into_diagnostic(self, source: &SourceLines) -> Diagnostic {
        let source_line = source.line(self.span.start_line).unwrap_or("");
        Diagnostic::new(self.error, self.span, source_line)
    }
}

impl From<RunError> for TallyError {
    fn from(err: RunError) -> Self {
        err.error
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, RunError>;
