use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum number of diagnostics stored by a [`Diagnostics`] list.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Name,
    Arithmetic,
    Structure,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Name => write!(f, "name"),
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// Numeric error code (E100–E499).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const INVALID_SYNTAX: Self = Self(100);
    pub const INVALID_IF_SYNTAX: Self = Self(101);
    pub const UNKNOWN_STATEMENT: Self = Self(102);
    pub const UNSUPPORTED_STANDALONE_IF: Self = Self(103);
    pub const UNSUPPORTED_CONDITION: Self = Self(104);
    pub const INVALID_EXPRESSION: Self = Self(105);

    // ── Name errors (E200–E299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);

    // ── Arithmetic errors (E300–E399) ──
    pub const DIVISION_BY_ZERO: Self = Self(300);
    pub const INTEGER_OVERFLOW: Self = Self(301);

    // ── Structure errors (E400–E499) ──
    pub const NESTING_TOO_DEEP: Self = Self(400);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            200..=299 => ErrorCategory::Name,
            300..=399 => ErrorCategory::Arithmetic,
            400..=499 => ErrorCategory::Structure,
            _ => ErrorCategory::Syntax, // fallback
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum ExprFault {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("unexpected '{found}' at column {column}")]
    UnexpectedToken { found: String, column: u32 },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("empty expression")]
    Empty,

    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: u32 },
}

/// Every way a Tally program can fail.
///
/// Each variant carries the offending text so a single line of output is
/// enough to explain the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TallyError {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("invalid expression '{expr}': {cause}")]
    InvalidExpression {
        expr: String,
        #[source]
        cause: ExprFault,
    },

    #[error("unsupported condition '{condition}': expected one of == != >= <= > <")]
    UnsupportedCondition { condition: String },

    #[error("invalid syntax '{line}': expected 'let <name> = <expression>'")]
    InvalidSyntax { line: String },

    #[error("'if' is only valid as a block header: '{line}'")]
    UnsupportedStandaloneIf { line: String },

    #[error("unknown statement '{line}'")]
    UnknownStatement { line: String },

    #[error("invalid if syntax '{line}': expected 'if <condition>:'")]
    InvalidIfSyntax { line: String },

    #[error("blocks nested deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}

impl TallyError {
    /// Wrap an expression fault together with the expression text.
    pub fn invalid_expression(expr: impl Into<String>, cause: ExprFault) -> Self {
        Self::InvalidExpression {
            expr: expr.into(),
            cause,
        }
    }

    /// The stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UndefinedVariable { .. } => ErrorCode::UNDEFINED_VARIABLE,
            Self::InvalidExpression { cause, .. } => match cause {
                ExprFault::DivisionByZero => ErrorCode::DIVISION_BY_ZERO,
                ExprFault::Overflow => ErrorCode::INTEGER_OVERFLOW,
                _ => ErrorCode::INVALID_EXPRESSION,
            },
            Self::UnsupportedCondition { .. } => ErrorCode::UNSUPPORTED_CONDITION,
            Self::InvalidSyntax { .. } => ErrorCode::INVALID_SYNTAX,
            Self::UnsupportedStandaloneIf { .. } => ErrorCode::UNSUPPORTED_STANDALONE_IF,
            Self::UnknownStatement { .. } => ErrorCode::UNKNOWN_STATEMENT,
            Self::InvalidIfSyntax { .. } => ErrorCode::INVALID_IF_SYNTAX,
            Self::NestingTooDeep { .. } => ErrorCode::NESTING_TOO_DEEP,
        }
    }
}

/// A positioned error, ready to be rendered or serialized.
///
/// The presenter renders these directly; it never has to parse messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code (e.g., E105).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Source location.
    #[serde(flatten)]
    pub span: Span,
    /// The raw program line for context.
    pub source_line: String,
    /// The structured error.
    pub error: TallyError,
}

impl Diagnostic {
    /// Create a diagnostic for `error` raised at `span`.
    pub fn new(error: TallyError, span: Span, source_line: impl Into<String>) -> Self {
        let code = error.code();
        Self {
            code,
            category: code.category(),
            message: error.to_string(),
            span,
            source_line: source_line.into(),
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error[{}]: line {}: {}",
            self.code, self.span.start_line, self.message
        )
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// A bounded list of diagnostics, as produced by a whole-program check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub total_errors: usize,
}

impl Diagnostics {
    /// Create an empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: Diagnostic) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }
}
