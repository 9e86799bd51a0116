//! Shared types for the Tally interpreter.
//!
//! This crate defines the AST node types, source spans, error types,
//! and diagnostics used across the lexer, parser and evaluator.

mod error;
mod span;
pub mod ast;

pub use error::{
    Diagnostic, Diagnostics, ErrorCategory, ErrorCode, ExprFault, TallyError, MAX_ERRORS,
};
pub use span::{SourceLines, Span};

/// Result type used throughout the Tally interpreter.
pub type Result<T> = std::result::Result<T, TallyError>;
