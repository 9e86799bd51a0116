//! Tally parser: converts program lines into a block tree.
//!
//! ```text
//! lines → LineRef → BlockBuilder → Program { Block { Let | If | Invalid } }
//! ```
//!
//! Parsing never fails as a whole. Malformed lines are kept in the tree as
//! [`Node::Invalid`](tally_types::ast::Node::Invalid) so that errors surface
//! in execution order, and malformed expressions are kept as
//! [`OperandKind::Malformed`](tally_types::ast::OperandKind::Malformed).

mod check;
mod line;
mod parse_block;
mod parse_expr;
mod parse_stmt;
mod parser;

pub use check::check_program;
pub use line::LineRef;
pub use parse_block::BlockBuilder;
pub use parser::{ParseLimits, DEFAULT_MAX_EXPR_DEPTH, DEFAULT_MAX_NESTING_DEPTH};

use tally_types::ast::{Condition, LetStmt, Operand, Program};
use tally_types::{Diagnostics, SourceLines};

/// Parse a whole program into its block tree.
pub fn parse_program<S: AsRef<str>>(lines: &[S], limits: &ParseLimits) -> Program {
    let numbered = LineRef::number_all(lines);
    BlockBuilder::new(*limits).build(&numbered)
}

/// Parse a whole program and report every problem visible without running it.
pub fn check<S: AsRef<str>>(lines: &[S], limits: &ParseLimits) -> Diagnostics {
    let program = parse_program(lines, limits);
    check_program(&program, &SourceLines::new(lines))
}

/// Parse one non-block line as a statement.
pub fn parse_statement(line: &str, limits: &ParseLimits) -> tally_types::Result<LetStmt> {
    parse_stmt::parse_statement(&LineRef::new(1, line), limits)
}

/// Parse a condition such as `x + 1 >= y`.
pub fn parse_condition(text: &str, limits: &ParseLimits) -> tally_types::Result<Condition> {
    parse_stmt::parse_condition_at(text, 1, 0, limits)
}

/// Parse an arithmetic expression. Never fails: a malformed expression is
/// returned as [`OperandKind::Malformed`](tally_types::ast::OperandKind::Malformed).
pub fn parse_expression(text: &str, limits: &ParseLimits) -> Operand {
    parse_stmt::parse_operand_at(text, 1, 0, limits)
}
