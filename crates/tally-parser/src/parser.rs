//! Core parser infrastructure: limits, token cursor, fault helpers.

use tally_lexer::token::{Token, TokenKind};
use tally_types::ExprFault;

/// Default maximum depth of nested `if` blocks.
pub const DEFAULT_MAX_NESTING_DEPTH: u32 = 64;

/// Default maximum depth of nested parentheses and unary operators.
pub const DEFAULT_MAX_EXPR_DEPTH: u32 = 64;

/// Structural limits that keep parsing and execution off the host stack's
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// How many `if` blocks may nest inside one another.
    pub max_nesting_depth: u32,
    /// How deeply an expression may nest.
    pub max_expr_depth: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_expr_depth: DEFAULT_MAX_EXPR_DEPTH,
        }
    }
}

/// Expression parser over the tokens of a single operand.
///
/// The token slice does not include the trailing `Eol`; running off the
/// end reads as `Eol`.
pub(crate) struct Parser<'t> {
    /// The operand's tokens.
    tokens: &'t [Token],
    /// Current index into `tokens`.
    pos: usize,
    /// Current expression nesting depth.
    pub(crate) expr_depth: u32,
    /// Maximum expression nesting depth.
    pub(crate) max_expr_depth: u32,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token], limits: &ParseLimits) -> Self {
        Self {
            tokens,
            pos: 0,
            expr_depth: 0,
            max_expr_depth: limits.max_expr_depth,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token, if any remain.
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        self.peek().map_or(&TokenKind::Eol, |t| &t.kind)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Returns `true` once every token has been consumed.
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── Faults ────────────────────────────────────────────────────────────────

    /// The fault describing the current token as out of place.
    pub(crate) fn unexpected(&self) -> ExprFault {
        match self.peek() {
            Some(token) => ExprFault::UnexpectedToken {
                found: token.kind.to_string(),
                column: token.span.start_col,
            },
            None => ExprFault::UnexpectedEnd,
        }
    }

    /// Enter one level of expression nesting.
    pub(crate) fn descend(&mut self) -> Result<(), ExprFault> {
        self.expr_depth += 1;
        if self.expr_depth > self.max_expr_depth {
            Err(ExprFault::TooDeep {
                limit: self.max_expr_depth,
            })
        } else {
            Ok(())
        }
    }

    /// Leave one level of expression nesting.
    pub(crate) fn ascend(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }
}
