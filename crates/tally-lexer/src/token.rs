//! Token types for the Tally lexer.
//!
//! Defines [`TokenKind`] covering every lexeme that can appear on a Tally
//! line and [`Token`], which pairs a kind with its source [`Span`] and byte
//! range.

use std::fmt;
use std::ops::Range;
use tally_types::ast::CmpOp;
use tally_types::Span;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the Tally lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
    /// Byte range of the lexeme inside the lexed text.
    pub range: Range<usize>,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, range: Range<usize>) -> Self {
        Self { kind, span, range }
    }

    /// Returns `true` if this token is the identifier `word`.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name == word)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the Tally language.
///
/// `let` and `if` are not reserved: they lex as identifiers and the
/// statement parser recognises them by position.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Integer literal: `42`
    IntLit(i64),
    /// Integer literal too large for a signed 64-bit value. Carries the
    /// digits as written.
    Overflowing(String),

    // ── Identifiers ──────────────────────────────────────────

    /// `total`, `_tmp`, `x1`
    Identifier(String),

    // ── Arithmetic ───────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,

    // ── Comparison ───────────────────────────────────────────

    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `>=`
    GreaterEq,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `<`
    Less,

    // ── Punctuation ──────────────────────────────────────────

    /// `=`
    Eq,
    /// `:`
    Colon,

    // ── Special ──────────────────────────────────────────────

    /// A character that is not part of the language.
    Unexpected(char),
    /// End of the lexed text.
    Eol,
}

impl TokenKind {
    /// The comparison operator this token spells, if any.
    pub fn comparison_op(&self) -> Option<CmpOp> {
        match self {
            TokenKind::EqEq => Some(CmpOp::Eq),
            TokenKind::BangEq => Some(CmpOp::NotEq),
            TokenKind::GreaterEq => Some(CmpOp::GreaterEq),
            TokenKind::LessEq => Some(CmpOp::LessEq),
            TokenKind::Greater => Some(CmpOp::Greater),
            TokenKind::Less => Some(CmpOp::Less),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLit(n) => write!(f, "{n}"),
            TokenKind::Overflowing(digits) => f.write_str(digits),
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Eq => f.write_str("="),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Unexpected(ch) => write!(f, "{ch}"),
            TokenKind::Eol => f.write_str("end of line"),
        }
    }
}
