//! Statement, `if` header and condition parsing.
//!
//! Statement shapes are matched on the line text, exactly as written:
//! a line is a `let` statement if it starts with `let`, and an `if`
//! header if it starts with `if`. Expression slots are then handed to the
//! token-based expression parser.

use tally_lexer::{Lexer, TokenKind};
use tally_types::ast::*;
use tally_types::{Span, TallyError};

use crate::line::LineRef;
use crate::parse_expr::operand_from_tokens;
use crate::parser::ParseLimits;

/// Whether the line is an `if` header (or an attempt at one).
pub(crate) fn is_if_line(line: &LineRef<'_>) -> bool {
    line.trimmed().0.starts_with("if")
}

/// Parse one non-block line.
///
/// Only `let` statements are valid here; an `if` line outside block
/// context is rejected with [`TallyError::UnsupportedStandaloneIf`].
pub(crate) fn parse_statement(line: &LineRef<'_>, limits: &ParseLimits) -> Result<LetStmt, TallyError> {
    let (text, _) = line.trimmed();
    if text.starts_with("let") {
        parse_let(line, limits)
    } else if text.starts_with("if") {
        Err(TallyError::UnsupportedStandaloneIf {
            line: text.to_string(),
        })
    } else {
        Err(TallyError::UnknownStatement {
            line: text.to_string(),
        })
    }
}

/// `let <identifier> = <expression>`
fn parse_let(line: &LineRef<'_>, limits: &ParseLimits) -> Result<LetStmt, TallyError> {
    let (text, offset) = line.trimmed();
    let invalid = || TallyError::InvalidSyntax {
        line: text.to_string(),
    };

    if !text.starts_with("let") {
        return Err(invalid());
    }
    let bytes = text.as_bytes();
    let mut pos = "let".len();

    // At least one whitespace character separates the keyword and the name.
    let gap = skip_whitespace(bytes, pos);
    if gap == pos {
        return Err(invalid());
    }
    pos = gap;

    let name_start = pos;
    pos = identifier_end(bytes, pos).ok_or_else(invalid)?;
    let name = &text[name_start..pos];
    let name_span = Span::on_line(
        line.number,
        offset + name_start as u32 + 1,
        offset + pos as u32,
    );

    pos = skip_whitespace(bytes, pos);
    if bytes.get(pos) != Some(&b'=') {
        return Err(invalid());
    }
    pos = skip_whitespace(bytes, pos + 1);

    let expr_text = &text[pos..];
    if expr_text.is_empty() {
        return Err(invalid());
    }
    let value = parse_operand_at(expr_text, line.number, offset + pos as u32, limits);

    Ok(LetStmt {
        name: Ident::new(name, name_span),
        value,
        span: line.span(),
    })
}

/// `if <condition>:`
pub(crate) fn parse_if_header(line: &LineRef<'_>, limits: &ParseLimits) -> Result<Condition, TallyError> {
    let (text, offset) = line.trimmed();
    let invalid = || TallyError::InvalidIfSyntax {
        line: text.to_string(),
    };

    let rest = text.strip_prefix("if").ok_or_else(invalid)?;
    let start = skip_whitespace(rest.as_bytes(), 0);
    if start == 0 {
        return Err(invalid());
    }
    let condition = rest[start..].strip_suffix(':').ok_or_else(invalid)?;
    if condition.trim().is_empty() {
        return Err(invalid());
    }

    parse_condition_at(condition, line.number, offset + ("if".len() + start) as u32, limits)
}

/// Split a condition at its comparison operator and parse both operands.
///
/// The first operator of [`CmpOp::PRIORITY`] that occurs anywhere in the
/// condition wins, and the split happens at its first occurrence.
pub(crate) fn parse_condition_at(
    text: &str,
    line: u32,
    col_offset: u32,
    limits: &ParseLimits,
) -> Result<Condition, TallyError> {
    let tokens = Lexer::new(text, line, col_offset).lex();
    let body = match tokens.split_last() {
        Some((eol, body)) if eol.kind == TokenKind::Eol => body,
        _ => &tokens[..],
    };

    let split = CmpOp::PRIORITY.iter().find_map(|&op| {
        body.iter()
            .position(|t| t.kind.comparison_op() == Some(op))
            .map(|idx| (op, idx))
    });
    let Some((op, idx)) = split else {
        return Err(TallyError::UnsupportedCondition {
            condition: text.trim().to_string(),
        });
    };

    let op_token = &body[idx];
    let left = operand_from_tokens(
        &text[..op_token.range.start],
        &body[..idx],
        Span::point(line, op_token.span.start_col),
        limits,
    );
    let right = operand_from_tokens(
        &text[op_token.range.end..],
        &body[idx + 1..],
        Span::point(line, op_token.span.end_col + 1),
        limits,
    );

    let span = body
        .iter()
        .fold(op_token.span, |acc, t| acc.merge(t.span));
    Ok(Condition {
        text: text.trim().to_string(),
        left,
        op,
        right,
        span,
    })
}

/// Lex and parse one expression slot.
pub(crate) fn parse_operand_at(text: &str, line: u32, col_offset: u32, limits: &ParseLimits) -> Operand {
    let tokens = Lexer::new(text, line, col_offset).lex();
    let body = match tokens.split_last() {
        Some((eol, body)) if eol.kind == TokenKind::Eol => body,
        _ => &tokens[..],
    };
    operand_from_tokens(text, body, Span::point(line, col_offset + 1), limits)
}

// ─────────────────────────────────────────────────────────────────────
// Byte-level shape helpers
// ─────────────────────────────────────────────────────────────────────

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while let Some(b' ' | b'\t') = bytes.get(pos) {
        pos += 1;
    }
    pos
}

/// End of the identifier starting at `pos`, if one starts there.
fn identifier_end(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return None,
    }
    let len = bytes[pos..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    Some(pos + len)
}
