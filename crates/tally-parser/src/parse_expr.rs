//! Expression parsing with operator precedence.
//!
//! Precedence (lowest → highest):
//! 3. `+`, `-`
//! 2. `*`, `/`
//! 1. unary `-`, `+`
//! 0. integer, identifier, `( expr )`

use tally_lexer::token::{Token, TokenKind};
use tally_types::ast::*;
use tally_types::{ExprFault, Span};

use crate::parser::{ParseLimits, Parser};

/// Build an [`Operand`] from the tokens of one expression slot.
///
/// `text` is the slot's source text and `fallback` the span to use when
/// the slot holds no tokens at all.
pub(crate) fn operand_from_tokens(
    text: &str,
    tokens: &[Token],
    fallback: Span,
    limits: &ParseLimits,
) -> Operand {
    let text = text.trim().to_string();
    let span = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span.merge(last.span),
        _ => fallback,
    };

    let result = if tokens.is_empty() {
        Err(ExprFault::Empty)
    } else {
        Parser::new(tokens, limits).parse_complete()
    };

    let kind = match result {
        Ok(expr) => OperandKind::Parsed(expr),
        Err(fault) => OperandKind::Malformed {
            fault,
            names: tokens
                .iter()
                .filter_map(|t| match &t.kind {
                    TokenKind::Identifier(name) => Some(Ident::new(name.clone(), t.span)),
                    _ => None,
                })
                .collect(),
        },
    };
    Operand { text, kind, span }
}

impl<'t> Parser<'t> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression that must consume every token.
    pub(crate) fn parse_complete(&mut self) -> Result<Expr, ExprFault> {
        let expr = self.parse_expression()?;
        if self.at_end() {
            Ok(expr)
        } else {
            Err(self.unexpected())
        }
    }

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ExprFault> {
        self.descend()?;
        let result = self.parse_add();
        self.ascend();
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_add(&mut self) -> Result<Expr, ExprFault> {
        self.parse_chain(Self::parse_mul, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    /// `MulExpr = UnaryExpr { ("*" | "/") UnaryExpr }`
    fn parse_mul(&mut self) -> Result<Expr, ExprFault> {
        self.parse_chain(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        })
    }

    /// One precedence level: operands from `operand` joined by the
    /// operators `level` accepts, collected into a flat [`ExprKind::Chain`].
    fn parse_chain(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ExprFault>,
        level: fn(&TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, ExprFault> {
        let first = operand(self)?;
        let mut rest = Vec::new();
        while let Some(op) = level(self.peek_kind()) {
            self.advance();
            rest.push((op, operand(self)?));
        }
        let Some((_, last)) = rest.last() else {
            return Ok(first);
        };
        let span = first.span.merge(last.span);
        Ok(Expr::new(
            ExprKind::Chain {
                first: Box::new(first),
                rest,
            },
            span,
        ))
    }

    /// `UnaryExpr = ("-" | "+") UnaryExpr | PrimaryExpr`
    fn parse_unary(&mut self) -> Result<Expr, ExprFault> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        let start = self.advance().map(|t| t.span);
        self.descend()?;
        let operand = self.parse_unary();
        self.ascend();
        let operand = operand?;
        let span = start.map_or(operand.span, |s| s.merge(operand.span));
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `PrimaryExpr = Integer | Identifier | "(" Expr ")"`
    fn parse_primary(&mut self) -> Result<Expr, ExprFault> {
        let Some(token) = self.peek() else {
            return Err(ExprFault::UnexpectedEnd);
        };
        match &token.kind {
            TokenKind::IntLit(value) => {
                self.advance();
                Ok(Expr::new(ExprKind::IntLit(*value), token.span))
            }
            TokenKind::Overflowing(_) => Err(ExprFault::Overflow),
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::new(
                    ExprKind::Identifier(Ident::new(name.clone(), token.span)),
                    token.span,
                ))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close = self.peek().map(|t| t.span);
                if !self.eat(&TokenKind::RParen) {
                    return Err(self.unexpected());
                }
                let span = close.map_or(token.span, |c| token.span.merge(c));
                Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span))
            }
            _ => Err(self.unexpected()),
        }
    }
}
