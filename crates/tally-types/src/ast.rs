//! AST node types for the Tally language.
//!
//! A program is a tree of blocks: each `if` node owns the block of lines
//! indented beneath it. Every node carries a [`Span`] pointing into the
//! original program lines.

use crate::{ExprFault, Span, TallyError};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete Tally program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Block,
}

/// An ordered sequence of nodes at one indentation level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// One statement in a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `let name = expr`
    Let(LetStmt),
    /// `if condition:` plus its indented block
    If(IfBlock),
    /// A line that failed to parse. The error is raised only if execution
    /// reaches the node.
    Invalid(InvalidNode),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Let(stmt) => stmt.span,
            Node::If(block) => block.span,
            Node::Invalid(node) => node.span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// `let name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Ident,
    pub value: Operand,
    pub span: Span,
}

/// `if condition:` followed by its block.
#[derive(Debug, Clone, PartialEq)]
pub struct IfBlock {
    pub condition: Condition,
    pub body: IfBody,
    /// Span of the header line only.
    pub span: Span,
}

/// The block owned by an `if` header.
#[derive(Debug, Clone, PartialEq)]
pub enum IfBody {
    Block(Block),
    /// The block sits deeper than the configured nesting limit. Its lines
    /// were consumed but never parsed.
    TooDeep { limit: u32 },
}

/// A line that could not be parsed, kept in place so the failure surfaces
/// in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidNode {
    pub error: TallyError,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Conditions
// ══════════════════════════════════════════════════════════════════════════════

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    NotEq,
    GreaterEq,
    LessEq,
    Greater,
    Less,
}

impl CmpOp {
    /// Operators in the order a condition is searched for them: the first
    /// operator present wins, so the two-character forms precede `>`/`<`.
    pub const PRIORITY: [CmpOp; 6] = [
        CmpOp::Eq,
        CmpOp::NotEq,
        CmpOp::GreaterEq,
        CmpOp::LessEq,
        CmpOp::Greater,
        CmpOp::Less,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::GreaterEq => ">=",
            CmpOp::LessEq => "<=",
            CmpOp::Greater => ">",
            CmpOp::Less => "<",
        }
    }

    /// Apply the comparison.
    pub fn compare(self, left: i64, right: i64) -> bool {
        match self {
            CmpOp::Eq => left == right,
            CmpOp::NotEq => left != right,
            CmpOp::GreaterEq => left >= right,
            CmpOp::LessEq => left <= right,
            CmpOp::Greater => left > right,
            CmpOp::Less => left < right,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The condition text as written (trimmed).
    pub text: String,
    pub left: Operand,
    pub op: CmpOp,
    pub right: Operand,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression slot as written in the source: the text plus either the
/// parsed tree or the reason it failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    /// The expression text (trimmed).
    pub text: String,
    pub kind: OperandKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperandKind {
    Parsed(Expr),
    /// The text does not form a valid expression. `names` lists every
    /// identifier that appeared in it, in source order, so an undefined
    /// name can still be reported ahead of the syntax fault.
    Malformed { fault: ExprFault, names: Vec<Ident> },
}

/// An arithmetic expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Every identifier referenced by the expression, left to right.
    pub fn identifiers(&self) -> Vec<&Ident> {
        let mut out = Vec::new();
        self.collect_identifiers(&mut out);
        out
    }

    fn collect_identifiers<'a>(&'a self, out: &mut Vec<&'a Ident>) {
        match &self.kind {
            ExprKind::IntLit(_) => {}
            ExprKind::Identifier(ident) => out.push(ident),
            ExprKind::Chain { first, rest } => {
                first.collect_identifiers(out);
                for (_, operand) in rest {
                    operand.collect_identifiers(out);
                }
            }
            ExprKind::Unary { operand, .. } => operand.collect_identifiers(out),
            ExprKind::Paren(inner) => inner.collect_identifiers(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// `42`
    IntLit(i64),
    /// `total`
    Identifier(Ident),
    /// `a + b - c` or `a * b / c`: operators of one precedence level,
    /// applied left to right. `rest` is never empty and all its operators
    /// share a level, so a long chain stays one node deep.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinOp, Expr)>,
    },
    /// `-a`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `(a)`
    Paren(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        })
    }
}
