//! Indentation-based block parsing.
//!
//! A single pass over the lines builds the block tree. An `if` header owns
//! every immediately following line that starts with a space or a tab; the
//! first line without leading whitespace (or the end of input) closes the
//! block. Member lines lose one level of indentation, the width of the
//! first member's leading whitespace, before the block is parsed in turn.
//!
//! Lines that fail to parse become [`Node::Invalid`] and stay where they
//! are: the error only surfaces if execution reaches them.

use tally_types::ast::*;

use crate::line::LineRef;
use crate::parse_stmt::{is_if_line, parse_if_header, parse_statement};
use crate::parser::ParseLimits;

/// Builds a [`Program`] from numbered lines.
pub struct BlockBuilder {
    limits: ParseLimits,
}

impl BlockBuilder {
    pub fn new(limits: ParseLimits) -> Self {
        Self { limits }
    }

    /// Build the block tree for a whole program.
    pub fn build(&self, lines: &[LineRef<'_>]) -> Program {
        Program {
            body: self.build_block(lines, 0),
        }
    }

    /// Build one block. `depth` is the number of `if` headers enclosing it.
    fn build_block(&self, lines: &[LineRef<'_>], depth: u32) -> Block {
        let mut nodes = Vec::with_capacity(lines.len());
        let mut idx = 0;

        while idx < lines.len() {
            let line = &lines[idx];
            if is_if_line(line) {
                let end = idx
                    + 1
                    + lines[idx + 1..]
                        .iter()
                        .take_while(|l| l.is_indented())
                        .count();
                nodes.push(self.build_if(line, &lines[idx + 1..end], depth));
                idx = end;
            } else {
                let node = match parse_statement(line, &self.limits) {
                    Ok(stmt) => Node::Let(stmt),
                    Err(error) => Node::Invalid(InvalidNode {
                        error,
                        span: line.span(),
                    }),
                };
                nodes.push(node);
                idx += 1;
            }
        }

        Block { nodes }
    }

    fn build_if(&self, header: &LineRef<'_>, members: &[LineRef<'_>], depth: u32) -> Node {
        let condition = match parse_if_header(header, &self.limits) {
            Ok(condition) => condition,
            Err(error) => {
                return Node::Invalid(InvalidNode {
                    error,
                    span: header.span(),
                })
            }
        };

        tracing::trace!(
            line = header.number,
            depth,
            members = members.len(),
            "collected if block"
        );

        let body = if depth >= self.limits.max_nesting_depth {
            IfBody::TooDeep {
                limit: self.limits.max_nesting_depth,
            }
        } else {
            let width = members.first().map_or(0, LineRef::indent_width);
            let inner: Vec<LineRef<'_>> = members.iter().map(|l| l.dedent(width)).collect();
            IfBody::Block(self.build_block(&inner, depth + 1))
        };

        Node::If(IfBlock {
            condition,
            body,
            span: header.span(),
        })
    }
}
