//! Static check: every problem the parser can see, without running.

use tally_types::ast::*;
use tally_types::{Diagnostic, Diagnostics, SourceLines, Span, TallyError};

/// Collect a diagnostic for every invalid line, malformed expression and
/// over-deep block in `program`, in source order. Blocks are checked
/// whether or not they would run.
pub fn check_program(program: &Program, source: &SourceLines) -> Diagnostics {
    let mut diags = Diagnostics::empty();
    check_block(&program.body, source, &mut diags);
    diags
}

fn check_block(block: &Block, source: &SourceLines, diags: &mut Diagnostics) {
    for node in &block.nodes {
        match node {
            Node::Let(stmt) => check_operand(&stmt.value, source, diags),
            Node::If(if_block) => {
                check_operand(&if_block.condition.left, source, diags);
                check_operand(&if_block.condition.right, source, diags);
                match &if_block.body {
                    IfBody::Block(body) => check_block(body, source, diags),
                    IfBody::TooDeep { limit } => push(
                        diags,
                        TallyError::NestingTooDeep { limit: *limit },
                        if_block.span,
                        source,
                    ),
                }
            }
            Node::Invalid(invalid) => push(diags, invalid.error.clone(), invalid.span, source),
        }
    }
}

fn check_operand(operand: &Operand, source: &SourceLines, diags: &mut Diagnostics) {
    if let OperandKind::Malformed { fault, .. } = &operand.kind {
        push(
            diags,
            TallyError::invalid_expression(operand.text.clone(), fault.clone()),
            operand.span,
            source,
        );
    }
}

fn push(diags: &mut Diagnostics, error: TallyError, span: Span, source: &SourceLines) {
    let source_line = source.line(span.start_line).unwrap_or("");
    diags.push_error(Diagnostic::new(error, span, source_line));
}
