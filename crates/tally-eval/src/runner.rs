//! Executes a block tree against a variable store.

use crate::error::{EvalResult, RunError};
use crate::evaluator::Evaluator;
use crate::store::VariableStore;
use tally_types::ast::*;
use tally_types::{Result, TallyError};

/// Runs blocks in order, stopping at the first error.
///
/// Bindings made before the error stay in the store; the caller decides
/// whether to keep them.
pub struct BlockRunner<'s> {
    store: &'s mut VariableStore,
}

impl<'s> BlockRunner<'s> {
    pub fn new(store: &'s mut VariableStore) -> Self {
        Self { store }
    }

    pub fn run_block(&mut self, block: &Block) -> EvalResult<()> {
        for node in &block.nodes {
            self.run_node(node)?;
        }
        Ok(())
    }

    fn run_node(&mut self, node: &Node) -> EvalResult<()> {
        match node {
            Node::Let(stmt) => self
                .run_let(stmt)
                .map_err(|err| RunError::new(err, node.span())),
            Node::If(if_block) => self.run_if(if_block),
            Node::Invalid(invalid) => Err(RunError::new(invalid.error.clone(), node.span())),
        }
    }

    /// Evaluate the value and bind it.
    pub fn run_let(&mut self, stmt: &LetStmt) -> Result<()> {
        let value = Evaluator::new(self.store).eval_operand(&stmt.value)?;
        self.store.define(&stmt.name.name, value);
        tracing::debug!(
            line = stmt.span.start_line,
            name = %stmt.name.name,
            value,
            "bound variable"
        );
        Ok(())
    }

    fn run_if(&mut self, if_block: &IfBlock) -> EvalResult<()> {
        let taken = Evaluator::new(self.store)
            .eval_condition(&if_block.condition)
            .map_err(|err| RunError::new(err, if_block.span))?;
        let line = if_block.span.start_line;
        if !taken {
            tracing::debug!(line, condition = %if_block.condition.text, "skipped block");
            return Ok(());
        }
        tracing::debug!(line, condition = %if_block.condition.text, "entered block");
        match &if_block.body {
            IfBody::Block(body) => self.run_block(body),
            IfBody::TooDeep { limit } => Err(RunError::new(
                TallyError::NestingTooDeep { limit: *limit },
                if_block.span,
            )),
        }
    }
}
