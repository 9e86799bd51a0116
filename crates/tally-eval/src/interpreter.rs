//! The interpreter facade: configuration, whole-program runs and the
//! serialisable run outcome.

use crate::evaluator::Evaluator;
use crate::runner::BlockRunner;
use crate::store::VariableStore;
use serde::Serialize;
use tally_parser::{
    parse_condition, parse_expression, parse_program, parse_statement, ParseLimits,
    DEFAULT_MAX_EXPR_DEPTH, DEFAULT_MAX_NESTING_DEPTH,
};
use tally_types::{Diagnostic, Diagnostics, Result, SourceLines};

/// Interpreter limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Deepest `if` nesting that will run; a deeper block fails with
    /// `NestingTooDeep` when reached.
    pub max_nesting_depth: u32,
    /// Deepest expression nesting (parentheses and unary operators).
    pub max_expr_depth: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_expr_depth: DEFAULT_MAX_EXPR_DEPTH,
        }
    }
}

impl RunConfig {
    pub fn with_max_nesting_depth(mut self, depth: u32) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_max_expr_depth(mut self, depth: u32) -> Self {
        self.max_expr_depth = depth;
        self
    }

    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits {
            max_nesting_depth: self.max_nesting_depth,
            max_expr_depth: self.max_expr_depth,
        }
    }
}

/// Runs Tally programs under one [`RunConfig`].
///
/// The interpreter holds no variable state; every call takes the store it
/// works on, or creates a fresh one.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: RunConfig,
}

impl Interpreter {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run a whole program against a fresh store.
    ///
    /// Returns the final store, or the first error as a positioned
    /// diagnostic. Partial state is never returned.
    #[tracing::instrument(level = "debug", skip_all, fields(lines = lines.len()))]
    pub fn execute<S: AsRef<str>>(&self, lines: &[S]) -> std::result::Result<VariableStore, Diagnostic> {
        let program = parse_program(lines, &self.config.parse_limits());
        let mut store = VariableStore::new();
        match BlockRunner::new(&mut store).run_block(&program.body) {
            Ok(()) => {
                tracing::debug!(variables = store.len(), "program finished");
                Ok(store)
            }
            Err(err) => {
                let diagnostic = err.into_diagnostic(&SourceLines::new(lines));
                tracing::debug!(code = %diagnostic.code, line = diagnostic.span.start_line, "program failed");
                Err(diagnostic)
            }
        }
    }

    /// Run a whole program and wrap the result for presentation.
    pub fn outcome<S: AsRef<str>>(&self, lines: &[S]) -> RunOutcome {
        RunOutcome::from(self.execute(lines))
    }

    /// Report every problem visible without running the program, including
    /// problems inside blocks that a run would skip.
    pub fn check<S: AsRef<str>>(&self, lines: &[S]) -> Diagnostics {
        tally_parser::check(lines, &self.config.parse_limits())
    }

    /// Evaluate one arithmetic expression.
    pub fn evaluate(&self, expr: &str, store: &VariableStore) -> Result<i64> {
        let operand = parse_expression(expr, &self.config.parse_limits());
        Evaluator::new(store).eval_operand(&operand)
    }

    /// Evaluate one comparison.
    pub fn evaluate_condition(&self, condition: &str, store: &VariableStore) -> Result<bool> {
        let condition = parse_condition(condition, &self.config.parse_limits())?;
        Evaluator::new(store).eval_condition(&condition)
    }

    /// Process one `let` line, binding its variable in `store`.
    pub fn process(&self, line: &str, store: &mut VariableStore) -> Result<()> {
        let stmt = parse_statement(line, &self.config.parse_limits())?;
        BlockRunner::new(store).run_let(&stmt)
    }

    /// Run `lines` against an existing store. The store is only updated if
    /// the whole run succeeds.
    pub fn run<S: AsRef<str>>(&self, lines: &[S], store: &mut VariableStore) -> Result<()> {
        let program = parse_program(lines, &self.config.parse_limits());
        let mut scratch = store.clone();
        BlockRunner::new(&mut scratch).run_block(&program.body)?;
        *store = scratch;
        Ok(())
    }
}

/// Success or failure of one program run, as rendered by the JSON presenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableStore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Diagnostic>,
}

impl RunOutcome {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<std::result::Result<VariableStore, Diagnostic>> for RunOutcome {
    fn from(result: std::result::Result<VariableStore, Diagnostic>) -> Self {
        match result {
            Ok(store) => Self {
                success: true,
                variables: Some(store),
                error: None,
            },
            Err(diagnostic) => Self {
                success: false,
                variables: None,
                error: Some(diagnostic),
            },
        }
    }
}
