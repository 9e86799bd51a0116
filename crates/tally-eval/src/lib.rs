//! Tally evaluator: runs a parsed program against a variable store.
//!
//! The four text-in operations below use the default [`RunConfig`]; build an
//! [`Interpreter`] to change limits.
//!
//! ```text
//! let x = 5
//! if x > 3:
//!   let y = x + 10
//! ```
//! leaves `x = 5, y = 15` in the store.

pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod runner;
pub mod store;

pub use error::{EvalResult, RunError};
pub use evaluator::Evaluator;
pub use interpreter::{Interpreter, RunConfig, RunOutcome};
pub use runner::BlockRunner;
pub use store::VariableStore;

use tally_types::Result;

/// Evaluate an arithmetic expression such as `(a + 2) * -b`.
pub fn evaluate(expr: &str, store: &VariableStore) -> Result<i64> {
    Interpreter::default().evaluate(expr, store)
}

/// Evaluate a comparison such as `x + 1 >= y`.
pub fn evaluate_condition(condition: &str, store: &VariableStore) -> Result<bool> {
    Interpreter::default().evaluate_condition(condition, store)
}

/// Process one `let <name> = <expression>` line.
pub fn process(line: &str, store: &mut VariableStore) -> Result<()> {
    Interpreter::default().process(line, store)
}

/// Run a sequence of program lines, including `if` blocks.
pub fn run<S: AsRef<str>>(lines: &[S], store: &mut VariableStore) -> Result<()> {
    Interpreter::default().run(lines, store)
}
