//! Line reader and results presenter for the `tally` binary.

use std::io::{self, BufRead, Write};
use tally_eval::{RunOutcome, VariableStore};
use tally_types::{Diagnostic, Diagnostics};

pub const BANNER: &str = "Tally: enter a program, one statement per line.\n\
Indent the lines of an `if <condition>:` block. Finish with an empty line.";

pub const PROMPT: &str = "> ";

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// ══════════════════════════════════════════════════════════════════════════════
// Reading
// ══════════════════════════════════════════════════════════════════════════════

/// Read program lines until an empty line or end of input.
///
/// Trailing `\r`/`\n` is removed; leading whitespace is kept since it
/// marks block membership. When `prompt` is given, [`PROMPT`] is written to
/// it before every line.
pub fn read_program<R: BufRead>(mut reader: R, mut prompt: Option<&mut dyn Write>) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buffer = String::new();
    loop {
        if let Some(out) = prompt.as_mut() {
            out.write_all(PROMPT.as_bytes())?;
            out.flush()?;
        }
        buffer.clear();
        if reader.read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    tracing::debug!(lines = lines.len(), "read program");
    Ok(lines)
}

// ══════════════════════════════════════════════════════════════════════════════
// Presenting
// ══════════════════════════════════════════════════════════════════════════════

/// `name = value` per line in first-definition order.
pub fn render_store(store: &VariableStore) -> String {
    if store.is_empty() {
        "(no variables)".to_string()
    } else {
        store.to_string()
    }
}

/// One line: `error[E200]: line 2: undefined variable 'z'`.
pub fn render_diagnostic(diagnostic: &Diagnostic) -> String {
    diagnostic.to_string()
}

/// Every diagnostic with its source line, then a summary line.
pub fn render_check(diagnostics: &Diagnostics) -> String {
    if !diagnostics.has_errors() {
        return "no problems found".to_string();
    }
    let mut out = String::new();
    for diagnostic in &diagnostics.errors {
        out.push_str(&render_diagnostic(diagnostic));
        out.push('\n');
        out.push_str(&format!("  | {}\n", diagnostic.source_line));
    }
    let hidden = diagnostics.total_errors - diagnostics.errors.len();
    if hidden > 0 {
        out.push_str(&format!("... and {hidden} more\n"));
    }
    let plural = if diagnostics.total_errors == 1 { "" } else { "s" };
    out.push_str(&format!("{} error{plural}", diagnostics.total_errors));
    out
}

/// Render a run outcome in the requested format.
pub fn present(outcome: &RunOutcome, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => outcome.to_json(),
        OutputFormat::Text => Ok(match (&outcome.variables, &outcome.error) {
            (_, Some(diagnostic)) => render_diagnostic(diagnostic),
            (Some(store), None) => render_store(store),
            (None, None) => render_store(&VariableStore::new()),
        }),
    }
}

/// Render check diagnostics in the requested format.
pub fn present_check(diagnostics: &Diagnostics, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(diagnostics),
        OutputFormat::Text => Ok(render_check(diagnostics)),
    }
}

/// Process exit status for a run outcome.
pub fn exit_code(outcome: &RunOutcome) -> i32 {
    if outcome.success {
        0
    } else {
        1
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Logging
// ══════════════════════════════════════════════════════════════════════════════

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}
