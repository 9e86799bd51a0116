//! Line reader and presenter tests.

use pretty_assertions::assert_eq;
use std::io::{Cursor, Write};
use tally_cli::{
    exit_code, present, present_check, read_program, render_check, render_store, OutputFormat,
    PROMPT,
};
use tally_eval::{Interpreter, VariableStore};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn read(input: &str) -> Vec<String> {
    read_program(Cursor::new(input), None).unwrap()
}

fn run_text(lines: &[&str]) -> (String, i32) {
    let outcome = Interpreter::default().outcome(lines);
    (present(&outcome, OutputFormat::Text).unwrap(), exit_code(&outcome))
}

// ══════════════════════════════════════════════════════════════════════════════
// Reading
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn reading_stops_at_the_first_empty_line() {
    assert_eq!(read("let a = 1\nlet b = 2\n\nlet c = 3\n"), ["let a = 1", "let b = 2"]);
}

#[test]
fn reading_stops_at_end_of_input() {
    assert_eq!(read("let a = 1\nlet b = 2"), ["let a = 1", "let b = 2"]);
    assert!(read("").is_empty());
}

#[test]
fn reading_keeps_indentation_and_strips_line_endings() {
    assert_eq!(
        read("if a > 0:\r\n  let b = 1\r\n\tlet c = 2\n"),
        ["if a > 0:", "  let b = 1", "\tlet c = 2"]
    );
}

#[test]
fn whitespace_only_line_does_not_end_the_program() {
    assert_eq!(read("let a = 1\n  \nlet b = 2\n"), ["let a = 1", "  ", "let b = 2"]);
}

#[test]
fn prompt_is_written_before_every_read() {
    let mut prompts = Vec::new();
    let lines = read_program(
        Cursor::new("let a = 1\nlet b = 2\n\n"),
        Some(&mut prompts as &mut dyn Write),
    )
    .unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(String::from_utf8(prompts).unwrap(), PROMPT.repeat(3));
}

// ══════════════════════════════════════════════════════════════════════════════
// Presenting
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn success_lists_variables_in_definition_order() {
    let (text, code) = run_text(&["let x = 5", "if x > 3:", "  let y = x + 10", "let a = 0"]);
    assert_eq!(text, "x = 5\ny = 15\na = 0");
    assert_eq!(code, 0);
}

#[test]
fn empty_store_is_labelled() {
    assert_eq!(render_store(&VariableStore::new()), "(no variables)");
    let (text, code) = run_text(&[]);
    assert_eq!(text, "(no variables)");
    assert_eq!(code, 0);
}

#[test]
fn failure_is_a_single_error_line() {
    let (text, code) = run_text(&["let x = 5", "let y = x / 0"]);
    assert_eq!(
        text,
        "error[E300]: line 2: invalid expression 'x / 0': division by zero"
    );
    assert_eq!(code, 1);
}

#[test]
fn json_output_is_the_run_outcome() {
    let outcome = Interpreter::default().outcome(&["let x = 5"]);
    let json = present(&outcome, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value, serde_json::json!({ "success": true, "variables": { "x": 5 } }));
}

#[test]
fn check_report_lists_problems_with_context() {
    let diagnostics = Interpreter::default().check(&["let a = 1", "if a > 9:", "  oops"]);
    assert_eq!(
        render_check(&diagnostics),
        "error[E102]: line 3: unknown statement 'oops'\n  |   oops\n1 error"
    );
}

#[test]
fn check_report_for_clean_program() {
    let diagnostics = Interpreter::default().check(&["let a = 1"]);
    assert_eq!(render_check(&diagnostics), "no problems found");
}

#[test]
fn check_report_counts_hidden_problems() {
    let lines: Vec<String> = (0..25).map(|i| format!("bad {i}")).collect();
    let diagnostics = Interpreter::default().check(&lines);
    let report = render_check(&diagnostics);
    assert!(report.ends_with("... and 5 more\n25 errors"), "{report}");
}

#[test]
fn check_json_is_structured() {
    let diagnostics = Interpreter::default().check(&["frob"]);
    let json = present_check(&diagnostics, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_errors"], 1);
    assert_eq!(value["errors"][0]["code"], 102);
    assert_eq!(value["errors"][0]["category"], "syntax");
}
