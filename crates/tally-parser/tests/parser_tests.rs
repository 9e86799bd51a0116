//! Expression, statement and condition parser tests.
//!
//! Covers:
//! 1. Precedence and associativity of the arithmetic grammar
//! 2. Malformed expressions and the faults they carry
//! 3. The `let` statement shape and statement dispatch
//! 4. Condition splitting by operator priority

use pretty_assertions::assert_eq;
use tally_parser::{parse_condition, parse_expression, parse_statement, ParseLimits};
use tally_types::ast::*;
use tally_types::{ExprFault, Span, TallyError};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn limits() -> ParseLimits {
    ParseLimits::default()
}

/// Parse an expression, panicking if it is malformed.
fn expr(text: &str) -> Expr {
    match parse_expression(text, &limits()).kind {
        OperandKind::Parsed(expr) => expr,
        OperandKind::Malformed { fault, .. } => panic!("'{text}' failed to parse: {fault}"),
    }
}

/// Parse an expression, panicking if it is well formed.
fn fault(text: &str) -> ExprFault {
    fault_with(text, &limits())
}

fn fault_with(text: &str, limits: &ParseLimits) -> ExprFault {
    match parse_expression(text, limits).kind {
        OperandKind::Parsed(expr) => panic!("'{text}' unexpectedly parsed: {expr:?}"),
        OperandKind::Malformed { fault, .. } => fault,
    }
}

/// Render an expression tree as an s-expression; parentheses are transparent
/// and operator chains fold to the left.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::IntLit(n) => n.to_string(),
        ExprKind::Identifier(ident) => ident.name.clone(),
        ExprKind::Chain { first, rest } => rest.iter().fold(shape(first), |acc, (op, operand)| {
            format!("({op} {acc} {})", shape(operand))
        }),
        ExprKind::Unary { op: UnaryOp::Neg, operand } => format!("(neg {})", shape(operand)),
        ExprKind::Unary { op: UnaryOp::Plus, operand } => format!("(pos {})", shape(operand)),
        ExprKind::Paren(inner) => shape(inner),
    }
}

fn operand_shape(operand: &Operand) -> String {
    match &operand.kind {
        OperandKind::Parsed(expr) => shape(expr),
        OperandKind::Malformed { fault, .. } => format!("<malformed: {fault}>"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(shape(&expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
    assert_eq!(shape(&expr("1 * 2 + 3")), "(+ (* 1 2) 3)");
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(shape(&expr("(1 + 2) * 3")), "(* (+ 1 2) 3)");
    assert_eq!(shape(&expr("((x))")), "x");
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(shape(&expr("8 / 4 / 2")), "(/ (/ 8 4) 2)");
    assert_eq!(shape(&expr("10 - 3 - 2")), "(- (- 10 3) 2)");
}

#[test]
fn unary_minus_binds_tighter_than_multiplication() {
    assert_eq!(shape(&expr("-x * 2")), "(* (neg x) 2)");
    assert_eq!(shape(&expr("-7 / 2")), "(/ (neg 7) 2)");
    assert_eq!(shape(&expr("2 - -3")), "(- 2 (neg 3))");
    assert_eq!(shape(&expr("- -3")), "(neg (neg 3))");
    assert_eq!(shape(&expr("+4")), "(pos 4)");
}

#[test]
fn whitespace_is_insignificant() {
    assert_eq!(shape(&expr("a+b*c")), shape(&expr("  a +  b *   c ")));
}

#[test]
fn expression_spans_cover_the_source() {
    let e = expr("x + 10");
    assert_eq!(e.span, Span::on_line(1, 1, 6));
    let operand = parse_expression("  (a)  ", &limits());
    assert_eq!(operand.text, "(a)");
    assert_eq!(operand.span, Span::on_line(1, 3, 5));
}

// ─────────────────────────────────────────────────────────────────────
// Malformed expressions
// ─────────────────────────────────────────────────────────────────────

#[test]
fn dangling_operator_is_unexpected_end() {
    assert_eq!(fault("1 +"), ExprFault::UnexpectedEnd);
    assert_eq!(fault("(1 + 2"), ExprFault::UnexpectedEnd);
}

#[test]
fn adjacent_operands_are_unexpected() {
    assert_eq!(
        fault("1 2"),
        ExprFault::UnexpectedToken {
            found: "2".into(),
            column: 3
        }
    );
}

#[test]
fn unsupported_characters_are_unexpected() {
    assert_eq!(
        fault("3 % 2"),
        ExprFault::UnexpectedToken {
            found: "%".into(),
            column: 3
        }
    );
    assert_eq!(
        fault("x = 1"),
        ExprFault::UnexpectedToken {
            found: "=".into(),
            column: 3
        }
    );
}

#[test]
fn empty_expression() {
    assert_eq!(fault(""), ExprFault::Empty);
    assert_eq!(fault("   "), ExprFault::Empty);
}

#[test]
fn literal_too_large_is_overflow() {
    assert_eq!(fault("99999999999999999999"), ExprFault::Overflow);
}

#[test]
fn malformed_operand_remembers_identifiers_in_order() {
    let operand = parse_expression("a + * b", &limits());
    match operand.kind {
        OperandKind::Malformed { names, .. } => {
            let names: Vec<&str> = names.iter().map(|n| n.name.as_str()).collect();
            assert_eq!(names, ["a", "b"]);
        }
        OperandKind::Parsed(_) => panic!("expected a malformed operand"),
    }
    assert_eq!(operand.text, "a + * b");
}

#[test]
fn malformed_operand_spans_count_characters() {
    let operand = parse_expression("é + b", &limits());
    let OperandKind::Malformed { fault, names } = operand.kind else {
        panic!("expected a malformed operand");
    };
    assert_eq!(
        fault,
        ExprFault::UnexpectedToken {
            found: "é".into(),
            column: 1
        }
    );
    assert_eq!(names[0].span, Span::on_line(1, 5, 5));
    assert_eq!(operand.span, Span::on_line(1, 1, 5));
}

#[test]
fn nesting_limit_applies_to_parentheses() {
    let tight = ParseLimits {
        max_expr_depth: 3,
        ..ParseLimits::default()
    };
    assert!(matches!(
        parse_expression("((1))", &tight).kind,
        OperandKind::Parsed(_)
    ));
    assert_eq!(fault_with("(((1)))", &tight), ExprFault::TooDeep { limit: 3 });
}

#[test]
fn nesting_limit_applies_to_unary_chains() {
    let text = format!("{}1", "-".repeat(100));
    assert_eq!(fault(&text), ExprFault::TooDeep { limit: 64 });
}

#[test]
fn long_operator_chains_stay_flat() {
    let tight = ParseLimits {
        max_expr_depth: 1,
        ..ParseLimits::default()
    };
    let terms: Vec<String> = (0..1000).map(|i| format!("v{i}")).collect();
    let text = format!("{} * 2", terms.join(" + "));
    let OperandKind::Parsed(e) = parse_expression(&text, &tight).kind else {
        panic!("long chain should parse within a depth of one");
    };
    let ExprKind::Chain { first, rest } = &e.kind else {
        panic!("expected a chain, got {:?}", e.kind);
    };
    assert_eq!(shape(first), "v0");
    assert_eq!(rest.len(), 999);
    assert_eq!(shape(&rest[998].1), "(* v999 2)");
    assert_eq!(e.identifiers().len(), 1000);
}

#[test]
fn default_limit_rejects_pathological_nesting() {
    let text = format!("{}1{}", "(".repeat(500), ")".repeat(500));
    assert_eq!(fault(&text), ExprFault::TooDeep { limit: 64 });
}

// ─────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────

#[test]
fn let_statement() {
    let stmt = parse_statement("let x = 5", &limits()).unwrap();
    assert_eq!(stmt.name.name, "x");
    assert_eq!(stmt.name.span, Span::on_line(1, 5, 5));
    assert_eq!(operand_shape(&stmt.value), "5");
    assert_eq!(stmt.value.span, Span::on_line(1, 9, 9));
}

#[test]
fn let_statement_spacing_is_flexible() {
    let stmt = parse_statement("let  total=x+1", &limits()).unwrap();
    assert_eq!(stmt.name.name, "total");
    assert_eq!(stmt.value.text, "x+1");
    assert_eq!(operand_shape(&stmt.value), "(+ x 1)");
}

#[test]
fn let_statement_is_trimmed() {
    let stmt = parse_statement("   let x = 1   ", &limits()).unwrap();
    assert_eq!(stmt.name.name, "x");
    assert_eq!(stmt.value.text, "1");
}

#[test]
fn let_with_invalid_name_is_invalid_syntax() {
    assert_eq!(
        parse_statement("let 1x = 5", &limits()),
        Err(TallyError::InvalidSyntax {
            line: "let 1x = 5".into()
        })
    );
}

#[test]
fn incomplete_let_is_invalid_syntax() {
    for line in ["let", "let x", "let x =", "let x 5", "letx = 5", "let x.y = 1", "let = 4"] {
        assert!(
            matches!(
                parse_statement(line, &limits()),
                Err(TallyError::InvalidSyntax { .. })
            ),
            "'{line}' should be invalid syntax"
        );
    }
}

#[test]
fn let_with_bad_expression_still_parses_as_let() {
    let stmt = parse_statement("let x = 1 +", &limits()).unwrap();
    assert_eq!(operand_shape(&stmt.value), "<malformed: unexpected end of expression>");
}

#[test]
fn first_equals_sign_is_the_assignment() {
    let stmt = parse_statement("let x == 5", &limits()).unwrap();
    assert_eq!(stmt.value.text, "= 5");
    assert!(matches!(
        stmt.value.kind,
        OperandKind::Malformed {
            fault: ExprFault::UnexpectedToken { .. },
            ..
        }
    ));
}

#[test]
fn standalone_if_is_rejected() {
    assert_eq!(
        parse_statement("if x > 1:", &limits()),
        Err(TallyError::UnsupportedStandaloneIf {
            line: "if x > 1:".into()
        })
    );
}

#[test]
fn other_lines_are_unknown_statements() {
    assert_eq!(
        parse_statement("print x", &limits()),
        Err(TallyError::UnknownStatement {
            line: "print x".into()
        })
    );
    assert_eq!(
        parse_statement("   ", &limits()),
        Err(TallyError::UnknownStatement { line: String::new() })
    );
}

// ─────────────────────────────────────────────────────────────────────
// Conditions
// ─────────────────────────────────────────────────────────────────────

fn condition(text: &str) -> Condition {
    parse_condition(text, &limits()).unwrap()
}

#[test]
fn condition_splits_on_operator() {
    let cond = condition("x > 3");
    assert_eq!(cond.op, CmpOp::Greater);
    assert_eq!(cond.left.text, "x");
    assert_eq!(cond.right.text, "3");
    assert_eq!(cond.text, "x > 3");
}

#[test]
fn every_comparison_operator_is_recognised() {
    let cases = [
        ("a == b", CmpOp::Eq),
        ("a != b", CmpOp::NotEq),
        ("a >= b", CmpOp::GreaterEq),
        ("a <= b", CmpOp::LessEq),
        ("a > b", CmpOp::Greater),
        ("a < b", CmpOp::Less),
    ];
    for (text, op) in cases {
        assert_eq!(condition(text).op, op, "{text}");
    }
}

#[test]
fn two_char_operators_are_not_mis_split() {
    let cond = condition("x>=3");
    assert_eq!(cond.op, CmpOp::GreaterEq);
    assert_eq!(operand_shape(&cond.left), "x");
    assert_eq!(operand_shape(&cond.right), "3");
}

#[test]
fn operands_are_full_expressions() {
    let cond = condition("x + 1 <= y * 2");
    assert_eq!(operand_shape(&cond.left), "(+ x 1)");
    assert_eq!(operand_shape(&cond.right), "(* y 2)");
}

#[test]
fn priority_order_decides_the_split() {
    // `==` outranks `<`, so the left operand keeps the `<`.
    let cond = condition("a < b == c");
    assert_eq!(cond.op, CmpOp::Eq);
    assert_eq!(cond.left.text, "a < b");
    assert!(matches!(cond.left.kind, OperandKind::Malformed { .. }));
    assert_eq!(operand_shape(&cond.right), "c");
}

#[test]
fn split_happens_at_first_occurrence() {
    let cond = condition("x > 3 > 2");
    assert_eq!(cond.left.text, "x");
    assert_eq!(cond.right.text, "3 > 2");
    assert!(matches!(cond.right.kind, OperandKind::Malformed { .. }));
}

#[test]
fn missing_operand_is_malformed() {
    let cond = condition("x >");
    assert_eq!(operand_shape(&cond.left), "x");
    assert!(matches!(
        cond.right.kind,
        OperandKind::Malformed {
            fault: ExprFault::Empty,
            ..
        }
    ));
}

#[test]
fn no_operator_is_unsupported() {
    assert_eq!(
        parse_condition("x = 3", &limits()),
        Err(TallyError::UnsupportedCondition {
            condition: "x = 3".into()
        })
    );
    assert_eq!(
        parse_condition(" x ", &limits()),
        Err(TallyError::UnsupportedCondition {
            condition: "x".into()
        })
    );
}

#[test]
fn identifier_characters_never_split_a_condition() {
    // Operators are found by token, so names are never cut apart.
    let cond = condition("less_than < greater_eq");
    assert_eq!(cond.op, CmpOp::Less);
    assert_eq!(cond.left.text, "less_than");
    assert_eq!(cond.right.text, "greater_eq");
}
