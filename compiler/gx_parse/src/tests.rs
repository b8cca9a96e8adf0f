#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use gx_eval::{OfflineTransport, Program, Value};
use gx_ir::{ExprKind, Span, Thunk};
use pretty_assertions::assert_eq;

fn eval_in(program: &mut Program, text: &str) -> Value {
    let id = parse_expr(&mut program.arena, &mut program.interner, text).unwrap();
    program.evaluator(&mut OfflineTransport).evaluate(id).unwrap()
}

#[test]
fn parses_applications() {
    let mut program = Program::standard();
    let id = parse_expr(&mut program.arena, &mut program.interner, "ap inc 1").unwrap();
    let ExprKind::Apply(Thunk::Pending { lhs, rhs }) = program.arena.kind(id).clone() else {
        panic!("expected a pending application");
    };
    assert!(matches!(program.arena.kind(lhs), ExprKind::Reference { .. }));
    assert_eq!(program.arena.cached(rhs), Some(&Value::number(1)));
}

#[test]
fn evaluates_parsed_text() {
    let mut program = Program::standard();
    assert_eq!(eval_in(&mut program, "ap ap add 2 3"), Value::number(5));
    assert_eq!(eval_in(&mut program, "  ap\n ap mul\t-3 3 "), Value::number(-9));
}

#[test]
fn excess_token() {
    let mut program = Program::standard();
    let err = parse_expr(&mut program.arena, &mut program.interner, "ap inc 1 2").unwrap_err();
    assert_eq!(
        err,
        ParseError::ExcessToken {
            token: "2".to_string(),
            span: Span::new(9, 10),
        }
    );
}

#[test]
fn missing_token() {
    let mut program = Program::standard();
    let err = parse_expr(&mut program.arena, &mut program.interner, "ap ap add 1").unwrap_err();
    assert_eq!(err, ParseError::MissingToken { span: Span::new(11, 11) });
    let err = parse_expr(&mut program.arena, &mut program.interner, "").unwrap_err();
    assert_eq!(err.span(), Span::new(0, 0));
}

#[test]
fn deeply_nested_expressions() {
    let mut program = Program::standard();
    let depth = 50_000;
    let text = format!("{}0", "ap inc ".repeat(depth));
    let value = eval_in(&mut program, &text);
    assert_eq!(value, Value::number(i64::try_from(depth).unwrap()));
}

#[test]
fn environment_with_forward_references() {
    let text = "\
galaxy = ap ap add :1 :2

:1 = ap inc :2
:2 = 20
";
    let mut program = parse_environment(text).unwrap();
    assert_eq!(eval_in(&mut program, "galaxy"), Value::number(41));
}

#[test]
fn later_bindings_shadow_earlier_ones() {
    let mut program = parse_environment("x = 1\nx = 2\nadd = 3\n").unwrap();
    assert_eq!(eval_in(&mut program, "x"), Value::number(2));
    assert_eq!(eval_in(&mut program, "add"), Value::number(3));
}

#[test]
fn crlf_lines() {
    let mut program = parse_environment("a = 1\r\nb = ap inc a\r\n").unwrap();
    assert_eq!(eval_in(&mut program, "b"), Value::number(2));
}

#[test]
fn missing_separator() {
    let err = parse_environment("a = 1\nb 2\n").unwrap_err();
    assert_eq!(err, ParseError::MissingBinding { span: Span::new(6, 9) });
}

#[test]
fn empty_name() {
    let err = parse_environment(" = 1").unwrap_err();
    assert!(matches!(err, ParseError::MissingBinding { .. }));
}

#[test]
fn spans_are_absolute_in_environments() {
    let err = parse_environment("a = 1\nb = ap inc 1 1\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::ExcessToken {
            token: "1".to_string(),
            span: Span::new(19, 20),
        }
    );
}

#[test]
fn failed_parse_leaves_bindings_unchanged() {
    let mut program = parse_environment("a = 1\n").unwrap();
    let before = program.env.len();
    let err = extend_environment(&mut program, "a = 5\nfresh = 2\nbroken = ap\n").unwrap_err();

    assert!(matches!(err, ParseError::MissingToken { .. }));
    assert_eq!(program.env.len(), before);
    assert!(program.lookup("fresh").is_none());
    assert!(program.lookup("broken").is_none());
    assert_eq!(eval_in(&mut program, "a"), Value::number(1));
}

#[test]
fn extend_adds_bindings() {
    let mut program = parse_environment("a = 1\n").unwrap();
    extend_environment(&mut program, "b = ap inc a\n").unwrap();
    assert_eq!(eval_in(&mut program, "b"), Value::number(2));
}

#[test]
fn error_labels() {
    let err = ParseError::MissingBinding { span: Span::DUMMY };
    assert_eq!(err.to_string(), "line is not a binding");
    assert_eq!(err.label(), "expected `name = expression`");
}
