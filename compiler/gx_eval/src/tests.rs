#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use std::sync::Arc;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

/// Build a prefix expression (`ap ap add 1 2`) straight into the arena.
pub(crate) fn expr(program: &mut Program, text: &str) -> ExprId {
    let mut tokens = text.split_whitespace();
    let id = build(program, &mut tokens);
    assert!(tokens.next().is_none(), "trailing tokens in {text:?}");
    id
}

fn build<'t>(program: &mut Program, tokens: &mut impl Iterator<Item = &'t str>) -> ExprId {
    let token = tokens.next().unwrap();
    if token == "ap" {
        let f = build(program, tokens);
        let x = build(program, tokens);
        return program.arena.apply(f, x);
    }
    if let Ok(n) = token.parse::<i64>() {
        return program.arena.alloc_number(n);
    }
    let name = program.interner.intern(token);
    program.arena.alloc_reference(name)
}

pub(crate) fn bind(program: &mut Program, name: &str, text: &str) {
    let id = expr(program, text);
    let name = program.interner.intern(name);
    program.env.bind(name, id);
}

pub(crate) fn eval(program: &mut Program, text: &str) -> EvalResult {
    let id = expr(program, text);
    program.evaluator(&mut OfflineTransport).evaluate(id)
}

/// `counter s _ = [eq 0 s 1 0, inc s, [[(s . s)]]]`
///
/// Asks to send on state 0, draws on anything else.
pub(crate) fn counter_protocol(program: &mut Program) {
    bind(program, "cn", "ap ap c cons nil");
    bind(program, "pt", "ap ap s cons i");
    bind(program, "d", "ap ap b cn ap ap b cn pt");
    bind(program, "flag", "ap ap c ap ap c ap eq 0 1 0");
    bind(program, "r", "ap ap s ap ap b cons inc ap ap b cn d");
    bind(program, "q", "ap ap s ap ap b cons flag r");
    bind(program, "counter", "ap ap b t q");
}

fn eval_std(text: &str) -> EvalResult {
    eval(&mut Program::standard(), text)
}

#[test]
fn add_two_numbers() {
    assert_eq!(eval_std("ap ap add 2 3").unwrap(), Value::number(5));
}

#[test]
fn isnil_discriminates() {
    assert_eq!(
        eval_std("ap isnil nil").unwrap(),
        Value::builtin(Builtin::True)
    );
    assert_eq!(
        eval_std("ap isnil ap ap cons 1 nil").unwrap(),
        Value::builtin(Builtin::False)
    );
}

#[test]
fn s_combinator_with_constants() {
    assert_eq!(eval_std("ap ap ap s t t 7").unwrap(), Value::number(7));
}

#[test]
fn partial_application_is_a_value() {
    let value = eval_std("ap add 1").unwrap();
    let func = value.as_function().unwrap();
    assert_eq!(func.builtin, Builtin::Add);
    assert_eq!(func.remaining(), 1);
}

#[test]
fn applying_a_number_fails() {
    let err = eval_std("ap 1 2").unwrap_err();
    assert!(err.is_type_mismatch());
    assert!(err.message.starts_with("invalid function call"));
}

#[test]
fn undefined_reference_names_the_binding() {
    let err = eval_std("ap inc nowhere").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedReference {
            name: "nowhere".to_string()
        }
    );
}

#[test]
fn unused_arguments_are_never_forced() {
    // `t` discards its second argument, which would fail if evaluated.
    assert_eq!(eval_std("ap ap t 1 ap 1 2").unwrap(), Value::number(1));
    assert_eq!(eval_std("ap ap f undefined 2").unwrap(), Value::number(2));
}

#[test]
fn bindings_may_refer_forward() {
    let mut program = Program::standard();
    bind(&mut program, "a", "ap inc b");
    bind(&mut program, "b", "41");
    assert_eq!(eval(&mut program, "a").unwrap(), Value::number(42));
}

#[test]
fn forced_apply_does_not_rerun_builtin() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap ap add 2 3");
    let mut transport = OfflineTransport;
    let mut evaluator = program.evaluator(&mut transport).with_counters();

    assert_eq!(evaluator.evaluate(id).unwrap(), Value::number(5));
    let first = evaluator.counters().unwrap().clone();
    assert_eq!(first.builtin_calls, 1);

    assert_eq!(evaluator.evaluate(id).unwrap(), Value::number(5));
    let second = evaluator.counters().unwrap();
    assert_eq!(second.builtin_calls, first.builtin_calls);
    assert_eq!(second.expressions_forced, first.expressions_forced + 1);
}

#[test]
fn forced_apply_releases_operands() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap ap mul 6 7");
    program.evaluator(&mut OfflineTransport).evaluate(id).unwrap();
    assert_eq!(
        program.arena.kind(id),
        &gx_ir::ExprKind::Apply(gx_ir::Thunk::Forced(Value::number(42)))
    );
}

#[test]
fn references_cache_per_occurrence() {
    let mut program = Program::standard();
    bind(&mut program, "x", "ap ap add 1 2");
    let name = program.interner.get("x").unwrap();
    let first = program.arena.alloc_reference(name);
    let second = program.arena.alloc_reference(name);
    let bound = program.env.lookup(name).unwrap();

    program.evaluator(&mut OfflineTransport).evaluate(first).unwrap();

    assert_eq!(program.arena.cached(first), Some(&Value::number(3)));
    assert_eq!(program.arena.cached(second), None);
    assert_eq!(program.arena.cached(bound), Some(&Value::number(3)));
}

#[test]
fn shared_send_runs_once() {
    let mut program = Program::standard();
    bind(&mut program, "x", "ap send 0");
    let id = expr(&mut program, "ap ap add ap car x ap car x");

    let mut calls = 0;
    let mut transport = |_: &str| {
        calls += 1;
        // [5]
        Ok::<_, TransportError>("110110010100".to_string())
    };
    let value = program.evaluator(&mut transport).evaluate(id).unwrap();
    drop(transport);

    assert_eq!(value, Value::number(10));
    assert_eq!(calls, 1);
}

#[test]
fn send_is_audited() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap send ap ap cons 0 nil");
    let log = shared_audit_log();
    let mut transport = ScriptedTransport::new(["010"]);

    let value = program
        .evaluator(&mut transport)
        .with_audit_log(Arc::clone(&log))
        .evaluate(id)
        .unwrap();

    assert_eq!(value, Value::number(0));
    assert_eq!(transport.requests(), ["1101000"]);
    assert_eq!(
        log.records(),
        vec![SendRecord {
            request: Data::list([Data::from(0)]),
            response: Data::from(0),
        }]
    );
}

#[test]
fn send_without_transport_fails() {
    let err = eval_std("ap send 0").unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TransportFailure(TransportError::Offline)
    );
}

#[test]
fn malformed_reply_is_reported() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap send 0");
    let mut transport = ScriptedTransport::new(["0110"]);
    let err = program
        .evaluator(&mut transport)
        .evaluate(id)
        .unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::MalformedSignal(_)));
}

#[test]
fn reify_builds_nested_lists() {
    let mut program = Program::standard();
    let id = expr(
        &mut program,
        "ap ap cons ap ap cons 1 2 ap ap cons ap ap cons nil nil nil",
    );
    let data = program.evaluator(&mut OfflineTransport).reify(id).unwrap();
    assert_eq!(
        data,
        Data::list([
            Data::pair(1, 2),
            Data::cons(Data::Nil, Data::Nil),
        ])
    );
}

#[test]
fn reify_rejects_non_lists() {
    let mut program = Program::standard();
    let id = expr(&mut program, "i");
    let err = program
        .evaluator(&mut OfflineTransport)
        .reify(id)
        .unwrap_err();
    assert_eq!(err.message, "isnil probe yielded neither sentinel");
}

#[test]
fn reify_handles_long_lists() {
    let mut program = Program::standard();
    let items: Vec<Data> = (0..250_000).map(Data::from).collect();
    let list = Data::list(items.clone());
    let id = program.arena.alloc_data(&list);
    let data = program.evaluator(&mut OfflineTransport).reify(id).unwrap();
    assert_eq!(data.list_elements().map(|e| e.len()), Some(items.len()));
    assert!(data == Data::list(items));
}

#[test]
fn reify_and_modulate_long_computed_lists() {
    let mut program = Program::standard();
    bind(
        &mut program,
        "countdown",
        "ap ap s ap ap c if0 nil ap ap s cons ap ap b countdown dec",
    );
    let id = expr(&mut program, "ap countdown 200000");
    let mut transport = OfflineTransport;
    let mut evaluator = program.evaluator(&mut transport);

    let data = evaluator.reify(id).unwrap();
    let elements = data.list_elements().unwrap();
    assert_eq!(elements.len(), 200_000);
    assert_eq!(elements[0], &Data::from(200_000));
    assert_eq!(elements[199_999], &Data::from(1));

    let bits = evaluator.modulate(id).unwrap();
    assert!(gx_modem::demodulate(&bits).unwrap() == data);
}

#[test]
fn list_elements_walks_the_spine() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap ap cons 1 ap ap cons ap inc 1 nil");
    let mut transport = OfflineTransport;
    let mut evaluator = program.evaluator(&mut transport);
    let items = evaluator.list_elements(id).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(evaluator.evaluate(items[1]).unwrap(), Value::number(2));
}

#[test]
fn is_nil_rejects_numbers() {
    let mut program = Program::standard();
    let id = expr(&mut program, "7");
    let err = program
        .evaluator(&mut OfflineTransport)
        .is_nil(id)
        .unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn modulate_an_expression() {
    let mut program = Program::standard();
    let id = expr(&mut program, "ap ap cons 1 nil");
    let bits = program.evaluator(&mut OfflineTransport).modulate(id).unwrap();
    assert_eq!(bits, "110110000100");
}

#[test]
fn demodulate_into_the_graph() {
    let mut program = Program::standard();
    let id = demodulate(&mut program.arena, "1101100001110110001000").unwrap();
    let head = expr(&mut program, "car");
    let call = program.arena.apply(head, id);
    let value = program.evaluator(&mut OfflineTransport).evaluate(call).unwrap();
    assert_eq!(value, Value::number(1));
}

#[test]
fn errors_carry_notes() {
    let err = errors::division_by_zero().with_note("while evaluating `galaxy`");
    assert_eq!(
        err.to_string(),
        "division by zero\n  note: while evaluating `galaxy`"
    );
}
