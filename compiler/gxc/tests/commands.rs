//! End-to-end tests of the command cores.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use gx_eval::{Data, EvalErrorKind, Picture, Point, ScriptedTransport};
use gxc::commands::{
    demodulate_text, eval_source, interact_source, modulate_text, parse_interact_options,
    CommandError, InteractOptions,
};
use pretty_assertions::assert_eq;

/// `counter s _ = [eq 0 s 1 0, inc s, [[(s . s)]]]`
const COUNTER: &str = "\
cn = ap ap c cons nil
pt = ap ap s cons i
d = ap ap b cn ap ap b cn pt
flag = ap ap c ap ap c ap eq 0 1 0
r = ap ap s ap ap b cons inc ap ap b cn d
q = ap ap s ap ap b cons flag r
galaxy = ap ap b t q
";

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn eval_defaults_to_galaxy() {
    let source = "galaxy = ap ap mul :1 :1\n:1 = 12\n";
    assert_eq!(eval_source(source, "galaxy").unwrap(), "144");
}

#[test]
fn eval_prints_data_as_program_text() {
    let out = eval_source("x = 3\n", "ap ap cons x ap ap cons 4 nil").unwrap();
    assert_eq!(out, "ap ap cons 3 ap ap cons 4 nil");
}

#[test]
fn eval_prints_functions_by_name() {
    assert_eq!(eval_source("", "ap add 1").unwrap(), "<add applied to 1>");
}

#[test]
fn eval_reports_file_and_expression_errors_apart() {
    assert!(matches!(
        eval_source("x 1\n", "x").unwrap_err(),
        CommandError::Parse(_)
    ));
    assert!(matches!(
        eval_source("", "ap inc").unwrap_err(),
        CommandError::ParseExpr(_)
    ));
}

#[test]
fn modulate_and_demodulate() {
    assert_eq!(modulate_text("ap ap cons 1 nil").unwrap(), "110110000100");
    assert_eq!(modulate_text("ap neg 1").unwrap(), "10100001");
    assert_eq!(demodulate_text("110110000100\n").unwrap(), "ap ap cons 1 nil");
    assert!(matches!(
        demodulate_text("012").unwrap_err(),
        CommandError::Signal(_)
    ));
}

#[test]
fn interact_options() {
    let options = parse_interact_options(&args(&[
        "--protocol=counter",
        "--state=ap ap cons 1 nil",
        "--point=3,-4",
        "--max-sends=10",
        "--profile",
    ]))
    .unwrap();
    assert_eq!(options.config.protocol, "counter");
    assert_eq!(options.state.as_deref(), Some("ap ap cons 1 nil"));
    assert_eq!(options.point, (3, -4));
    assert_eq!(options.config.max_sends, Some(10));
    assert!(options.config.profile);

    assert!(matches!(
        parse_interact_options(&args(&["--point=3"])).unwrap_err(),
        CommandError::Usage(_)
    ));
    assert!(matches!(
        parse_interact_options(&args(&["--bogus"])).unwrap_err(),
        CommandError::Usage(_)
    ));
}

#[test]
fn interact_step_with_scripted_peer() {
    let options = InteractOptions {
        state: Some("0".to_string()),
        ..InteractOptions::default()
    };
    let mut transport = ScriptedTransport::new(["00"]);
    let output = interact_source(COUNTER, &options, &mut transport).unwrap();

    assert_eq!(output.frame.state, Data::from(2));
    assert_eq!(
        output.frame.pictures,
        vec![Picture::new(vec![Point::new(1, 1)])]
    );
    assert_eq!(output.sends.len(), 1);
    assert_eq!(output.sends[0].response, Data::Nil);
    assert_eq!(output.display(), "origin (1, 1), 1x1\n#\nstate: 2\n");
}

#[test]
fn interact_respects_send_limit() {
    let mut options = InteractOptions {
        state: Some("0".to_string()),
        ..InteractOptions::default()
    };
    options.config.max_sends = Some(0);
    let err = interact_source(COUNTER, &options, &mut ScriptedTransport::new(["00"])).unwrap_err();
    let CommandError::Eval(err) = err else {
        panic!("expected an evaluation error, got {err:?}");
    };
    assert_eq!(err.kind, EvalErrorKind::SendLimitExceeded { limit: 0 });
}
