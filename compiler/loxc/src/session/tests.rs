use pretty_assertions::assert_eq;

use lox_eval::{buffer_handler, EvalErrorKind};
use lox_resolve::ResolverConfig;

use super::*;

fn session() -> Session {
    Session::new(buffer_handler(), SessionConfig::default())
}

fn strict_session() -> Session {
    Session::new(
        buffer_handler(),
        SessionConfig {
            resolver: ResolverConfig { strict: true },
            ..SessionConfig::default()
        },
    )
}

fn messages(outcome: &RunOutcome) -> Vec<String> {
    match outcome {
        RunOutcome::CompileErrors(diagnostics) => {
            diagnostics.iter().map(ToString::to_string).collect()
        }
        other => panic!("expected compile errors, got {other:?}"),
    }
}

#[test]
fn runs_a_program() {
    let mut session = session();
    assert_eq!(session.run_source("print 1 + 2;"), RunOutcome::Ok);
    assert_eq!(session.print_handler().get_output(), "3\n");
}

#[test]
fn globals_persist_between_runs() {
    let mut session = session();
    assert!(session.run_source("var a = 1; fun add(n) { return a + n; }").is_ok());
    assert!(session.run_source("print add(2);").is_ok());
    assert_eq!(session.print_handler().get_output(), "3\n");
}

#[test]
fn compile_errors_from_every_stage_are_collected_in_line_order() {
    let mut session = session();
    let outcome = session.run_source("print @;\nprint 2");
    assert_eq!(
        messages(&outcome),
        vec![
            "[line 1] Error: Unexpected character.",
            "[line 1] Error at ';': Expect expression.",
            "[line 2] Error at end: Expect ';' after value.",
        ]
    );
    assert_eq!(outcome.exit_code(), exit_code::DATA_ERR);
}

#[test]
fn compile_errors_stop_execution() {
    let mut session = session();
    let outcome = session.run_source("print \"before\";\nreturn 1;");
    assert_eq!(
        messages(&outcome),
        vec!["[line 2] Error at 'return': Cannot return from top-level code."]
    );
    assert_eq!(session.print_handler().get_output(), "");
}

#[test]
fn runtime_errors_keep_earlier_output() {
    let mut session = session();
    let outcome = session.run_source("print \"a\";\nprint -nil;");
    let RunOutcome::RuntimeError(err) = &outcome else {
        panic!("expected a runtime error, got {outcome:?}");
    };
    assert_eq!(err.kind, EvalErrorKind::OperandNotNumber);
    assert_eq!(err.line, 2);
    assert_eq!(outcome.exit_code(), exit_code::SOFTWARE);
    assert_eq!(session.print_handler().get_output(), "a\n");
}

#[test]
fn strict_mode_reports_unused_locals() {
    let mut session = strict_session();
    let outcome = session.run_source("{ var unused = 1; }");
    assert_eq!(
        messages(&outcome),
        vec!["[line 1] Error at 'unused': Variable with this name is never used."]
    );
    assert!(session.run_source("{ var used = 1; print used; }").is_ok());
}

#[test]
fn repl_echoes_expression_values() {
    let mut session = session();
    assert!(session.run_repl_line("1 + 2").is_ok());
    assert!(session.run_repl_line("\"a\" + \"b\"").is_ok());
    assert!(session.run_repl_line("nil").is_ok());
    assert_eq!(session.print_handler().get_output(), "3\nab\nnil\n");
}

#[test]
fn repl_runs_statements_without_echo() {
    let mut session = session();
    assert!(session.run_repl_line("var x = 41;").is_ok());
    assert!(session.run_repl_line("x += 1;").is_ok());
    assert!(session.run_repl_line("x").is_ok());
    assert_eq!(session.print_handler().get_output(), "42\n");
}

#[test]
fn repl_reports_statement_errors_not_expression_errors() {
    let mut session = session();
    let outcome = session.run_repl_line("print");
    assert_eq!(
        messages(&outcome),
        vec!["[line 1] Error at end: Expect expression."]
    );
}

#[test]
fn repl_continues_after_errors() {
    let mut session = session();
    assert!(matches!(
        session.run_repl_line("undefined_thing"),
        RunOutcome::RuntimeError(_)
    ));
    assert!(session.run_repl_line("fun f() { return \"still here\"; }").is_ok());
    assert!(session.run_repl_line("f()").is_ok());
    assert_eq!(session.print_handler().get_output(), "still here\n");
}

#[test]
fn repl_closures_outlive_their_line() {
    let mut session = session();
    assert!(session
        .run_repl_line("fun make() { var n = 0; return fun () { n += 1; return n; }; }")
        .is_ok());
    assert!(session.run_repl_line("var next = make();").is_ok());
    assert!(session.run_repl_line("next();").is_ok());
    assert!(session.run_repl_line("next()").is_ok());
    assert_eq!(session.print_handler().get_output(), "2\n");
}

#[test]
fn exit_codes() {
    assert_eq!(RunOutcome::Ok.exit_code(), 0);
    assert_eq!(RunOutcome::CompileErrors(Vec::new()).exit_code(), 65);
    assert!(!RunOutcome::CompileErrors(Vec::new()).is_ok());
}
