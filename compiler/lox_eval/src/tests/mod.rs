//! End-to-end evaluator tests over lexed, parsed and resolved source.
//!
//! - `programs`: statements, scoping, closures, operators
//! - `classes`: instances, methods, getters, statics, inheritance
//! - `errors`: run-time errors and recovery

mod classes;
mod programs;

use lox_resolve::{resolve, ResolverConfig};

use crate::{buffer_handler, EvalError, Interpreter, InterpreterConfig};

/// A session with captured output.
struct Harness {
    interpreter: Interpreter,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(InterpreterConfig {
            verify_bindings: true,
            ..InterpreterConfig::default()
        })
    }

    fn with_config(config: InterpreterConfig) -> Self {
        Harness {
            interpreter: Interpreter::new(buffer_handler(), config),
        }
    }

    /// Run `source`; returns everything printed so far in this call.
    fn run(&mut self, source: &str) -> Result<String, (String, EvalError)> {
        let lexed = lox_lexer::lex(source);
        assert!(lexed.diagnostics.is_empty(), "{:?}", lexed.diagnostics);
        let parsed = lox_parse::parse(&lexed.tokens);
        let Some(stmts) = parsed.statements else {
            panic!("parse errors: {:?}", parsed.diagnostics);
        };
        let resolved = resolve(&stmts, ResolverConfig::default());
        assert!(resolved.diagnostics.is_empty(), "{:?}", resolved.diagnostics);

        let print = self.interpreter.print_handler().clone();
        print.clear();
        let result = self.interpreter.interpret(&stmts, &resolved.bindings);
        let output = print.get_output();
        result.map(|()| output.clone()).map_err(|err| (output, err))
    }
}

/// Output of a program expected to succeed.
fn output(source: &str) -> String {
    match Harness::new().run(source) {
        Ok(out) => out,
        Err((out, err)) => panic!("runtime error {err}\noutput so far:\n{out}"),
    }
}

/// The run-time error a program ends with, rendered.
fn runtime_error(source: &str) -> String {
    match Harness::new().run(source) {
        Ok(out) => panic!("expected a runtime error, got output:\n{out}"),
        Err((_, err)) => err.to_string(),
    }
}
