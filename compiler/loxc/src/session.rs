//! One interpreter session: the full pipeline over source text.
//!
//! ```text
//! source ──► lex ──► parse ──► resolve ──► interpret
//!             └────────┴──────────┴── diagnostics (any error stops here)
//! ```
//!
//! Globals persist between runs on the same session, which is what the REPL
//! relies on.

use lox_diagnostic::{Diagnostic, DiagnosticConfig, DiagnosticQueue};
use lox_eval::{EvalError, Interpreter, InterpreterConfig, SharedPrintHandler};
use lox_lexer::LexOutput;
use lox_resolve::ResolverConfig;

/// Exit codes, following the BSD `sysexits` convention.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const USAGE: i32 = 64;
    pub const DATA_ERR: i32 = 65;
    pub const SOFTWARE: i32 = 70;
    pub const IO_ERR: i32 = 74;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub resolver: ResolverConfig,
    pub diagnostics: DiagnosticConfig,
    pub interpreter: InterpreterConfig,
}

/// How one run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Ok,
    /// Lexer, parser or resolver errors, in line order. Nothing ran.
    CompileErrors(Vec<Diagnostic>),
    RuntimeError(EvalError),
    /// The interpreter reached a state resolution should have ruled out.
    Defect(EvalError),
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Ok => exit_code::OK,
            RunOutcome::CompileErrors(_) => exit_code::DATA_ERR,
            RunOutcome::RuntimeError(_) | RunOutcome::Defect(_) => exit_code::SOFTWARE,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RunOutcome::Ok)
    }

    fn from_eval(result: Result<(), EvalError>) -> Self {
        match result {
            Ok(()) => RunOutcome::Ok,
            Err(err) if err.is_defect() => RunOutcome::Defect(err),
            Err(err) => RunOutcome::RuntimeError(err),
        }
    }
}

pub struct Session {
    interpreter: Interpreter,
    print: SharedPrintHandler,
    config: SessionConfig,
}

impl Session {
    pub fn new(print: SharedPrintHandler, config: SessionConfig) -> Self {
        Session {
            interpreter: Interpreter::new(print.clone(), config.interpreter.clone()),
            print,
            config,
        }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Run a whole program.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn run_source(&mut self, source: &str) -> RunOutcome {
        let lexed = lox_lexer::lex(source);
        self.run_statements(lexed)
    }

    /// Run one REPL line.
    ///
    /// A line that parses as a single expression is evaluated and its value
    /// printed; anything else runs as statements. Expression-mode
    /// diagnostics are never shown, the statement parse reports instead.
    pub fn run_repl_line(&mut self, line: &str) -> RunOutcome {
        let lexed = lox_lexer::lex(line);
        if lexed.diagnostics.is_empty() {
            let parsed = lox_parse::parse_expression(&lexed.tokens);
            if let Some(expr) = parsed.expr {
                tracing::debug!("repl line is an expression");
                let resolved = lox_resolve::resolve_expr(&expr, self.config.resolver);
                if resolved.has_errors() {
                    return RunOutcome::CompileErrors(self.collect(resolved.diagnostics));
                }
                return match self.interpreter.evaluate_repl(&expr, &resolved.bindings) {
                    Ok(value) => {
                        self.print.println(&value.to_string());
                        RunOutcome::Ok
                    }
                    Err(err) => RunOutcome::from_eval(Err(err)),
                };
            }
        }
        self.run_statements(lexed)
    }

    fn run_statements(&mut self, lexed: LexOutput) -> RunOutcome {
        let mut queue = DiagnosticQueue::with_config(self.config.diagnostics);
        queue.extend(lexed.diagnostics);

        let parsed = lox_parse::parse(&lexed.tokens);
        queue.extend(parsed.diagnostics);
        let Some(stmts) = parsed.statements else {
            return RunOutcome::CompileErrors(queue.flush());
        };
        if queue.has_errors() {
            return RunOutcome::CompileErrors(queue.flush());
        }

        let resolved = lox_resolve::resolve(&stmts, self.config.resolver);
        queue.extend(resolved.diagnostics);
        if queue.has_errors() {
            return RunOutcome::CompileErrors(queue.flush());
        }

        RunOutcome::from_eval(self.interpreter.interpret(&stmts, &resolved.bindings))
    }

    fn collect(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        let mut queue = DiagnosticQueue::with_config(self.config.diagnostics);
        queue.extend(diagnostics);
        queue.flush()
    }
}

#[cfg(test)]
mod tests;
