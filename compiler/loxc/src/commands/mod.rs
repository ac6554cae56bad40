//! Command handlers for the `lox` binary.
//!
//! Each handler returns the process exit code instead of exiting, so the
//! binary stays a thin argument parser and the handlers stay testable.

use std::path::Path;

use lox_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use lox_eval::{stdout_handler, EvalError};
use lox_resolve::ResolverConfig;

use crate::{DriverError, RunOutcome, Session, SessionConfig};

mod args;
mod debug;
mod repl;
mod run;

pub use args::{parse_args, Command, Invocation, USAGE};
pub use debug::{lex_file, parse_file, render_ast, render_tokens};
pub use repl::{repl, run_repl};
pub use run::run_file;

/// How compile-time diagnostics are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<OutputFormat> {
        match s {
            "terminal" | "text" => Some(OutputFormat::Terminal),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub strict: bool,
    pub format: OutputFormat,
    pub color: ColorMode,
}

impl CliOptions {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            resolver: ResolverConfig {
                strict: self.strict,
            },
            ..SessionConfig::default()
        }
    }

    /// A session printing to stdout.
    pub fn session(&self) -> Session {
        Session::new(stdout_handler(), self.session_config())
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|err| DriverError::read(path, err))
}

/// Write diagnostics to stderr in the chosen format.
pub fn report_diagnostics(diagnostics: &[Diagnostic], options: &CliOptions) {
    match options.format {
        OutputFormat::Terminal => {
            let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
            let mut emitter = TerminalEmitter::stderr(options.color, is_tty);
            emitter.emit_all(diagnostics);
            emitter.finish();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(std::io::stderr());
            emitter.emit_all(diagnostics);
            emitter.finish();
        }
    }
}

pub(crate) fn report_runtime_error(err: &EvalError) {
    eprintln!("{err}");
}

/// Print whatever went wrong in `outcome` and return its exit code.
pub fn report_outcome(outcome: &RunOutcome, options: &CliOptions) -> i32 {
    match outcome {
        RunOutcome::Ok => {}
        RunOutcome::CompileErrors(diagnostics) => report_diagnostics(diagnostics, options),
        RunOutcome::RuntimeError(err) | RunOutcome::Defect(err) => report_runtime_error(err),
    }
    outcome.exit_code()
}
