//! Compile-time diagnostics for Lox.
//!
//! Replaces a global "had error" flag: the lexer, parser and resolver each
//! return their diagnostics as values, and the driver decides what to do with
//! them. A single error-severity diagnostic from any stage suppresses
//! execution.

mod diagnostic;
mod emitter;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};

/// True if any diagnostic in `diags` is an error (not a warning).
pub fn has_errors(diags: &[Diagnostic]) -> bool {
    diags.iter().any(Diagnostic::is_error)
}
