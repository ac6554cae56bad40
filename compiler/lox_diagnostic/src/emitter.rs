//! Diagnostic emitters.
//!
//! - [`TerminalEmitter`]: the classic `[line N] Error at 'x': msg` lines,
//!   optionally colored
//! - [`JsonEmitter`]: a JSON array for editors and scripts

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::Diagnostic;

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Finish output (close arrays, flush buffers).
    fn finish(&mut self);
}

/// Escape a string for inclusion in a JSON string literal.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}
