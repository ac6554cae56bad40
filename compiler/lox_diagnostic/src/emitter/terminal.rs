//! Human-readable output with optional ANSI color.

use std::io::{self, Write};

use crate::{Diagnostic, Location, Severity};

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn parse(s: &str) -> Option<ColorMode> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Writes each diagnostic on its own line in the classic Lox format.
///
/// With `show_codes`, the error code follows the severity
/// (`[line 1] Error[E1002] at end: ...`).
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    show_codes: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            show_codes: false,
        }
    }

    #[must_use]
    pub fn show_codes(mut self, show: bool) -> Self {
        self.show_codes = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = write!(self.writer, "[line {}] ", diagnostic.line);

        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&diagnostic.severity.to_string(), color);
        if self.show_codes {
            let code = format!("[{}]", diagnostic.code);
            self.write_colored(&code, colors::DIM);
        }

        match &diagnostic.location {
            Location::Line => {}
            Location::AtEnd => {
                let _ = write!(self.writer, " at end");
            }
            Location::AtLexeme(lexeme) => {
                let _ = write!(self.writer, " at '{lexeme}'");
            }
        }
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn finish(&mut self) {
        let _ = self.writer.flush();
    }
}
