//! Machine-readable output.

use std::io::Write;

use crate::{Diagnostic, Location};

use super::{escape_json, DiagnosticEmitter};

/// Emits a JSON array of diagnostic objects; `finish` closes the array.
pub struct JsonEmitter<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter { writer, count: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Built by hand to keep serde out of the dependency graph.
        let _ = if self.count == 0 {
            writeln!(self.writer, "[")
        } else {
            writeln!(self.writer, ",")
        };
        self.count += 1;

        let _ = write!(
            self.writer,
            "  {{\"code\": \"{}\", \"severity\": \"{}\", \"line\": {}, ",
            diagnostic.code,
            diagnostic.severity.to_string().to_lowercase(),
            diagnostic.line,
        );
        match &diagnostic.location {
            Location::Line => {
                let _ = write!(self.writer, "\"at\": null, ");
            }
            Location::AtEnd => {
                let _ = write!(self.writer, "\"at\": \"<eof>\", ");
            }
            Location::AtLexeme(lexeme) => {
                let _ = write!(self.writer, "\"at\": \"{}\", ", escape_json(lexeme));
            }
        }
        if let Some(span) = diagnostic.span {
            let _ = write!(
                self.writer,
                "\"span\": [{}, {}], ",
                span.start, span.end
            );
        }
        let _ = write!(
            self.writer,
            "\"message\": \"{}\"}}",
            escape_json(&diagnostic.message)
        );
    }

    fn finish(&mut self) {
        let _ = if self.count == 0 {
            writeln!(self.writer, "[]")
        } else {
            writeln!(self.writer, "\n]")
        };
        let _ = self.writer.flush();
    }
}
