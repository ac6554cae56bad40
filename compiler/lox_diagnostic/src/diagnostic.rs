//! The [`Diagnostic`] type every compile-time stage reports through.

use std::fmt;

use lox_ir::{Span, Token, TokenKind};

use crate::ErrorCode;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// Where on its line a diagnostic points.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Location {
    /// Lexer errors: the line is all we know.
    Line,
    /// At the end of input.
    AtEnd,
    /// At a token, identified by its lexeme.
    AtLexeme(String),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub line: u32,
    pub location: Location,
    pub span: Option<Span>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// An error reported at a line only.
    pub fn error(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: message.into(),
            line,
            location: Location::Line,
            span: None,
            notes: Vec::new(),
        }
    }

    /// An error reported at `token`: `at end` for EOF, `at 'lexeme'` otherwise.
    pub fn error_at(code: ErrorCode, token: &Token, message: impl Into<String>) -> Self {
        Diagnostic::error(code, message, token.line).at_token(token)
    }

    #[must_use]
    pub fn at_token(mut self, token: &Token) -> Self {
        self.line = token.line;
        self.location = if token.kind == TokenKind::Eof {
            Location::AtEnd
        } else {
            Location::AtLexeme(token.lexeme.clone())
        };
        self.span = Some(token.span);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[must_use]
    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The classic one-line form: `[line 3] Error at 'x': message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] {}", self.line, self.severity)?;
        match &self.location {
            Location::Line => {}
            Location::AtEnd => write!(f, " at end")?,
            Location::AtLexeme(lexeme) => write!(f, " at '{lexeme}'")?,
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
