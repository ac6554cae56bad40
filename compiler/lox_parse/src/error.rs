//! Parse errors.
//!
//! A [`ParseError`] unwinds the current declaration via `?`; the declaration
//! loop turns it into a [`Diagnostic`] and resynchronizes. Errors that do not
//! need to unwind (invalid assignment target, too many arguments) are pushed
//! straight to the parser's diagnostic list instead.

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::Token;

#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    /// Token the error points at.
    pub token: Token,
}

impl ParseError {
    pub fn new(code: ErrorCode, token: &Token, message: impl Into<String>) -> Self {
        ParseError {
            code,
            message: message.into(),
            token: token.clone(),
        }
    }

    /// A binary operator that appeared with nothing on its left.
    pub fn missing_left_operand(op: &Token) -> Self {
        ParseError::new(ErrorCode::E1004, op, "Unary operator not supported.")
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error_at(self.code, &self.token, self.message)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        err.into_diagnostic()
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;
