//! Run-time errors.
//!
//! Every failure aborts the running program (a REPL keeps its session). The
//! `Defect` kind marks states the resolver should have made impossible; it is
//! reported separately from user errors.

use thiserror::Error;

pub type EvalResult<T = crate::Value> = Result<T, EvalError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalErrorKind {
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String },
    #[error("Uninitialized variable '{name}'.")]
    UninitializedVariable { name: String },
    #[error("Undefined property '{name}'.")]
    UndefinedProperty { name: String },
    #[error("Only instances have fields.")]
    FieldsOnNonInstance,
    #[error("Only instances have properties.")]
    PropertiesOnNonInstance,
    #[error("Can only call functions and classes.")]
    NotCallable,
    #[error("Expected {expected} arguments but got {got}.")]
    ArityMismatch { expected: usize, got: usize },
    #[error("Superclass must be a class.")]
    SuperclassNotClass,
    #[error("Operand must be a number.")]
    OperandNotNumber,
    #[error("Operands must be numbers.")]
    OperandsNotNumbers,
    #[error("Operands must be two numbers or two strings.")]
    InvalidAddOperands,
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Stack overflow.")]
    StackOverflow { limit: usize },
    #[error("internal error: {0}")]
    Defect(String),
}

/// A run-time error and the source line it was raised at.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}\n[line {line}]")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub line: u32,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, line: u32) -> Self {
        EvalError { kind, line }
    }

    pub fn defect(message: impl Into<String>, line: u32) -> Self {
        EvalError::new(EvalErrorKind::Defect(message.into()), line)
    }

    /// The message without the line suffix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn is_defect(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Defect(_))
    }
}

/// Attach a line to an operator failure.
pub(crate) trait AtLine<T> {
    fn at_line(self, line: u32) -> EvalResult<T>;
}

impl<T> AtLine<T> for Result<T, EvalErrorKind> {
    #[inline]
    fn at_line(self, line: u32) -> EvalResult<T> {
        self.map_err(|kind| EvalError::new(kind, line))
    }
}
