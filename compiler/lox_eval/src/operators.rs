//! Arithmetic, comparison and equality on values.
//!
//! Pure functions over already-evaluated operands; the interpreter handles
//! short-circuiting and the comma operator before reaching here.

use std::rc::Rc;

use lox_ir::TokenKind;

use crate::errors::EvalErrorKind;
use crate::Value;

/// Apply a binary operator. `op` is the plain (non-compound) operator kind.
pub fn evaluate_binary(op: TokenKind, left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    match op {
        TokenKind::Plus => add(left, right),
        TokenKind::Minus => numbers(left, right).map(|(a, b)| Value::Number(a - b)),
        TokenKind::Star => numbers(left, right).map(|(a, b)| Value::Number(a * b)),
        TokenKind::Slash => {
            let (a, b) = numbers(left, right)?;
            if b == 0.0 {
                Err(EvalErrorKind::DivisionByZero)
            } else {
                Ok(Value::Number(a / b))
            }
        }
        TokenKind::Greater => numbers(left, right).map(|(a, b)| Value::Bool(a > b)),
        TokenKind::GreaterEqual => numbers(left, right).map(|(a, b)| Value::Bool(a >= b)),
        TokenKind::Less => numbers(left, right).map(|(a, b)| Value::Bool(a < b)),
        TokenKind::LessEqual => numbers(left, right).map(|(a, b)| Value::Bool(a <= b)),
        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),
        TokenKind::Comma => Ok(right.clone()),
        other => Err(EvalErrorKind::Defect(format!(
            "'{}' is not a binary operator",
            other.display_name()
        ))),
    }
}

/// Apply a prefix operator.
pub fn evaluate_unary(op: TokenKind, operand: &Value) -> Result<Value, EvalErrorKind> {
    match op {
        TokenKind::Minus => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(EvalErrorKind::OperandNotNumber),
        },
        TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
        other => Err(EvalErrorKind::Defect(format!(
            "'{}' is not a unary operator",
            other.display_name()
        ))),
    }
}

/// Numbers add, strings concatenate; a string with anything else
/// concatenates the other operand's printed form.
fn add(left: &Value, right: &Value) -> Result<Value, EvalErrorKind> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(concat(a, b)),
        (Value::Str(a), other) => Ok(concat(a, &other.to_string())),
        (other, Value::Str(b)) => Ok(concat(&other.to_string(), b)),
        _ => Err(EvalErrorKind::InvalidAddOperands),
    }
}

fn concat(a: &str, b: &str) -> Value {
    let mut s = String::with_capacity(a.len() + b.len());
    s.push_str(a);
    s.push_str(b);
    Value::Str(Rc::from(s))
}

#[inline]
fn numbers(left: &Value, right: &Value) -> Result<(f64, f64), EvalErrorKind> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(EvalErrorKind::OperandsNotNumbers),
    }
}
