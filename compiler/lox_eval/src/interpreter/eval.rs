//! Expression evaluation.

use std::rc::Rc;

use lox_ir::{Expr, ExprKind, LiteralValue, Token, TokenKind};
use lox_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::environment::Slot;
use crate::errors::{AtLine, EvalError, EvalErrorKind, EvalResult};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::value::{FunctionKind, LoxFunction};
use crate::Value;

impl Interpreter {
    pub(crate) fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal(lit)),
            ExprKind::Grouping(inner) => self.eval(inner),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                evaluate_unary(op.kind, &value).at_line(op.line)
            }
            ExprKind::Binary { left, op, right } => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                evaluate_binary(op.kind, &lhs, &rhs).at_line(op.line)
            }
            ExprKind::Logical { left, op, right } => {
                let lhs = self.eval(left)?;
                let short_circuits = if op.kind == TokenKind::Or {
                    lhs.is_truthy()
                } else {
                    !lhs.is_truthy()
                };
                if short_circuits {
                    Ok(lhs)
                } else {
                    self.eval(right)
                }
            }
            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            ExprKind::Variable { name } => self.look_up(name, expr.id),
            ExprKind::Assign { name, op, value } => {
                let rhs = self.eval(value)?;
                let value = match op.kind.compound_base() {
                    Some(base) => {
                        let current = self.look_up(name, expr.id)?;
                        evaluate_binary(base, &current, &rhs).at_line(op.line)?
                    }
                    None => rhs,
                };
                self.assign_variable(name, expr.id, value.clone())?;
                Ok(value)
            }
            ExprKind::Call {
                callee,
                paren,
                args,
            } => {
                let callee = self.eval(callee)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.call_value(&callee, values, paren.line)
            }
            ExprKind::Get { object, name } => {
                let object = self.eval(object)?;
                self.get_property(&object, name)
            }
            ExprKind::Set {
                object,
                name,
                op,
                value,
            } => {
                let object = self.eval(object)?;
                self.set_property(&object, name, op, value)
            }
            ExprKind::This { keyword } => self.look_up(keyword, expr.id),
            ExprKind::Super { keyword, method } => self.super_method(expr, keyword, method),
            ExprKind::Lambda(decl) => {
                let function = LoxFunction::new(Rc::clone(decl), self.env.clone(), FunctionKind::Lambda);
                Ok(Value::Function(Rc::new(function)))
            }
        }
    }

    /// `super.method`: looked up from the superclass, bound to the current
    /// `this`.
    fn super_method(&self, expr: &Expr, keyword: &Token, method: &Token) -> EvalResult {
        let Some(depth) = self.bindings.depth(expr.id) else {
            return Err(EvalError::defect("'super' was not resolved", keyword.line));
        };
        let superclass = match self.look_up_str("super", expr.id, keyword.line)? {
            Value::Class(class) => class,
            other => {
                return Err(EvalError::defect(
                    format!("'super' is bound to {}", other.type_name()),
                    keyword.line,
                ))
            }
        };
        // `this` lives in the frame just inside the one holding `super`.
        let this_depth = depth.checked_sub(1).ok_or_else(|| {
            EvalError::defect("'super' resolved to the innermost frame", keyword.line)
        })?;
        let this = self
            .resolved_frame("this", this_depth, keyword.line)
            .ok()
            .and_then(|frame| frame.get_here("this"));
        let Some(Slot::Value(this)) = this else {
            return Err(EvalError::defect("no 'this' next to 'super'", keyword.line));
        };
        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Value::Function(Rc::new(found.bind(this)))),
            None => Err(EvalError::new(
                EvalErrorKind::UndefinedProperty {
                    name: method.lexeme.clone(),
                },
                method.line,
            )),
        }
    }
}

fn literal(lit: &LiteralValue) -> Value {
    match lit {
        LiteralValue::Nil => Value::Nil,
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Str(s) => Value::Str(Rc::clone(s)),
    }
}
