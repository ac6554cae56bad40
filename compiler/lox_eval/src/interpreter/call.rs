//! Calls, instantiation and property access.

use std::rc::Rc;

use lox_ir::{Expr, Token};

use super::{ExecOutcome, Interpreter};
use crate::environment::Slot;
use crate::errors::{AtLine, EvalError, EvalErrorKind, EvalResult};
use crate::operators::evaluate_binary;
use crate::value::{LoxClass, LoxFunction, LoxInstance};
use crate::Value;

impl Interpreter {
    pub(crate) fn call_value(&mut self, callee: &Value, args: Vec<Value>, line: u32) -> EvalResult {
        let arity = match callee {
            Value::Function(function) => function.arity(),
            Value::Native(native) => native.arity,
            Value::Class(class) => class.arity(),
            _ => return Err(EvalError::new(EvalErrorKind::NotCallable, line)),
        };
        if args.len() != arity {
            return Err(EvalError::new(
                EvalErrorKind::ArityMismatch {
                    expected: arity,
                    got: args.len(),
                },
                line,
            ));
        }
        match callee {
            Value::Function(function) => self.call_function(function, args, line),
            Value::Native(native) => Ok((native.func)(&args)),
            Value::Class(class) => self.instantiate(class, args, line),
            _ => Err(EvalError::new(EvalErrorKind::NotCallable, line)),
        }
    }

    /// Run a user function in a fresh frame over its closure.
    pub(crate) fn call_function(
        &mut self,
        function: &LoxFunction,
        args: Vec<Value>,
        line: u32,
    ) -> EvalResult {
        self.depth.enter().map_err(|exceeded| {
            EvalError::new(
                EvalErrorKind::StackOverflow {
                    limit: exceeded.limit,
                },
                line,
            )
        })?;
        tracing::trace!(function = %function, depth = self.depth.current(), "call");

        let env = function.closure.child();
        for (param, arg) in function.decl.params.iter().zip(args) {
            env.define_value(&param.lexeme, arg);
        }
        let outcome = self.exec_block(&function.decl.body, env);
        self.depth.exit();

        let value = match outcome? {
            ExecOutcome::Return(value) => value,
            ExecOutcome::Normal => Value::Nil,
            ExecOutcome::Break => {
                return Err(EvalError::defect(
                    format!("'break' escaped {function}"),
                    line,
                ))
            }
        };
        if function.is_initializer() {
            // `init` always yields the instance, however it returns.
            return match function.closure.get_here("this") {
                Some(Slot::Value(this)) => Ok(this),
                _ => Err(EvalError::defect("initializer is not bound", line)),
            };
        }
        Ok(value)
    }

    fn instantiate(&mut self, class: &Rc<LoxClass>, args: Vec<Value>, line: u32) -> EvalResult {
        let instance = Value::Instance(Rc::new(LoxInstance::new(Rc::clone(class))));
        if let Some(init) = class.find_method("init") {
            self.call_function(&init.bind(instance.clone()), args, line)?;
        }
        Ok(instance)
    }

    /// Fields, then methods, then getters on an instance; fields, then
    /// the class's own statics on a class.
    pub(crate) fn get_property(&mut self, object: &Value, name: &Token) -> EvalResult {
        match object {
            Value::Instance(instance) => {
                if let Some(value) = instance.field(&name.lexeme) {
                    return Ok(value);
                }
                if let Some(method) = instance.class.find_method(&name.lexeme) {
                    return Ok(bound(&method, object));
                }
                if let Some(getter) = instance.class.find_getter(&name.lexeme) {
                    return self.call_function(&getter.bind(object.clone()), Vec::new(), name.line);
                }
                Err(undefined_property(name))
            }
            Value::Class(class) => {
                if let Some(value) = class.field(&name.lexeme) {
                    return Ok(value);
                }
                if let Some(method) = class.find_static(&name.lexeme) {
                    return Ok(bound(&method, object));
                }
                Err(undefined_property(name))
            }
            _ => Err(EvalError::new(
                EvalErrorKind::PropertiesOnNonInstance,
                name.line,
            )),
        }
    }

    /// `object.name op value`. A compound operator reads the property
    /// through the normal get path first.
    pub(crate) fn set_property(
        &mut self,
        object: &Value,
        name: &Token,
        op: &Token,
        value: &Expr,
    ) -> EvalResult {
        if !matches!(object, Value::Instance(_) | Value::Class(_)) {
            return Err(EvalError::new(EvalErrorKind::FieldsOnNonInstance, name.line));
        }
        let rhs = self.eval(value)?;
        let value = match op.kind.compound_base() {
            Some(base) => {
                let current = self.get_property(object, name)?;
                evaluate_binary(base, &current, &rhs).at_line(op.line)?
            }
            None => rhs,
        };
        match object {
            Value::Instance(instance) => instance.set_field(&name.lexeme, value.clone()),
            Value::Class(class) => class.set_field(&name.lexeme, value.clone()),
            _ => {}
        }
        Ok(value)
    }
}

fn bound(method: &LoxFunction, this: &Value) -> Value {
    Value::Function(Rc::new(method.bind(this.clone())))
}

fn undefined_property(name: &Token) -> EvalError {
    EvalError::new(
        EvalErrorKind::UndefinedProperty {
            name: name.lexeme.clone(),
        },
        name.line,
    )
}
