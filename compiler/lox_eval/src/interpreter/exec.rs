//! Statement execution.

use std::rc::Rc;

use lox_ir::{ClassDecl, FunctionDecl, Stmt};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use super::{ExecOutcome, Interpreter};
use crate::environment::{Environment, Slot};
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::value::{FunctionKind, LoxClass, LoxFunction};
use crate::Value;

impl Interpreter {
    pub(crate) fn exec(&mut self, stmt: &Stmt) -> EvalResult<ExecOutcome> {
        ensure_sufficient_stack(|| self.exec_inner(stmt))
    }

    fn exec_inner(&mut self, stmt: &Stmt) -> EvalResult<ExecOutcome> {
        match stmt {
            Stmt::Expression(expr) => {
                self.eval(expr)?;
            }
            Stmt::Print(expr) => {
                let value = self.eval(expr)?;
                self.print.println(&value.to_string());
            }
            Stmt::Var { name, initializer } => {
                let slot = match initializer {
                    Some(init) => Slot::Value(self.eval(init)?),
                    None => Slot::Uninitialized,
                };
                self.env.define(&name.lexeme, slot);
            }
            Stmt::Block(stmts) => {
                let env = self.env.child();
                return self.exec_block(stmts, env);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    return self.exec(then_branch);
                }
                if let Some(other) = else_branch {
                    return self.exec(other);
                }
            }
            Stmt::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    match self.exec(body)? {
                        ExecOutcome::Normal => {}
                        ExecOutcome::Break => break,
                        ret @ ExecOutcome::Return(_) => return Ok(ret),
                    }
                }
            }
            Stmt::Break { .. } => return Ok(ExecOutcome::Break),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                return Ok(ExecOutcome::Return(value));
            }
            Stmt::Function(decl) => {
                let function = LoxFunction::new(
                    Rc::clone(decl),
                    self.env.clone(),
                    FunctionKind::Function,
                );
                if let Some(name) = &decl.name {
                    self.env
                        .define_value(&name.lexeme, Value::Function(Rc::new(function)));
                }
            }
            Stmt::Class(decl) => self.exec_class(decl)?,
        }
        Ok(ExecOutcome::Normal)
    }

    /// Run `stmts` in `env`, stopping at the first statement that does not
    /// complete normally.
    pub(crate) fn exec_block(
        &mut self,
        stmts: &[Stmt],
        env: Environment,
    ) -> EvalResult<ExecOutcome> {
        let mut scoped = self.scoped(env);
        for stmt in stmts {
            match scoped.exec(stmt)? {
                ExecOutcome::Normal => {}
                other => return Ok(other),
            }
        }
        Ok(ExecOutcome::Normal)
    }

    fn exec_class(&mut self, decl: &ClassDecl) -> EvalResult<()> {
        let superclass = match &decl.superclass {
            Some(expr) => match self.eval(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    return Err(EvalError::new(
                        EvalErrorKind::SuperclassNotClass,
                        expr.line,
                    ))
                }
            },
            None => None,
        };

        let name = &decl.name.lexeme;
        self.env.define(name, Slot::Uninitialized);

        // Members close over a frame holding `super` when there is one.
        let member_env = match &superclass {
            Some(class) => {
                let env = self.env.child();
                env.define_value("super", Value::Class(Rc::clone(class)));
                env
            }
            None => self.env.clone(),
        };

        let table = |fns: &[Rc<FunctionDecl>], kind: fn(&str) -> FunctionKind| {
            fns.iter()
                .filter_map(|f| {
                    let fname = f.name_str()?;
                    let function = LoxFunction::new(Rc::clone(f), member_env.clone(), kind(fname));
                    Some((fname.to_string(), Rc::new(function)))
                })
                .collect::<FxHashMap<_, _>>()
        };
        let methods = table(decl.methods.as_slice(), |fname| {
            if fname == "init" {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            }
        });
        let getters = table(decl.getters.as_slice(), |_| FunctionKind::Getter);
        let statics = table(decl.statics.as_slice(), |_| FunctionKind::Method);

        tracing::debug!(
            class = %name,
            methods = methods.len(),
            getters = getters.len(),
            statics = statics.len(),
            "define class"
        );
        let class = LoxClass::new(name.clone(), superclass, methods, getters, statics);
        if !self.env.assign_here(name, Value::Class(Rc::new(class))) {
            return Err(EvalError::defect(
                format!("class '{name}' vanished from its own frame"),
                decl.name.line,
            ));
        }
        Ok(())
    }
}
