//! The tree-walking interpreter.
//!
//! Statements run through [`Interpreter::exec`], which reports how control
//! left the statement as an [`ExecOutcome`]; expressions go through
//! [`Interpreter::eval`]. Names carry a hop count from the resolver; a name
//! without one is global.
//!
//! # Submodules
//! - `exec`: statements and blocks
//! - `eval`: expressions
//! - `call`: calls, classes and property access

mod call;
mod eval;
mod exec;

use std::ops::{Deref, DerefMut};

use lox_ir::{Expr, ExprId, Stmt, Token};
use lox_resolve::Bindings;
use lox_stack::{DepthLimit, DEFAULT_MAX_DEPTH};

use crate::environment::{Environment, Slot};
use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::print_handler::SharedPrintHandler;
use crate::{native, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Most nested Lox calls before "Stack overflow.".
    pub max_call_depth: usize,
    /// Cross-check every resolved hop against a by-name search of the
    /// environment chain and fail with a defect on disagreement.
    pub verify_bindings: bool,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_DEPTH,
            verify_bindings: false,
        }
    }
}

/// How control left a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecOutcome {
    Normal,
    Return(Value),
    Break,
}

pub struct Interpreter {
    globals: Environment,
    /// Innermost frame of the code currently running.
    env: Environment,
    /// Hop counts of every program run so far; REPL closures outlive the
    /// line they were declared on.
    bindings: Bindings,
    print: SharedPrintHandler,
    depth: DepthLimit,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(print: SharedPrintHandler, config: InterpreterConfig) -> Self {
        let globals = Environment::new();
        native::install(&globals);
        Interpreter {
            env: globals.clone(),
            globals,
            bindings: Bindings::new(),
            print,
            depth: DepthLimit::new(config.max_call_depth),
            config,
        }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// Run a resolved program. Stops at the first run-time error; globals
    /// defined before it stay defined.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = stmts.len()))]
    pub fn interpret(&mut self, stmts: &[Stmt], bindings: &Bindings) -> Result<(), EvalError> {
        self.bindings.extend(bindings);
        let result = self.run_top_level(stmts);
        self.finish(result)
    }

    /// Evaluate one resolved expression at top level and return its value.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate_repl(&mut self, expr: &Expr, bindings: &Bindings) -> EvalResult {
        self.bindings.extend(bindings);
        let result = self.eval(expr);
        self.finish(result)
    }

    fn run_top_level(&mut self, stmts: &[Stmt]) -> Result<(), EvalError> {
        for stmt in stmts {
            match self.exec(stmt)? {
                ExecOutcome::Normal => {}
                ExecOutcome::Break => {
                    return Err(EvalError::defect("'break' escaped to top level", 0));
                }
                ExecOutcome::Return(_) => {
                    return Err(EvalError::defect("'return' escaped to top level", 0));
                }
            }
        }
        Ok(())
    }

    /// Put the interpreter back in a runnable state after a top-level run.
    fn finish<T>(&mut self, result: EvalResult<T>) -> EvalResult<T> {
        if let Err(err) = &result {
            if err.is_defect() {
                tracing::error!(line = err.line, "{}", err.kind);
            } else {
                tracing::debug!(line = err.line, "runtime error: {}", err.kind);
            }
            self.env = self.globals.clone();
            self.depth.reset();
        }
        result
    }

    /// Swap in `env` as the current frame until the guard drops.
    pub(crate) fn scoped(&mut self, env: Environment) -> ScopedEnv<'_> {
        let saved = std::mem::replace(&mut self.env, env);
        ScopedEnv {
            interpreter: self,
            saved: Some(saved),
        }
    }

    /// Frame holding a resolved name, `depth` hops out from the current one.
    fn resolved_frame(&self, name: &str, depth: usize, line: u32) -> EvalResult<Environment> {
        let frame = self.env.ancestor(depth).ok_or_else(|| {
            EvalError::defect(
                format!(
                    "hop count {depth} for '{name}' walks past the outermost of {} frames",
                    self.env.chain_len()
                ),
                line,
            )
        })?;
        if self.config.verify_bindings {
            let searched = self.env.find_frame(name);
            if !searched.is_some_and(|f| f.ptr_eq(&frame)) {
                return Err(EvalError::defect(
                    format!("hop count {depth} for '{name}' disagrees with chain search"),
                    line,
                ));
            }
        }
        Ok(frame)
    }

    /// Read a variable (or `this`) by its resolved location.
    fn look_up(&self, name: &Token, id: ExprId) -> EvalResult {
        self.look_up_str(&name.lexeme, id, name.line)
    }

    fn look_up_str(&self, name: &str, id: ExprId, line: u32) -> EvalResult {
        let slot = match self.bindings.depth(id) {
            Some(depth) => self
                .resolved_frame(name, depth, line)?
                .get_here(name)
                .ok_or_else(|| {
                    EvalError::defect(format!("resolved slot for '{name}' is missing"), line)
                })?,
            None => self.globals.get_here(name).ok_or_else(|| {
                EvalError::new(
                    EvalErrorKind::UndefinedVariable {
                        name: name.to_string(),
                    },
                    line,
                )
            })?,
        };
        match slot {
            Slot::Value(value) => Ok(value),
            Slot::Uninitialized => Err(EvalError::new(
                EvalErrorKind::UninitializedVariable {
                    name: name.to_string(),
                },
                line,
            )),
        }
    }

    fn assign_variable(&self, name: &Token, id: ExprId, value: Value) -> EvalResult<()> {
        let (frame, resolved) = match self.bindings.depth(id) {
            Some(depth) => (self.resolved_frame(&name.lexeme, depth, name.line)?, true),
            None => (self.globals.clone(), false),
        };
        if frame.assign_here(&name.lexeme, value) {
            return Ok(());
        }
        Err(if resolved {
            EvalError::defect(
                format!("resolved slot for '{}' is missing", name.lexeme),
                name.line,
            )
        } else {
            EvalError::new(
                EvalErrorKind::UndefinedVariable {
                    name: name.lexeme.clone(),
                },
                name.line,
            )
        })
    }
}

/// Restores the interpreter's previous frame on drop, on every exit path.
pub(crate) struct ScopedEnv<'a> {
    interpreter: &'a mut Interpreter,
    saved: Option<Environment>,
}

impl Drop for ScopedEnv<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.interpreter.env = saved;
        }
    }
}

impl Deref for ScopedEnv<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedEnv<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}
