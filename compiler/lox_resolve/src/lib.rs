//! Static scope resolution for Lox.
//!
//! One pre-order pass over the tree that computes, for each local variable
//! use, assignment, `this` and `super`, how many environments the interpreter
//! must walk out to find the binding. The scope stack here mirrors exactly the
//! environments the interpreter creates:
//!
//! - one per block
//! - one per function, method, getter or lambda call (parameters and body)
//! - one holding `this` around each class's members
//! - one holding `super` outside that, for subclasses
//!
//! Globals get no scope; names not found on the stack are left for run-time
//! global lookup. Static errors are collected and never stop the pass.

mod bindings;

pub use bindings::Bindings;

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{ClassDecl, Expr, ExprId, ExprKind, FunctionDecl, Stmt, Token};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Treat never-read locals and reads of never-assigned locals as errors.
    pub strict: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ResolveOutput {
    pub bindings: Bindings,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolveOutput {
    pub fn has_errors(&self) -> bool {
        lox_diagnostic::has_errors(&self.diagnostics)
    }
}

/// Resolve a program.
#[tracing::instrument(level = "debug", skip_all, fields(stmts = stmts.len()))]
pub fn resolve(stmts: &[Stmt], config: ResolverConfig) -> ResolveOutput {
    let mut resolver = Resolver::new(config);
    resolver.statements(stmts);
    resolver.finish()
}

/// Resolve a lone expression evaluated at top level (REPL echo mode).
pub fn resolve_expr(expr: &Expr, config: ResolverConfig) -> ResolveOutput {
    let mut resolver = Resolver::new(config);
    resolver.expr(expr);
    resolver.finish()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DeclState {
    /// Declared, initializer not yet run.
    Declared,
    /// Holds a value.
    Initialized,
    /// Read at least once.
    Used,
}

#[derive(Clone, Debug)]
struct Declaration {
    token: Token,
    state: DeclState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// How a resolved name is being touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    /// `this` / `super`: no state tracking.
    Keyword,
}

type Scope = FxHashMap<String, Declaration>;

struct Resolver {
    scopes: Vec<Scope>,
    bindings: Bindings,
    diagnostics: Vec<Diagnostic>,
    function: FunctionType,
    class: ClassType,
    in_loop: bool,
    config: ResolverConfig,
}

impl Resolver {
    fn new(config: ResolverConfig) -> Self {
        Resolver {
            scopes: Vec::new(),
            bindings: Bindings::new(),
            diagnostics: Vec::new(),
            function: FunctionType::None,
            class: ClassType::None,
            in_loop: false,
            config,
        }
    }

    fn finish(self) -> ResolveOutput {
        tracing::debug!(
            bindings = self.bindings.len(),
            errors = self.diagnostics.len(),
            "resolved"
        );
        ResolveOutput {
            bindings: self.bindings,
            diagnostics: self.diagnostics,
        }
    }

    fn error(&mut self, code: ErrorCode, token: &Token, message: &str) {
        self.diagnostics
            .push(Diagnostic::error_at(code, token, message));
    }

    fn begin_scope(&mut self) {
        self.scopes.push(Scope::default());
        tracing::trace!(depth = self.scopes.len(), "begin scope");
    }

    fn end_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        tracing::trace!(depth = self.scopes.len() + 1, "end scope");
        if self.config.strict {
            let mut unused: Vec<&Declaration> = scope
                .values()
                .filter(|d| d.state != DeclState::Used)
                .collect();
            // Deterministic order for reporting.
            unused.sort_by_key(|d| d.token.span.start);
            for decl in unused {
                self.diagnostics.push(Diagnostic::error_at(
                    ErrorCode::E2010,
                    &decl.token,
                    "Variable with this name is never used.",
                ));
            }
        }
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        let duplicate = scope.contains_key(&name.lexeme);
        scope.insert(
            name.lexeme.clone(),
            Declaration {
                token: name.clone(),
                state: DeclState::Declared,
            },
        );
        if duplicate {
            self.error(
                ErrorCode::E2001,
                name,
                "Variable with this name already declared in this scope.",
            );
        }
    }

    fn define(&mut self, name: &Token) {
        if let Some(decl) = self
            .scopes
            .last_mut()
            .and_then(|scope| scope.get_mut(&name.lexeme))
        {
            decl.state = DeclState::Initialized;
        }
    }

    /// Bind a synthetic name (`this`, `super`) in the innermost scope.
    fn define_keyword(&mut self, keyword: &str, at: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            let mut token = at.clone();
            token.lexeme = keyword.to_string();
            scope.insert(
                keyword.to_string(),
                Declaration {
                    token,
                    state: DeclState::Used,
                },
            );
        }
    }

    /// Record the hop count for `id` if `name` is a local.
    fn resolve_local(&mut self, id: ExprId, name: &str, access: Access) {
        let innermost = self.scopes.len();
        for (index, scope) in self.scopes.iter_mut().enumerate().rev() {
            if let Some(decl) = scope.get_mut(name) {
                match access {
                    Access::Read => decl.state = DeclState::Used,
                    Access::Write if decl.state == DeclState::Declared => {
                        decl.state = DeclState::Initialized;
                    }
                    Access::Write | Access::Keyword => {}
                }
                let depth = innermost - 1 - index;
                tracing::trace!(name, depth, "resolved local");
                self.bindings.insert(id, depth);
                return;
            }
        }
        tracing::trace!(name, "left global");
    }

    /// A read of `name` still in its initializer (or never assigned, in strict
    /// mode) within the innermost scope is an error.
    fn check_read(&mut self, name: &Token) {
        let declared = self
            .scopes
            .last()
            .and_then(|scope| scope.get(&name.lexeme))
            .is_some_and(|d| d.state == DeclState::Declared);
        if declared {
            if self.config.strict {
                self.error(
                    ErrorCode::E2011,
                    name,
                    "Variable with this name is guaranteed to be uninitialized.",
                );
            } else {
                self.error(
                    ErrorCode::E2002,
                    name,
                    "Cannot access variable in its own initializer.",
                );
            }
        }
    }

    fn statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.expr(expr),
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.expr(init);
                }
                // Strict mode keeps `var a;` declared until first assignment.
                if initializer.is_some() || !self.config.strict {
                    self.define(name);
                }
            }
            Stmt::Block(stmts) => {
                self.begin_scope();
                self.statements(stmts);
                self.end_scope();
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.expr(condition);
                self.stmt(then_branch);
                if let Some(other) = else_branch {
                    self.stmt(other);
                }
            }
            Stmt::While { condition, body } => {
                let enclosing = std::mem::replace(&mut self.in_loop, true);
                self.expr(condition);
                self.stmt(body);
                self.in_loop = enclosing;
            }
            Stmt::Break { keyword } => {
                if !self.in_loop {
                    self.error(
                        ErrorCode::E2003,
                        keyword,
                        "Cannot break from outside of for or while block.",
                    );
                }
            }
            Stmt::Function(decl) => {
                if let Some(name) = &decl.name {
                    self.declare(name);
                    self.define(name);
                }
                self.function(decl, FunctionType::Function);
            }
            Stmt::Return { keyword, value } => {
                if self.function == FunctionType::None {
                    self.error(
                        ErrorCode::E2004,
                        keyword,
                        "Cannot return from top-level code.",
                    );
                }
                if let Some(value) = value {
                    if self.function == FunctionType::Initializer {
                        self.error(
                            ErrorCode::E2005,
                            keyword,
                            "Cannot return a value from an initializer.",
                        );
                    }
                    self.expr(value);
                }
            }
            Stmt::Class(decl) => self.class(decl),
        });
    }

    fn class(&mut self, decl: &ClassDecl) {
        let enclosing_class = std::mem::replace(&mut self.class, ClassType::Class);
        self.declare(&decl.name);
        self.define(&decl.name);

        if let Some(superclass) = &decl.superclass {
            if let ExprKind::Variable { name } = &superclass.kind {
                if name.lexeme == decl.name.lexeme {
                    self.error(
                        ErrorCode::E2007,
                        name,
                        "A class cannot inherit from itself.",
                    );
                }
            }
            self.class = ClassType::Subclass;
            self.expr(superclass);
            self.begin_scope();
            self.define_keyword("super", &decl.name);
        }

        self.begin_scope();
        self.define_keyword("this", &decl.name);
        for method in &decl.methods {
            let kind = if method.name_str() == Some("init") {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.function(method, kind);
        }
        // `this` inside a static method is the class itself.
        for method in &decl.statics {
            self.function(method, FunctionType::Method);
        }
        for getter in &decl.getters {
            self.function(getter, FunctionType::Method);
        }
        self.end_scope();

        if decl.superclass.is_some() {
            self.end_scope();
        }
        self.class = enclosing_class;
    }

    /// Parameters and body share one scope, matching the call environment.
    fn function(&mut self, decl: &FunctionDecl, kind: FunctionType) {
        let enclosing_function = std::mem::replace(&mut self.function, kind);
        // A `break` cannot escape through a function boundary.
        let enclosing_loop = std::mem::replace(&mut self.in_loop, false);

        self.begin_scope();
        for param in &decl.params {
            self.declare(param);
            self.define(param);
        }
        self.statements(&decl.body);
        self.end_scope();

        self.in_loop = enclosing_loop;
        self.function = enclosing_function;
    }

    fn expr(&mut self, expr: &Expr) {
        ensure_sufficient_stack(|| match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Grouping(inner) | ExprKind::Unary { operand: inner, .. } => {
                self.expr(inner);
            }
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.expr(left);
                self.expr(right);
            }
            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => {
                self.expr(condition);
                self.expr(then_branch);
                self.expr(else_branch);
            }
            ExprKind::Variable { name } => {
                self.check_read(name);
                self.resolve_local(expr.id, &name.lexeme, Access::Read);
            }
            ExprKind::Assign { name, op, value } => {
                self.expr(value);
                if op.kind.compound_base().is_some() {
                    // `a += 1` reads `a` first.
                    self.check_read(name);
                    self.resolve_local(expr.id, &name.lexeme, Access::Read);
                } else {
                    self.resolve_local(expr.id, &name.lexeme, Access::Write);
                }
            }
            ExprKind::Call { callee, args, .. } => {
                self.expr(callee);
                for arg in args {
                    self.expr(arg);
                }
            }
            ExprKind::Get { object, .. } => self.expr(object),
            ExprKind::Set { object, value, .. } => {
                self.expr(value);
                self.expr(object);
            }
            ExprKind::This { keyword } => {
                if self.class == ClassType::None {
                    self.error(
                        ErrorCode::E2006,
                        keyword,
                        "Cannot use 'this' outside of a class.",
                    );
                } else {
                    self.resolve_local(expr.id, "this", Access::Keyword);
                }
            }
            ExprKind::Super { keyword, .. } => match self.class {
                ClassType::None => self.error(
                    ErrorCode::E2008,
                    keyword,
                    "Cannot use 'super' outside of a class.",
                ),
                ClassType::Class => self.error(
                    ErrorCode::E2009,
                    keyword,
                    "Cannot use 'super' in a class with no superclass.",
                ),
                ClassType::Subclass => {
                    self.resolve_local(expr.id, "super", Access::Keyword);
                }
            },
            ExprKind::Lambda(decl) => self.function(decl, FunctionType::Function),
        });
    }
}
