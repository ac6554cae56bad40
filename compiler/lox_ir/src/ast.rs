//! Syntax tree.
//!
//! Two closed families, [`ExprKind`] and [`Stmt`]. Every pipeline stage walks
//! them with an exhaustive `match`. Children are owned (`Box`/`Vec`); function
//! bodies sit behind `Rc` so a runtime closure can keep its declaration alive
//! without copying the tree.
//!
//! Dropping a tree is recursive too. Nodes with children release them inside
//! [`ensure_sufficient_stack`], so freeing a deeply nested program is as safe
//! as parsing it.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use lox_stack::ensure_sufficient_stack;

use crate::Token;

/// Identity of an expression node, the key of the resolver's side table.
///
/// Allocated from a process-wide counter so ids never collide, even across
/// separately parsed REPL lines that share one interpreter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

static NEXT_EXPR_ID: AtomicU32 = AtomicU32::new(0);

impl ExprId {
    pub fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub id: ExprId,
    /// Line of the token that best identifies the node (operator, name, ...).
    pub line: u32,
    pub kind: ExprKind,
}

impl Expr {
    /// Wrap `kind` in a node with a fresh id.
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Expr {
            id: ExprId::fresh(),
            line,
            kind,
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        if matches!(
            self.kind,
            ExprKind::Literal(_)
                | ExprKind::Variable { .. }
                | ExprKind::This { .. }
                | ExprKind::Super { .. }
        ) {
            return;
        }
        let kind = std::mem::replace(&mut self.kind, ExprKind::Literal(LiteralValue::Nil));
        ensure_sufficient_stack(move || drop(kind));
    }
}

/// Value of a literal expression.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(LiteralValue),
    Grouping(Box<Expr>),
    Unary {
        op: Token,
        operand: Box<Expr>,
    },
    /// Arithmetic, comparison, equality and the comma operator.
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Variable {
        name: Token,
    },
    /// `name = value` or a compound form; `op` is the assignment token.
    Assign {
        name: Token,
        op: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// Closing parenthesis, for error lines.
        paren: Token,
        args: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        op: Token,
        value: Box<Expr>,
    },
    This {
        keyword: Token,
    },
    Super {
        keyword: Token,
        method: Token,
    },
    Lambda(Rc<FunctionDecl>),
}

/// A named function, method, getter or anonymous lambda.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// `None` for lambdas.
    pub name: Option<Token>,
    /// Line of the name, or of the `fun` keyword for lambdas.
    pub line: u32,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().map(|t| t.lexeme.as_str())
    }
}

impl Drop for FunctionDecl {
    fn drop(&mut self) {
        let body = std::mem::take(&mut self.body);
        if !body.is_empty() {
            ensure_sufficient_stack(move || drop(body));
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Token,
    /// Always an [`ExprKind::Variable`] when present.
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
    /// Declared with a leading `class` keyword inside the body.
    pub statics: Vec<Rc<FunctionDecl>>,
    /// Declared as `name { ... }`, without a parameter list. Always zero
    /// parameters.
    pub getters: Vec<Rc<FunctionDecl>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Break {
        keyword: Token,
    },
    Function(Rc<FunctionDecl>),
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
    Class(ClassDecl),
}

impl Drop for Stmt {
    fn drop(&mut self) {
        match self {
            Stmt::Block(stmts) if !stmts.is_empty() => {
                let stmts = std::mem::take(stmts);
                ensure_sufficient_stack(move || drop(stmts));
            }
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                let then_branch = std::mem::replace(&mut **then_branch, Stmt::Block(Vec::new()));
                let else_branch = else_branch.take();
                ensure_sufficient_stack(move || drop((then_branch, else_branch)));
            }
            Stmt::While { body, .. } => {
                let body = std::mem::replace(&mut **body, Stmt::Block(Vec::new()));
                ensure_sufficient_stack(move || drop(body));
            }
            _ => {}
        }
    }
}
