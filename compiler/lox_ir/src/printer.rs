//! Debug renderings of the syntax tree.
//!
//! Prefix (S-expression) form is unambiguous and used by `lox parse`; postfix
//! (reverse Polish) form shows evaluation order. Variables print as `$name`.

use crate::ast::{ClassDecl, Expr, ExprKind, FunctionDecl, LiteralValue, Stmt};
use crate::format_number;

/// Output notation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Notation {
    /// `(+ 1 (* 2 3))`
    #[default]
    Prefix,
    /// `1 2 3 * +`
    Postfix,
}

/// Render one expression.
pub fn print_expr(expr: &Expr, notation: Notation) -> String {
    Printer { notation }.expr(expr)
}

/// Render one statement.
pub fn print_stmt(stmt: &Stmt, notation: Notation) -> String {
    Printer { notation }.stmt(stmt)
}

/// Render a whole program, one top-level statement per line.
pub fn print_program(stmts: &[Stmt], notation: Notation) -> String {
    let printer = Printer { notation };
    let mut out = String::new();
    for stmt in stmts {
        out.push_str(&printer.stmt(stmt));
        out.push('\n');
    }
    out
}

struct Printer {
    notation: Notation,
}

impl Printer {
    fn group(&self, name: &str, parts: Vec<String>) -> String {
        let mut out = String::new();
        match self.notation {
            Notation::Prefix => {
                out.push('(');
                out.push_str(name);
                for part in parts {
                    out.push(' ');
                    out.push_str(&part);
                }
                out.push(')');
            }
            Notation::Postfix => {
                for part in parts {
                    out.push_str(&part);
                    out.push(' ');
                }
                out.push_str(name);
            }
        }
        out
    }

    fn expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Literal(value) => literal(value),
            ExprKind::Grouping(inner) => self.group("group", vec![self.expr(inner)]),
            ExprKind::Unary { op, operand } => self.group(&op.lexeme, vec![self.expr(operand)]),
            ExprKind::Binary { left, op, right } | ExprKind::Logical { left, op, right } => {
                self.group(&op.lexeme, vec![self.expr(left), self.expr(right)])
            }
            ExprKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => self.group(
                "?",
                vec![
                    self.expr(condition),
                    self.expr(then_branch),
                    self.expr(else_branch),
                ],
            ),
            ExprKind::Variable { name } => format!("${}", name.lexeme),
            ExprKind::Assign { name, op, value } => {
                self.group(&op.lexeme, vec![format!("${}", name.lexeme), self.expr(value)])
            }
            ExprKind::Call { callee, args, .. } => {
                let mut parts = vec![self.expr(callee)];
                parts.extend(args.iter().map(|a| self.expr(a)));
                self.group("call", parts)
            }
            ExprKind::Get { object, name } => {
                self.group(".", vec![self.expr(object), name.lexeme.clone()])
            }
            ExprKind::Set {
                object,
                name,
                op,
                value,
            } => {
                let target = self.group(".", vec![self.expr(object), name.lexeme.clone()]);
                self.group(&op.lexeme, vec![target, self.expr(value)])
            }
            ExprKind::This { .. } => "this".to_string(),
            ExprKind::Super { method, .. } => format!("super.{}", method.lexeme),
            ExprKind::Lambda(decl) => self.function("lambda", decl),
        }
    }

    fn function(&self, head: &str, decl: &FunctionDecl) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(name) = &decl.name {
            parts.push(name.lexeme.clone());
        }
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        parts.push(format!("[{}]", params.join(" ")));
        parts.push(self.block(&decl.body));
        self.group(head, parts)
    }

    fn block(&self, stmts: &[Stmt]) -> String {
        self.group("block", stmts.iter().map(|s| self.stmt(s)).collect())
    }

    fn class(&self, decl: &ClassDecl) -> String {
        let mut parts = vec![decl.name.lexeme.clone()];
        if let Some(superclass) = &decl.superclass {
            parts.push(self.group("<", vec![self.expr(superclass)]));
        }
        parts.extend(decl.methods.iter().map(|m| self.function("method", m)));
        parts.extend(decl.statics.iter().map(|m| self.function("static", m)));
        parts.extend(decl.getters.iter().map(|g| self.function("getter", g)));
        self.group("class", parts)
    }

    fn stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => self.group(";", vec![self.expr(expr)]),
            Stmt::Print(expr) => self.group("print", vec![self.expr(expr)]),
            Stmt::Var { name, initializer } => {
                let mut parts = vec![format!("${}", name.lexeme)];
                if let Some(init) = initializer {
                    parts.push(self.expr(init));
                }
                self.group("var", parts)
            }
            Stmt::Block(stmts) => self.block(stmts),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut parts = vec![self.expr(condition), self.stmt(then_branch)];
                if let Some(other) = else_branch {
                    parts.push(self.stmt(other));
                }
                self.group("if", parts)
            }
            Stmt::While { condition, body } => {
                self.group("while", vec![self.expr(condition), self.stmt(body)])
            }
            Stmt::Break { .. } => self.group("break", Vec::new()),
            Stmt::Function(decl) => self.function("fun", decl),
            Stmt::Return { value, .. } => {
                self.group("return", value.iter().map(|v| self.expr(v)).collect())
            }
            Stmt::Class(decl) => self.class(decl),
        }
    }
}

fn literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Nil => "nil".to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Number(n) => format_number(*n),
        LiteralValue::Str(s) => format!("{s:?}"),
    }
}
