//! Lox IR: the data shared by every stage of the pipeline.
//!
//! - [`Span`] byte ranges into source text
//! - [`Token`] / [`TokenKind`] produced by the lexer
//! - the syntax tree in [`ast`], produced by the parser and read by the
//!   resolver and interpreter
//! - debug printers in [`printer`]

pub mod ast;
pub mod printer;
mod span;
mod token;

pub use ast::{ClassDecl, Expr, ExprId, ExprKind, FunctionDecl, LiteralValue, Stmt};
pub use span::Span;
pub use token::{format_number, Literal, Token, TokenKind};
