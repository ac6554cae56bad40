//! Parser tests.
//!
//! - `parser`: precedence, statements, classes, lambdas, desugaring
//! - `errors`: diagnostics and recovery

mod errors;
mod parser;

use lox_ir::printer::{print_expr, print_program, Notation};

use crate::{parse, parse_expression};

/// Parse `source` and render it in prefix notation; panics on errors.
fn sexpr(source: &str) -> String {
    let lexed = lox_lexer::lex(source);
    assert!(lexed.diagnostics.is_empty(), "lex errors: {:?}", lexed.diagnostics);
    let out = parse(&lexed.tokens);
    match out.statements {
        Some(stmts) => print_program(&stmts, Notation::Prefix),
        None => panic!("parse errors: {:?}", out.diagnostics),
    }
}

/// Render a single expression.
fn expr(source: &str) -> String {
    let lexed = lox_lexer::lex(source);
    let out = parse_expression(&lexed.tokens);
    match out.expr {
        Some(e) => print_expr(&e, Notation::Prefix),
        None => panic!("parse errors: {:?}", out.diagnostics),
    }
}

/// Diagnostics in classic rendering.
fn errors(source: &str) -> Vec<String> {
    let lexed = lox_lexer::lex(source);
    let out = parse(&lexed.tokens);
    assert!(out.statements.is_none() || out.diagnostics.is_empty());
    out.diagnostics.iter().map(ToString::to_string).collect()
}
