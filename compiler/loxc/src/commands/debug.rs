//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::path::Path;

use lox_diagnostic::Diagnostic;
use lox_ir::printer::{print_program, Notation};
use lox_lexer::LexOutput;

use super::{read_file, report_diagnostics, CliOptions};
use crate::exit_code;

/// One token per line: kind, lexeme, literal (or `null`).
pub fn render_tokens(lexed: &LexOutput) -> String {
    let mut out = String::new();
    for token in &lexed.tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

/// Parse `source` and render the tree, or return the front-end errors.
pub fn render_ast(source: &str, notation: Notation) -> Result<String, Vec<Diagnostic>> {
    let lexed = lox_lexer::lex(source);
    let parsed = lox_parse::parse(&lexed.tokens);
    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(parsed.diagnostics);
    match parsed.statements {
        Some(stmts) if !lox_diagnostic::has_errors(&diagnostics) => {
            Ok(print_program(&stmts, notation))
        }
        _ => Err(diagnostics),
    }
}

/// Lex a file and print its token stream.
///
/// Tokens are printed even when the lexer reported errors, since the
/// stream is still complete up to `EOF`.
pub fn lex_file(path: &str, options: &CliOptions) -> i32 {
    let source = match read_file(Path::new(path)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };
    let lexed = lox_lexer::lex(&source);
    print!("{}", render_tokens(&lexed));
    if lox_diagnostic::has_errors(&lexed.diagnostics) {
        report_diagnostics(&lexed.diagnostics, options);
        return exit_code::DATA_ERR;
    }
    exit_code::OK
}

/// Parse a file and print its syntax tree, prefix or reverse Polish.
pub fn parse_file(path: &str, rpn: bool, options: &CliOptions) -> i32 {
    let source = match read_file(Path::new(path)) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {err}");
            return err.exit_code();
        }
    };
    let notation = if rpn {
        Notation::Postfix
    } else {
        Notation::Prefix
    };
    match render_ast(&source, notation) {
        Ok(tree) => {
            print!("{tree}");
            exit_code::OK
        }
        Err(diagnostics) => {
            report_diagnostics(&diagnostics, options);
            exit_code::DATA_ERR
        }
    }
}
