//! Recursive descent parser for Lox.
//!
//! [`parse`] turns a token list into statements. Syntax errors are collected
//! as diagnostics, the parser resynchronizes at the next statement boundary,
//! and if anything went wrong no statements are returned at all, so later
//! stages never see a partial tree.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::{synchronize, TokenSet, STMT_START};

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{Expr, Span, Stmt, Token, TokenKind};

/// Most parameters a function may declare, and most arguments a call may pass.
pub const MAX_ARITY: usize = 255;

#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    /// `None` if any diagnostic was reported.
    pub statements: Option<Vec<Stmt>>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug, Default)]
pub struct ExprParseOutput {
    /// `None` if any diagnostic was reported.
    pub expr: Option<Expr>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with `Eof`, as lexer output does.
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            diagnostics: Vec::new(),
        }
    }

    /// program → declaration* EOF
    pub fn parse_program(mut self) -> ParseOutput {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        let statements = self.diagnostics.is_empty().then_some(statements);
        ParseOutput {
            statements,
            diagnostics: self.diagnostics,
        }
    }

    /// A single expression spanning the whole input.
    pub fn parse_expression(mut self) -> ExprParseOutput {
        let expr = match self.expression() {
            Ok(expr) if self.cursor.is_at_end() => Some(expr),
            Ok(_) => {
                self.report(ParseError::new(
                    ErrorCode::E1001,
                    self.cursor.current(),
                    "Expect end of expression.",
                ));
                None
            }
            Err(err) => {
                self.report(err);
                None
            }
        };
        let expr = if self.diagnostics.is_empty() { expr } else { None };
        ExprParseOutput {
            expr,
            diagnostics: self.diagnostics,
        }
    }

    /// Record an error without unwinding.
    fn report(&mut self, err: ParseError) {
        tracing::trace!(line = err.token.line, message = %err.message, "parse error");
        self.diagnostics.push(err.into_diagnostic());
    }
}

/// Parse a full program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    with_eof(tokens, |tokens| Parser::new(tokens).parse_program())
}

/// Parse input that should be exactly one expression (REPL echo mode).
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse_expression(tokens: &[Token]) -> ExprParseOutput {
    with_eof(tokens, |tokens| Parser::new(tokens).parse_expression())
}

/// Run `f` on `tokens`, appending an `Eof` first if the caller left it off.
fn with_eof<R>(tokens: &[Token], f: impl FnOnce(&[Token]) -> R) -> R {
    if tokens.last().is_some_and(|t| t.kind == TokenKind::Eof) {
        f(tokens)
    } else {
        let line = tokens.last().map_or(1, |t| t.line);
        let end = tokens.last().map_or(0, |t| t.span.end);
        let mut owned = tokens.to_vec();
        owned.push(Token::new(TokenKind::Eof, "", line, Span::point(end)));
        f(&owned)
    }
}

#[cfg(test)]
mod tests;
