//! Lexer for Lox, built on `logos`.
//!
//! [`lex`] turns source text into tokens terminated by `Eof`. Problems are
//! reported as diagnostics and scanning always continues, so one pass surfaces
//! every lexical error in the input.

mod raw_token;

use logos::Logos;
use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{Literal, Span, Token, TokenKind};

use raw_token::{Closed, RawToken};

/// Tokens plus whatever went wrong producing them.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    /// Always ends with an `Eof` token.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        lox_diagnostic::has_errors(&self.diagnostics)
    }
}

/// Scan `source` into tokens.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> LexOutput {
    let mut out = LexOutput::default();
    let mut line: u32 = 1;
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::Newline) => line += 1,
            Ok(RawToken::LineComment) => {}
            Ok(RawToken::BlockComment(closed)) => {
                line += count_newlines(slice);
                if closed == Closed::No {
                    out.diagnostics.push(
                        Diagnostic::error(ErrorCode::E0003, "Unterminated comment.", line)
                            .with_span(span),
                    );
                }
            }
            Ok(RawToken::String(closed)) => {
                let start_line = line;
                line += count_newlines(slice);
                match closed {
                    Closed::Yes => {
                        let value = &slice[1..slice.len() - 1];
                        out.tokens.push(
                            Token::new(TokenKind::String, slice, start_line, span)
                                .with_literal(Literal::Str(value.to_string())),
                        );
                    }
                    Closed::No => out.diagnostics.push(
                        Diagnostic::error(ErrorCode::E0001, "Unterminated string.", line)
                            .with_span(span),
                    ),
                }
            }
            Ok(RawToken::Number(n)) => out.tokens.push(
                Token::new(TokenKind::Number, slice, line, span).with_literal(Literal::Number(n)),
            ),
            Ok(RawToken::Identifier) => {
                let kind = TokenKind::keyword(slice).unwrap_or(TokenKind::Identifier);
                out.tokens.push(Token::new(kind, slice, line, span));
            }
            Ok(raw) => {
                if let Some(kind) = punctuation(raw) {
                    out.tokens.push(Token::new(kind, slice, line, span));
                }
            }
            Err(()) => {
                tracing::trace!(line, slice, "unexpected character");
                out.diagnostics.push(
                    Diagnostic::error(ErrorCode::E0002, "Unexpected character.", line)
                        .with_span(span),
                );
            }
        }
    }

    let eof_pos = u32::try_from(source.len()).unwrap_or(u32::MAX);
    out.tokens
        .push(Token::new(TokenKind::Eof, "", line, Span::point(eof_pos)));

    tracing::debug!(
        tokens = out.tokens.len(),
        errors = out.diagnostics.len(),
        "lexed"
    );
    out
}

fn count_newlines(slice: &str) -> u32 {
    let n = slice.bytes().filter(|&b| b == b'\n').count();
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Kind of an operator or punctuation token; `None` for every other raw token.
fn punctuation(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LeftParen => TokenKind::LeftParen,
        RawToken::RightParen => TokenKind::RightParen,
        RawToken::LeftBrace => TokenKind::LeftBrace,
        RawToken::RightBrace => TokenKind::RightBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::MinusEqual => TokenKind::MinusEqual,
        RawToken::PlusEqual => TokenKind::PlusEqual,
        RawToken::StarEqual => TokenKind::StarEqual,
        RawToken::SlashEqual => TokenKind::SlashEqual,
        RawToken::Bang => TokenKind::Bang,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::Equal => TokenKind::Equal,
        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::Greater => TokenKind::Greater,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::Less => TokenKind::Less,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::Newline
        | RawToken::LineComment
        | RawToken::BlockComment(_)
        | RawToken::String(_)
        | RawToken::Number(_)
        | RawToken::Identifier => return None,
    };
    Some(kind)
}
