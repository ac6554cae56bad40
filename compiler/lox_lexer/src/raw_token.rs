//! The `logos`-derived scanner, before conversion to [`lox_ir::Token`].

use logos::{Lexer, Logos};

/// Whether a delimited token found its closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closed {
    Yes,
    No,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip horizontal whitespace
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    /// Block comments do not nest: the first `*/` closes.
    #[token("/*", block_comment)]
    BlockComment(Closed),

    /// Strings may span lines and have no escape sequences.
    #[token("\"", string_body)]
    String(Closed),

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("-=")]
    MinusEqual,
    #[token("+=")]
    PlusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,

    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // No exponent and no leading `.`; `1.` lexes as `1` then `.`
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Keywords are split out of identifiers during conversion
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

/// Consume up to and including the closing `*/`, or to end of input.
fn block_comment(lex: &mut Lexer<RawToken>) -> Closed {
    let rest = lex.remainder();
    if let Some(end) = rest.find("*/") {
        lex.bump(end + 2);
        Closed::Yes
    } else {
        lex.bump(rest.len());
        Closed::No
    }
}

/// Consume up to and including the closing quote, or to end of input.
fn string_body(lex: &mut Lexer<RawToken>) -> Closed {
    let rest = lex.remainder();
    if let Some(end) = rest.find('"') {
        lex.bump(end + 1);
        Closed::Yes
    } else {
        lex.bump(rest.len());
        Closed::No
    }
}
