//! Lexical tokens.

use std::fmt;

use crate::Span;

/// Closed set of lexical categories.
///
/// Fieldless so it is `Copy` and usable in `const` token sets; the payload of
/// literal tokens lives in [`Token::literal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Semicolon,
    Question,
    Colon,
    Minus,
    Plus,
    Star,
    Slash,

    // Compound assignment
    MinusEqual,
    PlusEqual,
    StarEqual,
    SlashEqual,

    // One or two characters
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Break,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Position of this kind in the declaration order, for bitset membership.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Look up a reserved word. Case-sensitive.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "and" => TokenKind::And,
            "break" => TokenKind::Break,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        };
        Some(kind)
    }

    /// For a compound assignment operator, the arithmetic operator it applies.
    pub const fn compound_base(self) -> Option<TokenKind> {
        match self {
            TokenKind::PlusEqual => Some(TokenKind::Plus),
            TokenKind::MinusEqual => Some(TokenKind::Minus),
            TokenKind::StarEqual => Some(TokenKind::Star),
            TokenKind::SlashEqual => Some(TokenKind::Slash),
            _ => None,
        }
    }


    /// Human-readable name used in `lex` dumps.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::MinusEqual => "MINUS_EQUAL",
            TokenKind::PlusEqual => "PLUS_EQUAL",
            TokenKind::StarEqual => "STAR_EQUAL",
            TokenKind::SlashEqual => "SLASH_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Break => "BREAK",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Payload carried by `Number` and `String` tokens.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Str(s) => f.write_str(s),
        }
    }
}

/// A lexed token. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text of the token (empty for `Eof`).
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// 1-based source line the token starts on.
    pub line: u32,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    #[must_use]
    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// A token that never came from source, such as the `true` condition of
    /// a desugared `for (;;)`.
    pub fn synthetic(kind: TokenKind, lexeme: &str, line: u32) -> Self {
        Token::new(kind, lexeme, line, Span::DUMMY)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)?;
        match &self.literal {
            Some(lit) => write!(f, " {lit}"),
            None => f.write_str(" null"),
        }
    }
}

/// Render a number the way Lox prints it.
///
/// Integral values print without a fractional part (`3`, not `3.0`);
/// everything else uses the shortest representation that round-trips.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        n.to_string()
    }
}
