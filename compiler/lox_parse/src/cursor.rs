//! Token cursor for navigating the token stream.

use lox_diagnostic::ErrorCode;
use lox_ir::{Token, TokenKind};

use crate::error::{PResult, ParseError};

/// Position in a token slice that always ends with `Eof`.
///
/// Returned tokens borrow the slice, not the cursor, so the parser can hold
/// on to them while it keeps advancing.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// `tokens` must be non-empty and end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token after the current one (`Eof` past the end).
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> &'a Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consume the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> &'a Token {
        let tok = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token if its kind is in `kinds`.
    pub fn eat_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if kinds.contains(&self.current_kind()) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a `kind` token or fail with `message` at the current token.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<&'a Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(message))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, message: &str) -> ParseError {
        ParseError::new(ErrorCode::E1001, self.current(), message)
    }
}
