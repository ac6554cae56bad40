//! Error recovery.
//!
//! After a parse error the parser discards tokens until a statement boundary,
//! so one pass can surface several independent syntax errors.

use lox_ir::TokenKind;

use crate::cursor::Cursor;

/// Set of token kinds with O(1) membership, one bit per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u64 << kind.discriminant_index()))
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Keywords that begin a new declaration or statement.
pub const STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Class)
    .with(TokenKind::Fun)
    .with(TokenKind::Var)
    .with(TokenKind::For)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Print)
    .with(TokenKind::Return);

/// Skip to just after a `;`, or to just before a token in `recovery`.
///
/// Always consumes at least one token (the one that caused the error) so the
/// parser cannot loop on it.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) {
    cursor.advance();
    while !cursor.is_at_end() {
        if cursor.previous().kind == TokenKind::Semicolon {
            return;
        }
        if recovery.contains(cursor.current_kind()) {
            return;
        }
        cursor.advance();
    }
}
