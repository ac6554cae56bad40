//! Stable error codes.
//!
//! The first digit names the phase that raised the diagnostic:
//! `E0xxx` lexer, `E1xxx` parser, `E2xxx` resolver.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer
    /// String literal not closed before end of input
    E0001,
    /// Character that starts no token
    E0002,
    /// Block comment not closed before end of input
    E0003,

    // Parser
    /// A specific token was expected (`Expect ';' after value.` etc.)
    E1001,
    /// An expression was expected
    E1002,
    /// Left side of `=` is not a variable or property
    E1003,
    /// Binary operator used with no left operand
    E1004,
    /// More than 255 parameters
    E1005,
    /// More than 255 arguments
    E1006,

    // Resolver
    /// Name declared twice in one scope
    E2001,
    /// Local read inside its own initializer
    E2002,
    /// `break` outside of a loop
    E2003,
    /// `return` outside of a function
    E2004,
    /// `return` with a value inside `init`
    E2005,
    /// `this` outside of a class
    E2006,
    /// Class lists itself as superclass
    E2007,
    /// `super` outside of a class
    E2008,
    /// `super` in a class without superclass
    E2009,
    /// Local never read (strict mode)
    E2010,
    /// Local read before any assignment (strict mode)
    E2011,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
        }
    }

    /// One-line explanation, for `lox --explain`.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unexpected character",
            ErrorCode::E0003 => "unterminated block comment",
            ErrorCode::E1001 => "expected a specific token",
            ErrorCode::E1002 => "expected an expression",
            ErrorCode::E1003 => "invalid assignment target",
            ErrorCode::E1004 => "binary operator used without a left operand",
            ErrorCode::E1005 => "too many parameters",
            ErrorCode::E1006 => "too many arguments",
            ErrorCode::E2001 => "variable already declared in this scope",
            ErrorCode::E2002 => "variable read in its own initializer",
            ErrorCode::E2003 => "`break` outside of a loop",
            ErrorCode::E2004 => "`return` outside of a function",
            ErrorCode::E2005 => "value returned from an initializer",
            ErrorCode::E2006 => "`this` outside of a class",
            ErrorCode::E2007 => "class inherits from itself",
            ErrorCode::E2008 => "`super` outside of a class",
            ErrorCode::E2009 => "`super` in a class with no superclass",
            ErrorCode::E2010 => "local variable never used",
            ErrorCode::E2011 => "local variable read before assignment",
        }
    }

    /// Parse `"E2003"` back into a code.
    pub fn from_str_code(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    pub fn is_lexer_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_resolver_error(self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
