//! Grammar productions, split by declaration/statement and expression.

mod expr;
mod stmt;
