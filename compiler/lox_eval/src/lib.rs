//! Tree-walking evaluator for Lox.
//!
//! Runs resolved statements against a chain of [`Environment`] frames. The
//! resolver's [`Bindings`](lox_resolve::Bindings) tell every local name how
//! many frames to hop; everything else is a global.

mod environment;
mod errors;
mod interpreter;
mod native;
mod operators;
mod print_handler;
mod release;
mod value;

pub use environment::{Environment, Slot};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{ExecOutcome, Interpreter, InterpreterConfig};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::{FunctionKind, LoxClass, LoxFunction, LoxInstance, NativeFunction, Value};

#[cfg(test)]
mod tests;
