//! Where `print` output goes.
//!
//! - Stdout: the CLI (default)
//! - Buffer: tests and embedders that inspect output
//!
//! Enum dispatch rather than a trait object: the set is closed and `print`
//! is on the hot path of most test programs.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to stdout, flushing after every line so output interleaves
/// correctly with error reports on stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        // A closed pipe is not a Lox error.
        let _ = writeln!(lock, "{msg}");
        let _ = lock.flush();
    }
}

/// Captures output into a buffer.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared between the interpreter and whoever reads the output back.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_handler_println_captures_with_newline() {
        let handler = BufferPrintHandler::new();
        handler.println("hello");
        handler.println("world");
        assert_eq!(handler.get_output(), "hello\nworld\n");
    }

    #[test]
    fn buffer_handler_clear_empties_buffer() {
        let handler = buffer_handler();
        handler.println("hello");
        assert!(!handler.get_output().is_empty());
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    #[test]
    fn shared_handler_sees_writes_through_clones() {
        let handler = buffer_handler();
        let writer = Arc::clone(&handler);
        writer.println("a");
        assert_eq!(handler.get_output(), "a\n");
    }
}
