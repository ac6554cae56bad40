//! Host stack protection for the recursive Lox pipeline.
//!
//! The parser, resolver and evaluator are all plain recursive tree walks, so a
//! deeply nested program (or a runaway recursive Lox function) would otherwise
//! exhaust the native stack and abort the process. Two tools live here:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand, so nesting
//!   depth in the *source* never crashes the host.
//! - [`DepthLimit`] counts nested Lox calls so unbounded *runtime* recursion
//!   turns into an ordinary script error instead of unbounded memory growth.
//!
//! On `wasm32` the stack cannot be grown and `ensure_sufficient_stack` is a
//! passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment.
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
///
/// ```text
/// fn expression(&mut self) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| self.comma())
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Default maximum number of nested Lox calls.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Returned by [`DepthLimit::enter`] when the limit would be exceeded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Counter of active nested calls with a hard ceiling.
///
/// `enter` and `exit` must be paired; the evaluator does this around every
/// call it makes, including calls that fail.
#[derive(Clone, Debug)]
pub struct DepthLimit {
    current: usize,
    max: usize,
}

impl DepthLimit {
    pub fn new(max: usize) -> Self {
        DepthLimit { current: 0, max }
    }

    /// Record one more active call.
    pub fn enter(&mut self) -> Result<(), DepthExceeded> {
        if self.current >= self.max {
            return Err(DepthExceeded { limit: self.max });
        }
        self.current += 1;
        Ok(())
    }

    /// Record that the innermost active call finished.
    pub fn exit(&mut self) {
        debug_assert!(self.current > 0, "DepthLimit::exit without enter");
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Forget all active calls, used after a run-time error unwinds.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}

impl Default for DepthLimit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
