//! Collection of diagnostics across one compilation unit.
//!
//! Each stage hands back a `Vec<Diagnostic>`; the driver funnels them through a
//! [`DiagnosticQueue`], which enforces the error limit, drops exact repeats,
//! and yields them in source order.

use crate::Diagnostic;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Stop collecting after this many errors (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical in line and message to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Queue one diagnostic. Returns `false` if it was filtered out.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            return false;
        }
        if self.config.deduplicate && self.is_duplicate(&diag) {
            return false;
        }
        if diag.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.push(diag);
        }
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.line == diag.line && d.message == diag.message && d.location == diag.location)
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Drain in line order (stable, so same-line diagnostics keep report order).
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| d.line);
        self.error_count = 0;
        out
    }
}

#[cfg(test)]
mod tests;
