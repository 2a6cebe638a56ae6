//! Diagnostic queue for collecting diagnostics across stages.
//!
//! Every error pushed is reported. The queue only drops a diagnostic that
//! is identical to one already queued (same code, line, location and span),
//! and hands the rest back in source order.

use crate::Diagnostic;

/// Collects diagnostics for one run.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a diagnostic unless an identical one is already queued.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        self.error_count += 1;
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Distinct errors queued since the last flush.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Drain queued diagnostics in source order.
    ///
    /// The sort is stable, so diagnostics on one line keep report order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| d.line);
        self.error_count = 0;
        out
    }
}
