//! Diagnostic emitters.
//!
//! The interpreter only needs human-readable terminal output, but the driver
//! talks to the `DiagnosticEmitter` trait so tests can capture output.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary line after a failed run.
    fn emit_summary(&mut self, error_count: usize);
}
