//! Diagnostic system for interpreter error reporting.
//!
//! Every stage turns its errors into a [`Diagnostic`]: an error code, the
//! source line, an optional token location and a message. The driver
//! collects them in a [`DiagnosticQueue`](queue::DiagnosticQueue) and writes
//! them through a [`DiagnosticEmitter`](emitter::DiagnosticEmitter).

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;

/// Location text for an error reported at a token: `at end` for the end of
/// input, `at 'lexeme'` otherwise.
pub fn token_location(lexeme: &str, at_end: bool) -> String {
    if at_end {
        "at end".to_string()
    } else {
        format!("at '{lexeme}'")
    }
}
