//! Lox driver.
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │
//!     ▼
//! lox_lexer::lex ──► TokenList + LexErrors
//!     │
//!     ▼
//! lox_parse::parse ──► ExprArena + statements + ParseErrors
//!     │                 (always runs, even after lex errors)
//!     ▼
//! lox_resolve::resolve ──► Resolutions + ResolveErrors
//!     │                 (skipped when lexing or parsing failed)
//!     ▼
//! Interpreter::interpret ──► print output or one EvalError
//! ```
//!
//! A [`Session`] owns the interner and the interpreter for the lifetime of a
//! script run or a REPL, so globals and interned names carry over from one
//! [`Session::run`] call to the next.
//!
//! # Tracing
//!
//! Set `RUST_LOG` to see stage spans, e.g. `RUST_LOG=lox_parse=trace`.

pub mod cli;
pub mod commands;
pub mod printer;
mod session;
pub mod tracing_setup;

pub use printer::print_program;
pub use session::{RunOutcome, Session};

/// Process exit codes, following the BSD `sysexits` convention.
pub mod exit {
    /// Bad command line.
    pub const USAGE: i32 = 64;
    /// Lexical, syntax or resolution error in the input.
    pub const DATA_ERR: i32 = 65;
    /// Runtime error.
    pub const SOFTWARE: i32 = 70;
    /// Could not read the script.
    pub const IO_ERR: i32 = 74;
}
