//! Lox Eval - tree-walking evaluator.
//!
//! # Architecture
//!
//! - [`Interpreter`]: executes a resolved [`Program`] against a persistent
//!   global frame
//! - [`Environment`]: shared, mutable scope chain
//! - [`Value`]: closed runtime value union
//! - `evaluate_binary` / `evaluate_unary`: operator dispatch
//! - [`PrintHandler`]: where `print` output goes
//!
//! Runtime errors are values ([`EvalError`]); a `return` is a
//! control-flow result of statement execution, not an error.

mod environment;
pub mod errors;
mod interpreter;
mod native;
mod operators;
mod print_handler;
mod value;

use lox_ir::{ExprArena, Resolutions, StmtId};

pub use environment::{Environment, LocalScope};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{EvalConfig, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{buffer_handler, stdout_handler, PrintHandler, SharedPrintHandler};
pub use value::{
    format_number, Callable, ClassValue, FunctionValue, Instance, NativeFn, NativeFunction, Value,
};

/// One parsed and resolved unit of source: a script, or one REPL line.
#[derive(Debug, Default)]
pub struct Program {
    pub arena: ExprArena,
    pub statements: Vec<StmtId>,
    pub resolutions: Resolutions,
}

impl Program {
    pub fn new(arena: ExprArena, statements: Vec<StmtId>, resolutions: Resolutions) -> Self {
        Program {
            arena,
            statements,
            resolutions,
        }
    }
}
