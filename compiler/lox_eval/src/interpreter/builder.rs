//! `InterpreterBuilder` for configuring an `Interpreter`.

use std::time::Instant;

use lox_ir::SharedInterner;
use lox_stack::DepthCounter;

use super::{EvalConfig, Interpreter, Names};
use crate::environment::Environment;
use crate::native::define_natives;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`]. Defaults to stdout output and
/// [`EvalConfig::default`].
pub struct InterpreterBuilder {
    interner: SharedInterner,
    print_handler: Option<SharedPrintHandler>,
    config: EvalConfig,
}

impl InterpreterBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        InterpreterBuilder {
            interner,
            print_handler: None,
            config: EvalConfig::default(),
        }
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let globals = Environment::global();
        define_natives(&globals, &self.interner);

        Interpreter {
            names: Names::new(&self.interner),
            interner: self.interner,
            globals,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: DepthCounter::new(self.config.max_call_depth),
            config: self.config,
            started: Instant::now(),
        }
    }
}
