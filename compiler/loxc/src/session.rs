//! One interpreter session: the pipeline plus the error flags the driver
//! reads to pick an exit code.

use std::rc::Rc;

use lox_diagnostic::emitter::DiagnosticEmitter;
use lox_diagnostic::queue::DiagnosticQueue;
use lox_eval::{stdout_handler, EvalConfig, Interpreter, Program, SharedPrintHandler, Value};
use lox_ir::SharedInterner;
use tracing::debug;

/// How one [`Session::run`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    /// Lexing, parsing or resolution reported `errors` problems. Nothing ran.
    CompileError { errors: usize },
    /// Execution stopped at a runtime error.
    RuntimeError,
}

impl RunOutcome {
    /// Exit status for a script run ending this way.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Ok => 0,
            RunOutcome::CompileError { .. } => crate::exit::DATA_ERR,
            RunOutcome::RuntimeError => crate::exit::SOFTWARE,
        }
    }
}

/// Interner, interpreter and error flags shared by every run.
pub struct Session {
    interner: SharedInterner,
    interpreter: Interpreter,
    had_error: bool,
    had_runtime_error: bool,
}

impl Session {
    pub fn new(print_handler: SharedPrintHandler, config: EvalConfig) -> Self {
        let interner = SharedInterner::new();
        let interpreter = Interpreter::builder(interner.clone())
            .print_handler(print_handler)
            .config(config)
            .build();
        Session {
            interner,
            interpreter,
            had_error: false,
            had_runtime_error: false,
        }
    }

    /// Session printing to stdout with default settings.
    pub fn stdout() -> Self {
        Self::new(stdout_handler(), EvalConfig::default())
    }

    /// Run one unit of source, writing diagnostics to `emitter`.
    ///
    /// Lex and parse errors are all collected before anything is reported.
    /// Any of them, or any resolution error, means nothing is executed.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn run(&mut self, source: &str, emitter: &mut dyn DiagnosticEmitter) -> RunOutcome {
        let mut queue = DiagnosticQueue::new();

        let lexed = lox_lexer::lex(source, &self.interner);
        let parsed = lox_parse::parse(&lexed.tokens);
        for diagnostic in lexed.diagnostics().chain(parsed.diagnostics()) {
            queue.push(diagnostic);
        }
        if queue.has_errors() {
            return self.report_compile_errors(&mut queue, emitter);
        }

        let resolved = lox_resolve::resolve(&parsed.arena, &parsed.statements, &self.interner);
        if resolved.has_errors() {
            for diagnostic in resolved.diagnostics() {
                queue.push(diagnostic);
            }
            return self.report_compile_errors(&mut queue, emitter);
        }

        let program = Rc::new(Program::new(
            parsed.arena,
            parsed.statements,
            resolved.resolutions,
        ));
        match self.interpreter.interpret(&program) {
            Ok(()) => RunOutcome::Ok,
            Err(error) => {
                self.had_runtime_error = true;
                emitter.emit(&error.to_diagnostic());
                emitter.flush();
                RunOutcome::RuntimeError
            }
        }
    }

    fn report_compile_errors(
        &mut self,
        queue: &mut DiagnosticQueue,
        emitter: &mut dyn DiagnosticEmitter,
    ) -> RunOutcome {
        self.had_error = true;
        let errors = queue.error_count();
        debug!(errors, "compile errors");
        emitter.emit_all(&queue.flush());
        emitter.flush();
        RunOutcome::CompileError { errors }
    }

    /// A lexical, syntax or resolution error was reported since the last
    /// [`reset_errors`](Self::reset_errors).
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clear both error flags. The REPL calls this after every line.
    pub fn reset_errors(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Current value of a global, by source name.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.interpreter.global(name)
    }
}
