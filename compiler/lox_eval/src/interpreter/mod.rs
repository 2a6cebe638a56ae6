//! Tree-walking interpreter.
//!
//! Statements run against an explicit frame handle threaded through every
//! call; a block or function call makes a child frame and drops it when done.
//! Variable references with a recorded hop count read exactly that ancestor
//! frame. Unrecorded references go to the global frame by name.
//!
//! # Program threading
//!
//! Every function value carries the `Program` it was declared in. A call
//! evaluates the callee's body against the callee's program, not the
//! caller's, so closures made by earlier REPL lines keep working after later
//! lines are parsed into fresh arenas.

mod builder;
mod call;

pub use builder::InterpreterBuilder;

use std::rc::Rc;
use std::time::Instant;

use lox_ir::{
    ExprId, ExprKind, LogicalOp, Name, SharedInterner, Span, StmtId, StmtKind, StmtRange,
    StringInterner,
};
use lox_stack::{ensure_sufficient_stack, DepthCounter};
use tracing::trace;

use crate::environment::Environment;
use crate::errors::{
    field_on_non_instance, property_on_non_instance, undefined_property, undefined_variable,
    EvalError, EvalResult,
};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::print_handler::SharedPrintHandler;
use crate::value::{Callable, FunctionValue, Instance, Value};
use crate::Program;

/// Evaluator settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Most user-level calls that may be active at once. One more fails
    /// with "Stack overflow.".
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_call_depth: 1024,
        }
    }
}

/// Names the interpreter compares against on hot paths, interned once.
#[derive(Copy, Clone)]
pub(crate) struct Names {
    pub(crate) this: Name,
    pub(crate) init: Name,
}

impl Names {
    fn new(interner: &StringInterner) -> Self {
        Names {
            this: interner.intern("this"),
            init: interner.intern("init"),
        }
    }
}

/// How a statement finished.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    /// A `return` is unwinding to the enclosing call.
    Return {
        value: Option<Value>,
        span: Span,
        line: u32,
    },
}

/// The evaluator. Globals persist across [`interpret`](Self::interpret)
/// calls.
pub struct Interpreter {
    interner: SharedInterner,
    globals: Environment,
    print_handler: SharedPrintHandler,
    config: EvalConfig,
    call_depth: DepthCounter,
    started: Instant,
    names: Names,
}

impl Interpreter {
    /// Interpreter printing to stdout with default settings.
    pub fn new(interner: SharedInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn builder(interner: SharedInterner) -> InterpreterBuilder {
        InterpreterBuilder::new(interner)
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Seconds since this interpreter was built.
    pub fn elapsed_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Look up a global by its source name.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(self.interner.intern(name))
    }

    /// Run every top-level statement of `program` in order.
    ///
    /// Stops at the first runtime error. Output printed before the error
    /// stays printed, and globals defined before it stay defined.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn interpret(&mut self, program: &Rc<Program>) -> Result<(), EvalError> {
        let globals = self.globals.clone();
        for &stmt in &program.statements {
            if let Err(error) = self.execute(program, &globals, stmt) {
                tracing::debug!(line = error.line, message = %error.message, "runtime error");
                return Err(error);
            }
        }
        Ok(())
    }

    fn execute(
        &mut self,
        program: &Rc<Program>,
        env: &Environment,
        id: StmtId,
    ) -> Result<Flow, EvalError> {
        ensure_sufficient_stack(|| self.execute_inner(program, env, id))
    }

    fn execute_inner(
        &mut self,
        program: &Rc<Program>,
        env: &Environment,
        id: StmtId,
    ) -> Result<Flow, EvalError> {
        let stmt = *program.arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Expression(expr) => {
                self.evaluate(program, env, expr)?;
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(program, env, expr)?;
                self.print_handler.println(&value.to_string());
            }
            StmtKind::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(program, env, init)?,
                    None => Value::Nil,
                };
                env.define(name.name, value);
            }
            StmtKind::Block(body) => {
                return self.execute_block(program, body, env.child());
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(program, env, condition)?.is_truthy() {
                    return self.execute(program, env, then_branch);
                }
                if let Some(else_branch) = else_branch {
                    return self.execute(program, env, else_branch);
                }
            }
            StmtKind::While { condition, body } => {
                while self.evaluate(program, env, condition)?.is_truthy() {
                    let flow = self.execute(program, env, body)?;
                    if matches!(flow, Flow::Return { .. }) {
                        return Ok(flow);
                    }
                }
            }
            StmtKind::Function(function) => {
                let decl = program.arena.get_function(function);
                let value = FunctionValue {
                    name: self.interner.lookup(decl.name.name),
                    declaration: function,
                    program: Rc::clone(program),
                    closure: env.clone(),
                    is_initializer: false,
                };
                let function = Value::Callable(Callable::Function(Rc::new(value)));
                env.define(decl.name.name, function);
            }
            StmtKind::Return { value } => {
                let value = match value {
                    Some(expr) => Some(self.evaluate(program, env, expr)?),
                    None => None,
                };
                return Ok(Flow::Return {
                    value,
                    span: stmt.span,
                    line: stmt.line,
                });
            }
            StmtKind::Class { name, methods } => {
                self.declare_class(program, env, name, methods);
            }
        }
        Ok(Flow::Normal)
    }

    /// Run `body` in `env`, stopping early on `return`.
    pub(crate) fn execute_block(
        &mut self,
        program: &Rc<Program>,
        body: StmtRange,
        env: Environment,
    ) -> Result<Flow, EvalError> {
        for &stmt in program.arena.get_stmt_list(body) {
            let flow = self.execute(program, &env, stmt)?;
            if matches!(flow, Flow::Return { .. }) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn evaluate(&mut self, program: &Rc<Program>, env: &Environment, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(program, env, id))
    }

    fn evaluate_inner(
        &mut self,
        program: &Rc<Program>,
        env: &Environment,
        id: ExprId,
    ) -> EvalResult {
        let expr = *program.arena.get_expr(id);
        trace!(?id, line = expr.line, "evaluate");
        match expr.kind {
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Number(bits) => Ok(Value::Number(f64::from_bits(bits))),
            ExprKind::String(contents) => Ok(Value::string(self.interner.lookup(contents))),
            ExprKind::Grouping(members) => {
                let mut last = Value::Nil;
                for &member in program.arena.get_expr_list(members) {
                    last = self.evaluate(program, env, member)?;
                }
                Ok(last)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.evaluate(program, env, operand)?;
                evaluate_unary(op, &operand).map_err(|e| e.at(expr.span, expr.line))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.evaluate(program, env, left)?;
                let right = self.evaluate(program, env, right)?;
                evaluate_binary(op, &left, &right).map_err(|e| e.at(expr.span, expr.line))
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.evaluate(program, env, left)?;
                let short_circuits = match op {
                    LogicalOp::Or => left.is_truthy(),
                    LogicalOp::And => !left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(program, env, right)
                }
            }
            ExprKind::Variable(name) => self
                .look_up(program, env, id, name)
                .map_err(|e| e.at(expr.span, expr.line)),
            ExprKind::Assign { name, value } => {
                let value = self.evaluate(program, env, value)?;
                let assigned = match program.resolutions.depth(id) {
                    Some(depth) => env.assign_at(depth, name, value.clone()),
                    None => self.globals.assign(name, value.clone()),
                };
                if !assigned {
                    let error = undefined_variable(self.interner.lookup(name));
                    return Err(error.at(expr.span, expr.line));
                }
                Ok(value)
            }
            ExprKind::Call { callee, args } => self.eval_call(program, env, &expr, callee, args),
            ExprKind::Get { object, name } => {
                let object = self.evaluate(program, env, object)?;
                let Some(instance) = object.as_instance() else {
                    return Err(property_on_non_instance().at(expr.span, expr.line));
                };
                self.get_property(instance, name).ok_or_else(|| {
                    undefined_property(self.interner.lookup(name)).at(expr.span, expr.line)
                })
            }
            ExprKind::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(program, env, object)?;
                let Value::Instance(instance) = object else {
                    return Err(field_on_non_instance().at(expr.span, expr.line));
                };
                let value = self.evaluate(program, env, value)?;
                instance.set_field(name, value.clone());
                Ok(value)
            }
            ExprKind::This => self
                .look_up(program, env, id, self.names.this)
                .map_err(|e| e.at(expr.span, expr.line)),
        }
    }

    /// Read a variable through its hop count, or from the globals when the
    /// reference was not resolved to a local.
    fn look_up(
        &self,
        program: &Program,
        env: &Environment,
        id: ExprId,
        name: Name,
    ) -> EvalResult {
        let value = match program.resolutions.depth(id) {
            Some(depth) => env.get_at(depth, name),
            None => self.globals.get(name),
        };
        value.ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    /// A field, or else a method bound to `instance`.
    fn get_property(&self, instance: &Instance, name: Name) -> Option<Value> {
        if let Some(value) = instance.get_field(name) {
            return Some(value);
        }
        let method = instance.class().find_method(name)?;
        let bound = method.bind(instance, self.names.this);
        Some(Value::Callable(Callable::Function(Rc::new(bound))))
    }
}

#[cfg(test)]
mod tests;
