//! Calls, instantiation and class declarations.

use std::rc::Rc;

use lox_ir::{Expr, ExprId, ExprRange, FunctionRange, Ident};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use super::{Flow, Interpreter};
use crate::environment::Environment;
use crate::errors::{
    arity_mismatch, initializer_returned_value, not_callable, stack_overflow, undefined_variable,
    EvalResult,
};
use crate::value::{Callable, ClassValue, FunctionValue, Instance, Value};
use crate::Program;

impl Interpreter {
    /// `callee(args)`: evaluate the callee, then the arguments left to
    /// right, then check the callee and the argument count.
    pub(super) fn eval_call(
        &mut self,
        program: &Rc<Program>,
        env: &Environment,
        expr: &Expr,
        callee: ExprId,
        args: ExprRange,
    ) -> EvalResult {
        let callee = self.evaluate(program, env, callee)?;

        let mut arguments: SmallVec<[Value; 8]> = SmallVec::with_capacity(args.len());
        for &arg in program.arena.get_expr_list(args) {
            arguments.push(self.evaluate(program, env, arg)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(not_callable().at(expr.span, expr.line));
        };
        let arity = callable.arity();
        if arity != arguments.len() {
            return Err(arity_mismatch(arity, arguments.len()).at(expr.span, expr.line));
        }

        self.call(&callable, &arguments)
            .map_err(|e| e.at(expr.span, expr.line))
    }

    /// Invoke a callable with already-checked arguments.
    pub fn call(&mut self, callable: &Callable, args: &[Value]) -> EvalResult {
        match callable {
            Callable::Function(function) => self.call_function(function, args),
            Callable::Native(native) => (native.func)(self, args),
            Callable::Class(class) => self.instantiate(class, args),
        }
    }

    /// Run a user function body in a fresh frame under its closure.
    fn call_function(&mut self, function: &FunctionValue, args: &[Value]) -> EvalResult {
        let _depth = self
            .call_depth
            .enter()
            .map_err(|exceeded| stack_overflow(exceeded.limit))?;
        trace!(name = function.name, depth = self.call_depth.depth(), "call");

        let program = &function.program;
        let decl = program.arena.get_function(function.declaration);
        let frame = function.closure.child();
        for (param, arg) in decl.params.iter().zip(args) {
            frame.define(param.name, arg.clone());
        }

        let flow = self.execute_block(program, decl.body, frame)?;

        if function.is_initializer {
            if let Flow::Return {
                value: Some(_),
                span,
                line,
            } = flow
            {
                return Err(initializer_returned_value().at(span, line));
            }
            return function
                .closure
                .get_at(0, self.names.this)
                .ok_or_else(|| undefined_variable("this"));
        }

        match flow {
            Flow::Return {
                value: Some(value), ..
            } => Ok(value),
            Flow::Return { value: None, .. } | Flow::Normal => Ok(Value::Nil),
        }
    }

    /// Calling a class: make an instance and run `init` on it if present.
    fn instantiate(&mut self, class: &Rc<ClassValue>, args: &[Value]) -> EvalResult {
        let instance = Instance::new(Rc::clone(class));
        if let Some(init) = class.initializer() {
            let bound = init.bind(&instance, self.names.this);
            self.call_function(&bound, args)?;
        }
        Ok(Value::Instance(instance))
    }

    /// Bind a class value under its name. Methods close over `env`.
    pub(super) fn declare_class(
        &self,
        program: &Rc<Program>,
        env: &Environment,
        name: Ident,
        methods: FunctionRange,
    ) {
        let mut table = FxHashMap::default();
        for &method in program.arena.get_function_list(methods) {
            let method_name = program.arena.get_function(method).name.name;
            let value = FunctionValue {
                name: self.interner.lookup(method_name),
                declaration: method,
                program: Rc::clone(program),
                closure: env.clone(),
                is_initializer: method_name == self.names.init,
            };
            table.insert(method_name, Rc::new(value));
        }

        let class = ClassValue {
            name: self.interner.lookup(name.name),
            methods: table,
        };
        env.define(name.name, Value::Callable(Callable::Class(Rc::new(class))));
    }
}
