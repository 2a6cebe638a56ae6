//! Host functions defined in the global frame.

use std::rc::Rc;

use lox_ir::StringInterner;

use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::value::{Callable, NativeFunction, Value};

/// `clock()`: seconds since the interpreter was created.
fn clock(interpreter: &Interpreter, _args: &[Value]) -> EvalResult {
    Ok(Value::Number(interpreter.elapsed_seconds()))
}

const NATIVES: &[(&str, usize, crate::value::NativeFn)] = &[("clock", 0, clock)];

pub(crate) fn define_natives(globals: &Environment, interner: &StringInterner) {
    for &(name, arity, func) in NATIVES {
        let native = NativeFunction { name, arity, func };
        globals.define(
            interner.intern(name),
            Value::Callable(Callable::Native(Rc::new(native))),
        );
    }
}
