//! Runtime values.

use std::fmt;
use std::rc::Rc;

use lox_ir::{FunctionId, Name};
use rustc_hash::FxHashMap;

use crate::environment::{Environment, LocalScope};
use crate::errors::EvalResult;
use crate::interpreter::Interpreter;
use crate::Program;

/// A Lox value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Callable(Callable),
    Instance(Instance),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::Str(text.into())
    }

    /// `nil` and `false` are falsy; everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }
}

/// Same tag and same content. Functions, classes and instances compare by
/// identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::Callable(callable) => write!(f, "{callable}"),
            Value::Instance(instance) => write!(f, "{} instance", instance.class().name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Number(n) => write!(f, "{n:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Text of a number as `print` shows it. Integral values have no
/// fractional part: `4.0` prints as `4`.
pub fn format_number(n: f64) -> String {
    let text = n.to_string();
    match text.strip_suffix(".0") {
        Some(integral) => integral.to_string(),
        None => text,
    }
}

/// Anything that can appear before `(`.
#[derive(Clone)]
pub enum Callable {
    Function(Rc<FunctionValue>),
    Native(Rc<NativeFunction>),
    Class(Rc<ClassValue>),
}

impl Callable {
    /// Number of arguments a call must pass.
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(function) => function.arity(),
            Callable::Native(native) => native.arity,
            Callable::Class(class) => class.arity(),
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Function(a), Callable::Function(b)) => Rc::ptr_eq(a, b),
            (Callable::Native(a), Callable::Native(b)) => Rc::ptr_eq(a, b),
            (Callable::Class(a), Callable::Class(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Function(function) => write!(f, "<fn {}>", function.name),
            Callable::Native(_) => write!(f, "<native fn>"),
            Callable::Class(class) => write!(f, "{}", class.name),
        }
    }
}

/// A user function or method closed over the frame it was declared in.
///
/// The declaration lives in `program`, which stays alive as long as any
/// function value from it does.
#[derive(Clone)]
pub struct FunctionValue {
    pub name: &'static str,
    pub declaration: FunctionId,
    pub program: Rc<Program>,
    pub closure: Environment,
    /// Set for a class's `init`; calls return `this` instead of the body's
    /// result.
    pub is_initializer: bool,
}

impl FunctionValue {
    pub fn arity(&self) -> usize {
        self.program.arena.get_function(self.declaration).arity()
    }

    /// Method bound to `instance`: the closure gains one frame defining
    /// `this`.
    #[must_use]
    pub fn bind(&self, instance: &Instance, this: Name) -> FunctionValue {
        let closure = self.closure.child();
        closure.define(this, Value::Instance(instance.clone()));
        FunctionValue {
            closure,
            program: Rc::clone(&self.program),
            ..*self
        }
    }
}

/// Signature of a host function.
pub type NativeFn = fn(&Interpreter, &[Value]) -> EvalResult;

/// A function implemented by the host.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: NativeFn,
}

/// A class: a name and its unbound methods.
pub struct ClassValue {
    pub name: &'static str,
    pub methods: FxHashMap<Name, Rc<FunctionValue>>,
}

impl ClassValue {
    pub fn find_method(&self, name: Name) -> Option<&Rc<FunctionValue>> {
        self.methods.get(&name)
    }

    pub fn initializer(&self) -> Option<&Rc<FunctionValue>> {
        self.methods.values().find(|method| method.is_initializer)
    }

    /// Arity of `init`, or 0 without one.
    pub fn arity(&self) -> usize {
        self.initializer().map_or(0, |init| init.arity())
    }
}

/// An object created by calling a class. Clones share the same fields.
#[derive(Clone)]
pub struct Instance {
    class: Rc<ClassValue>,
    fields: LocalScope<FxHashMap<Name, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassValue>) -> Self {
        Instance {
            class,
            fields: LocalScope::default(),
        }
    }

    pub fn class(&self) -> &Rc<ClassValue> {
        &self.class
    }

    pub fn get_field(&self, name: Name) -> Option<Value> {
        self.fields.borrow().get(&name).cloned()
    }

    pub fn set_field(&self, name: Name, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.fields.ptr_eq(&other.fields)
    }
}
