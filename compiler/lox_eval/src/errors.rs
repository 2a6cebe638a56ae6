//! Runtime errors.
//!
//! `EvalErrorKind` is the structured category; the factory functions below
//! are the public way to build an error. The interpreter attaches the source
//! location with [`EvalError::at`] once it knows which node failed.

use std::fmt;

use lox_diagnostic::{Diagnostic, ErrorCode};
use lox_ir::{BinaryOp, Span};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Operators
    OperandNotNumber,
    OperandsNotNumbers { op: BinaryOp },
    InvalidAddOperands,
    DivisionByZero,

    // Names and properties
    UndefinedVariable { name: String },
    UndefinedProperty { name: String },
    PropertyOnNonInstance,
    FieldOnNonInstance,

    // Calls
    NotCallable,
    ArityMismatch { expected: usize, got: usize },
    StackOverflow { limit: usize },
    InitializerReturnedValue,
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::OperandNotNumber | Self::OperandsNotNumbers { .. } | Self::InvalidAddOperands => {
                ErrorCode::E6001
            }
            Self::UndefinedVariable { .. } => ErrorCode::E6002,
            Self::UndefinedProperty { .. } => ErrorCode::E6003,
            Self::ArityMismatch { .. } => ErrorCode::E6004,
            Self::NotCallable => ErrorCode::E6005,
            Self::DivisionByZero => ErrorCode::E6006,
            Self::StackOverflow { .. } => ErrorCode::E6007,
            Self::PropertyOnNonInstance | Self::FieldOnNonInstance => ErrorCode::E6008,
            Self::InitializerReturnedValue => ErrorCode::E6009,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperandNotNumber => write!(f, "Operand must be a number."),
            Self::OperandsNotNumbers { op } => {
                write!(f, "Operands of '{}' must be numbers.", op.as_symbol())
            }
            Self::InvalidAddOperands => write!(f, "Operands must be two numbers or two strings."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::UndefinedProperty { name } => write!(f, "Undefined property '{name}'."),
            Self::PropertyOnNonInstance => write!(f, "Only instances have properties."),
            Self::FieldOnNonInstance => write!(f, "Only instances have fields."),
            Self::NotCallable => write!(f, "Can only call functions and classes."),
            Self::ArityMismatch { expected, got } => {
                write!(f, "Expected {expected} arguments but got {got}.")
            }
            Self::StackOverflow { .. } => write!(f, "Stack overflow."),
            Self::InitializerReturnedValue => {
                write!(f, "Can't return a value from an initializer.")
            }
        }
    }
}

/// A runtime error. Aborts the rest of the run that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// `kind.to_string()`, kept so callers can read it without formatting.
    pub message: String,
    pub span: Option<Span>,
    /// Source line of the failing node, 0 until located.
    pub line: u32,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
            line: 0,
        }
    }

    /// Attach a location unless one is already set.
    ///
    /// Errors raised inside a callee keep the innermost location.
    #[must_use]
    pub fn at(mut self, span: Span, line: u32) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
            self.line = line;
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.message.clone())
            .with_line(self.line);
        match self.span {
            Some(span) => diag.with_label(span, ""),
            None => diag,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.line)
    }
}

impl std::error::Error for EvalError {}

// Operator errors

#[cold]
pub fn operand_not_number() -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperandNotNumber)
}

#[cold]
pub fn operands_not_numbers(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperandsNotNumbers { op })
}

#[cold]
pub fn invalid_add_operands() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAddOperands)
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Name and property errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_property(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProperty {
        name: name.to_string(),
    })
}

#[cold]
pub fn property_on_non_instance() -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyOnNonInstance)
}

#[cold]
pub fn field_on_non_instance() -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldOnNonInstance)
}

// Call errors

#[cold]
pub fn not_callable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable)
}

#[cold]
pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch { expected, got })
}

#[cold]
pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { limit })
}

#[cold]
pub fn initializer_returned_value() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InitializerReturnedValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_messages() {
        assert_eq!(
            operands_not_numbers(BinaryOp::Sub).message,
            "Operands of '-' must be numbers."
        );
        assert_eq!(
            arity_mismatch(0, 1).message,
            "Expected 0 arguments but got 1."
        );
        assert_eq!(
            undefined_variable("x").message,
            "Undefined variable 'x'."
        );
    }

    #[test]
    fn test_first_location_wins() {
        let error = division_by_zero()
            .at(Span::new(4, 5), 2)
            .at(Span::new(0, 10), 7);
        assert_eq!(error.line, 2);
        assert_eq!(error.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn test_diagnostic_rendering() {
        let diag = division_by_zero().at(Span::new(0, 1), 3).to_diagnostic();
        assert_eq!(diag.to_string(), "[line 3] error[E6006]: Division by zero.");
    }

    #[test]
    fn test_codes_are_runtime() {
        let errors = [
            operand_not_number(),
            invalid_add_operands(),
            undefined_property("x"),
            field_on_non_instance(),
            not_callable(),
            stack_overflow(8),
            initializer_returned_value(),
        ];
        for error in errors {
            assert!(error.code().as_str().starts_with("E6"), "{:?}", error.kind);
        }
    }
}
