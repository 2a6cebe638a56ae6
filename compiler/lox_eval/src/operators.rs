//! Unary and binary operators.
//!
//! Plain enum dispatch over the closed set of operators. Errors come back
//! without a location; the caller attaches the operator's line.

use lox_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    division_by_zero, invalid_add_operands, operand_not_number, operands_not_numbers, EvalError,
    EvalResult,
};
use crate::Value;

/// Apply a prefix operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => operand
            .as_number()
            .map(|n| Value::Number(-n))
            .ok_or_else(operand_not_number),
    }
}

/// Apply an infix operator to two evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => numbers(op, left, right).map(|(a, b)| Value::Number(a - b)),
        BinaryOp::Mul => numbers(op, left, right).map(|(a, b)| Value::Number(a * b)),
        BinaryOp::Div => {
            let (a, b) = numbers(op, left, right)?;
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Ok(Value::Number(a / b))
        }
        BinaryOp::Lt => numbers(op, left, right).map(|(a, b)| Value::Bool(a < b)),
        BinaryOp::LtEq => numbers(op, left, right).map(|(a, b)| Value::Bool(a <= b)),
        BinaryOp::Gt => numbers(op, left, right).map(|(a, b)| Value::Bool(a > b)),
        BinaryOp::GtEq => numbers(op, left, right).map(|(a, b)| Value::Bool(a >= b)),
    }
}

/// `+` adds two numbers or concatenates two strings.
fn add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        _ => Err(invalid_add_operands()),
    }
}

fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64), EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(operands_not_numbers(op)),
    }
}
