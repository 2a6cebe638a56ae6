//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use crate::{ExprId, ExprRange, Name, Span};

/// Expression node.
///
/// `line` is the line runtime errors for this node are reported on: the
/// operator's line for unary/binary expressions, the closing `)` for calls,
/// the identifier's line for variables and properties.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub line: u32,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, line: u32) -> Self {
        Expr { kind, span, line }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Nil,
    Bool(bool),
    /// Number literal stored as `f64::to_bits`.
    Number(u64),
    /// String literal contents.
    String(Name),

    /// `( a, b, c )`: every member is evaluated, the last one is the value.
    Grouping(ExprRange),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `and` / `or`: the right side only runs when the left side does not
    /// decide the result.
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },

    /// Variable read. Resolved through the hop-count table by `ExprId`.
    Variable(Name),

    /// `name = value`. Resolved like `Variable`.
    Assign {
        name: Name,
        value: ExprId,
    },

    Call {
        callee: ExprId,
        args: ExprRange,
    },

    /// `object.name`
    Get {
        object: ExprId,
        name: Name,
    },

    /// `object.name = value`
    Set {
        object: ExprId,
        name: Name,
        value: ExprId,
    },

    /// `this` inside a method body. Resolved like a variable named `this`.
    This,
}

impl ExprKind {
    #[inline]
    pub fn number(value: f64) -> Self {
        ExprKind::Number(value.to_bits())
    }
}
