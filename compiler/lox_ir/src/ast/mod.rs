//! Syntax tree node types.
//!
//! Nodes are plain `Copy` data that reference children through arena ids.
//! Every pass (printer, resolver, evaluator) walks them with an exhaustive
//! `match` on the kind.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use stmt::{FunctionDecl, Ident, Stmt, StmtKind};
