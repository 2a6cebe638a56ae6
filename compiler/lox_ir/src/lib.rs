//! Lox IR - shared data model for the interpreter pipeline.
//!
//! This crate contains:
//! - Spans and interned names
//! - Tokens and `TokenList` for lexer output
//! - The flat syntax tree (`ExprArena`, ids, node kinds)
//! - The resolver's hop-count table
//!
//! Floats are stored as `u64` bits wherever a type needs `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to catch size regressions in frequently-allocated node types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod resolution;
mod span;
mod token;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, Expr, ExprKind, FunctionDecl, Ident, LogicalOp, Stmt, StmtKind, UnaryOp,
};
pub use expr_id::{ExprId, ExprRange, FunctionId, FunctionRange, StmtId, StmtRange};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use resolution::Resolutions;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};

static_assert_size!(Span, 8);
static_assert_size!(Name, 4);
static_assert_size!(ExprId, 4);
