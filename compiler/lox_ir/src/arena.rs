//! Flat storage for one parse.
//!
//! All nodes of a program live in contiguous vectors; ids index into them.
//! Child lists are copied into per-kind list vectors and referenced by range.

use crate::ast::{Expr, FunctionDecl, Stmt};
use crate::{ExprId, ExprRange, FunctionId, FunctionRange, StmtId, StmtRange};

/// Convert an arena length to a `u32` index.
///
/// # Panics
/// Panics if the arena holds more than `u32::MAX - 1` entries of one kind.
#[inline]
fn to_index(len: usize, what: &str) -> u32 {
    match u32::try_from(len) {
        Ok(index) if index != u32::MAX => index,
        _ => panic!("arena overflow: more than {} {what}", u32::MAX - 1),
    }
}

/// Arena holding every node of one parsed program.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    functions: Vec<FunctionDecl>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    function_lists: Vec<FunctionId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arena sized for a source of `source_len` bytes.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimate = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimate),
            stmts: Vec::with_capacity(estimate / 4),
            ..Self::default()
        }
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_index(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_index(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn alloc_function(&mut self, function: FunctionDecl) -> FunctionId {
        let id = FunctionId::new(to_index(self.functions.len(), "functions"));
        self.functions.push(function);
        id
    }

    #[inline]
    pub fn get_function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    pub fn alloc_expr_list(&mut self, items: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_index(self.expr_lists.len(), "list entries");
        self.expr_lists.extend(items);
        let len = to_index(self.expr_lists.len(), "list entries") - start;
        ExprRange::new(start, len)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    pub fn alloc_stmt_list(&mut self, items: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_index(self.stmt_lists.len(), "list entries");
        self.stmt_lists.extend(items);
        let len = to_index(self.stmt_lists.len(), "list entries") - start;
        StmtRange::new(start, len)
    }

    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.bounds()]
    }

    pub fn alloc_function_list(
        &mut self,
        items: impl IntoIterator<Item = FunctionId>,
    ) -> FunctionRange {
        let start = to_index(self.function_lists.len(), "list entries");
        self.function_lists.extend(items);
        let len = to_index(self.function_lists.len(), "list entries") - start;
        FunctionRange::new(start, len)
    }

    #[inline]
    pub fn get_function_list(&self, range: FunctionRange) -> &[FunctionId] {
        &self.function_lists[range.bounds()]
    }
}

#[cfg(test)]
mod tests;
