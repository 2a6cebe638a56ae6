use super::*;
use crate::ast::{ExprKind, StmtKind};
use crate::Span;
use pretty_assertions::assert_eq;

fn number(arena: &mut ExprArena, value: f64) -> ExprId {
    arena.alloc_expr(Expr::new(ExprKind::number(value), Span::DUMMY, 1))
}

#[test]
fn test_alloc_and_get_expr() {
    let mut arena = ExprArena::new();
    let one = number(&mut arena, 1.0);
    let two = number(&mut arena, 2.0);

    assert_eq!(one, ExprId::new(0));
    assert_eq!(two, ExprId::new(1));
    assert_eq!(arena.get_expr(two).kind, ExprKind::number(2.0));
    assert_eq!(arena.get_expr(one).kind, ExprKind::number(1.0));
}

#[test]
fn test_expr_lists_are_independent_ranges() {
    let mut arena = ExprArena::new();
    let a = number(&mut arena, 1.0);
    let b = number(&mut arena, 2.0);
    let c = number(&mut arena, 3.0);

    let first = arena.alloc_expr_list([a, b]);
    let second = arena.alloc_expr_list([c]);
    let empty = arena.alloc_expr_list([]);

    assert_eq!(arena.get_expr_list(first), &[a, b]);
    assert_eq!(arena.get_expr_list(second), &[c]);
    assert!(empty.is_empty());
    assert_eq!(arena.get_expr_list(empty), &[] as &[ExprId]);
}

#[test]
fn test_stmt_lists() {
    let mut arena = ExprArena::new();
    let value = number(&mut arena, 7.0);
    let print = arena.alloc_stmt(Stmt::new(StmtKind::Print(value), Span::DUMMY, 1));
    let block = arena.alloc_stmt_list([print, print]);

    assert_eq!(arena.get_stmt_list(block), &[print, print]);
    assert_eq!(arena.get_stmt(print).kind, StmtKind::Print(value));
}
