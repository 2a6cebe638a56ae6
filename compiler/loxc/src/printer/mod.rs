//! Parenthesized prefix rendering of a parsed program, for `lox parse`.
//!
//! ```text
//! print 1 + 2 * 3;      (print (+ 1 (* 2 3)))
//! var a = 1;            (var a 1)
//! fun add(a, b) { }     (fun add (a b))
//! ```

use lox_eval::format_number;
use lox_ir::{ExprArena, ExprId, ExprKind, FunctionId, StmtId, StmtKind, StringInterner};
use lox_stack::ensure_sufficient_stack;

/// Render every top-level statement, one per line.
pub fn print_program(
    arena: &ExprArena,
    statements: &[StmtId],
    interner: &StringInterner,
) -> String {
    let printer = TreePrinter { arena, interner };
    let mut out = String::new();
    for &stmt in statements {
        printer.stmt(stmt, &mut out);
        out.push('\n');
    }
    out
}

struct TreePrinter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
}

impl TreePrinter<'_> {
    fn stmt(&self, id: StmtId, out: &mut String) {
        ensure_sufficient_stack(|| self.stmt_inner(id, out));
    }

    fn stmt_inner(&self, id: StmtId, out: &mut String) {
        match self.arena.get_stmt(id).kind {
            StmtKind::Expression(expr) => {
                out.push_str("(; ");
                self.expr(expr, out);
                out.push(')');
            }
            StmtKind::Print(expr) => {
                out.push_str("(print ");
                self.expr(expr, out);
                out.push(')');
            }
            StmtKind::Var { name, initializer } => {
                out.push_str("(var ");
                out.push_str(self.interner.lookup(name.name));
                if let Some(init) = initializer {
                    out.push(' ');
                    self.expr(init, out);
                }
                out.push(')');
            }
            StmtKind::Block(body) => {
                out.push_str("(block");
                for &stmt in self.arena.get_stmt_list(body) {
                    out.push(' ');
                    self.stmt(stmt, out);
                }
                out.push(')');
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push_str("(if ");
                self.expr(condition, out);
                out.push(' ');
                self.stmt(then_branch, out);
                if let Some(else_branch) = else_branch {
                    out.push(' ');
                    self.stmt(else_branch, out);
                }
                out.push(')');
            }
            StmtKind::While { condition, body } => {
                out.push_str("(while ");
                self.expr(condition, out);
                out.push(' ');
                self.stmt(body, out);
                out.push(')');
            }
            StmtKind::Function(function) => self.function(function, out),
            StmtKind::Return { value } => {
                out.push_str("(return");
                if let Some(value) = value {
                    out.push(' ');
                    self.expr(value, out);
                }
                out.push(')');
            }
            StmtKind::Class { name, methods } => {
                out.push_str("(class ");
                out.push_str(self.interner.lookup(name.name));
                for &method in self.arena.get_function_list(methods) {
                    out.push(' ');
                    self.function(method, out);
                }
                out.push(')');
            }
        }
    }

    fn function(&self, id: FunctionId, out: &mut String) {
        let decl = self.arena.get_function(id);
        out.push_str("(fun ");
        out.push_str(self.interner.lookup(decl.name.name));
        out.push_str(" (");
        for (i, param) in decl.params.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(self.interner.lookup(param.name));
        }
        out.push(')');
        for &stmt in self.arena.get_stmt_list(decl.body) {
            out.push(' ');
            self.stmt(stmt, out);
        }
        out.push(')');
    }

    fn expr(&self, id: ExprId, out: &mut String) {
        ensure_sufficient_stack(|| self.expr_inner(id, out));
    }

    fn expr_inner(&self, id: ExprId, out: &mut String) {
        match self.arena.get_expr(id).kind {
            ExprKind::Nil => out.push_str("nil"),
            ExprKind::Bool(b) => out.push_str(if b { "true" } else { "false" }),
            ExprKind::Number(bits) => out.push_str(&format_number(f64::from_bits(bits))),
            ExprKind::String(contents) => {
                out.push('"');
                out.push_str(self.interner.lookup(contents));
                out.push('"');
            }
            ExprKind::Grouping(members) => {
                out.push_str("(group");
                for &member in self.arena.get_expr_list(members) {
                    out.push(' ');
                    self.expr(member, out);
                }
                out.push(')');
            }
            ExprKind::Unary { op, operand } => {
                self.parenthesize(op.as_symbol(), &[operand], out);
            }
            ExprKind::Binary { op, left, right } => {
                self.parenthesize(op.as_symbol(), &[left, right], out);
            }
            ExprKind::Logical { op, left, right } => {
                self.parenthesize(op.as_symbol(), &[left, right], out);
            }
            ExprKind::Variable(name) => out.push_str(self.interner.lookup(name)),
            ExprKind::Assign { name, value } => {
                out.push_str("(= ");
                out.push_str(self.interner.lookup(name));
                out.push(' ');
                self.expr(value, out);
                out.push(')');
            }
            ExprKind::Call { callee, args } => {
                out.push_str("(call ");
                self.expr(callee, out);
                for &arg in self.arena.get_expr_list(args) {
                    out.push(' ');
                    self.expr(arg, out);
                }
                out.push(')');
            }
            ExprKind::Get { object, name } => {
                out.push_str("(. ");
                self.expr(object, out);
                out.push(' ');
                out.push_str(self.interner.lookup(name));
                out.push(')');
            }
            ExprKind::Set {
                object,
                name,
                value,
            } => {
                out.push_str("(= (. ");
                self.expr(object, out);
                out.push(' ');
                out.push_str(self.interner.lookup(name));
                out.push_str(") ");
                self.expr(value, out);
                out.push(')');
            }
            ExprKind::This => out.push_str("this"),
        }
    }

    fn parenthesize(&self, head: &str, operands: &[ExprId], out: &mut String) {
        out.push('(');
        out.push_str(head);
        for &operand in operands {
            out.push(' ');
            self.expr(operand, out);
        }
        out.push(')');
    }
}
