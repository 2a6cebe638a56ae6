use super::*;
use lox_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

struct Resolved {
    arena: ExprArena,
    statements: Vec<StmtId>,
    output: ResolveOutput,
    interner: StringInterner,
}

fn resolve_source(source: &str) -> Resolved {
    let interner = StringInterner::new();
    let lexed = lox_lexer::lex(source, &interner);
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    let parsed = lox_parse::parse(&lexed.tokens);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    let output = resolve(&parsed.arena, &parsed.statements, &interner);
    Resolved {
        arena: parsed.arena,
        statements: parsed.statements,
        output,
        interner,
    }
}

impl Resolved {
    /// Expressions reachable from the program, in allocation order.
    ///
    /// An assignment target is parsed as a variable before it is replaced by
    /// the assignment node; that first node is left unreachable.
    fn reachable(&self) -> Vec<ExprId> {
        let mut seen = rustc_hash::FxHashSet::default();
        for &stmt in &self.statements {
            self.collect_stmt(stmt, &mut seen);
        }
        let mut ids: Vec<ExprId> = seen.into_iter().collect();
        ids.sort();
        ids
    }

    fn collect_stmt(&self, id: StmtId, seen: &mut rustc_hash::FxHashSet<ExprId>) {
        match self.arena.get_stmt(id).kind {
            StmtKind::Expression(e) | StmtKind::Print(e) => self.collect_expr(e, seen),
            StmtKind::Var { initializer, .. } => {
                if let Some(e) = initializer {
                    self.collect_expr(e, seen);
                }
            }
            StmtKind::Block(body) => {
                for &s in self.arena.get_stmt_list(body) {
                    self.collect_stmt(s, seen);
                }
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.collect_expr(condition, seen);
                self.collect_stmt(then_branch, seen);
                if let Some(s) = else_branch {
                    self.collect_stmt(s, seen);
                }
            }
            StmtKind::While { condition, body } => {
                self.collect_expr(condition, seen);
                self.collect_stmt(body, seen);
            }
            StmtKind::Function(f) => self.collect_function(f, seen),
            StmtKind::Return { value } => {
                if let Some(e) = value {
                    self.collect_expr(e, seen);
                }
            }
            StmtKind::Class { methods, .. } => {
                for &m in self.arena.get_function_list(methods) {
                    self.collect_function(m, seen);
                }
            }
        }
    }

    fn collect_function(&self, id: FunctionId, seen: &mut rustc_hash::FxHashSet<ExprId>) {
        for &s in self.arena.get_stmt_list(self.arena.get_function(id).body) {
            self.collect_stmt(s, seen);
        }
    }

    fn collect_expr(&self, id: ExprId, seen: &mut rustc_hash::FxHashSet<ExprId>) {
        seen.insert(id);
        match self.arena.get_expr(id).kind {
            ExprKind::Grouping(list) | ExprKind::Call { args: list, .. } => {
                if let ExprKind::Call { callee, .. } = self.arena.get_expr(id).kind {
                    self.collect_expr(callee, seen);
                }
                for &e in self.arena.get_expr_list(list) {
                    self.collect_expr(e, seen);
                }
            }
            ExprKind::Unary { operand, .. } => self.collect_expr(operand, seen),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.collect_expr(left, seen);
                self.collect_expr(right, seen);
            }
            ExprKind::Assign { value, .. } => self.collect_expr(value, seen),
            ExprKind::Get { object, .. } => self.collect_expr(object, seen),
            ExprKind::Set { object, value, .. } => {
                self.collect_expr(object, seen);
                self.collect_expr(value, seen);
            }
            _ => {}
        }
    }

    /// Depth of every read or write of `name`, in allocation order.
    fn depths_of(&self, name: &str) -> Vec<Option<u32>> {
        let name = self.interner.intern(name);
        self.reachable()
            .into_iter()
            .filter(|&id| match self.arena.get_expr(id).kind {
                ExprKind::Variable(n) | ExprKind::Assign { name: n, .. } => n == name,
                _ => false,
            })
            .map(|id| self.output.resolutions.depth(id))
            .collect()
    }

    fn this_depths(&self) -> Vec<Option<u32>> {
        self.reachable()
            .into_iter()
            .filter(|&id| matches!(self.arena.get_expr(id).kind, ExprKind::This))
            .map(|id| self.output.resolutions.depth(id))
            .collect()
    }

    fn messages(&self) -> Vec<&str> {
        self.output
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }
}

#[test]
fn test_shadowing_depths() {
    let r = resolve_source(
        "var a = 1;
         { var a = 2; { print a; } print a; }
         print a;",
    );
    assert!(!r.output.has_errors());
    assert_eq!(r.depths_of("a"), vec![Some(1), Some(0), None]);
}

#[test]
fn test_globals_are_unrecorded() {
    let r = resolve_source("var g = 1; g = g + 1; print g;");
    assert_eq!(r.depths_of("g"), vec![None, None, None]);
    assert!(r.output.resolutions.is_empty());
}

#[test]
fn test_redeclaration_in_block() {
    let r = resolve_source("{ var a = 1; var a = 2; }");
    assert_eq!(
        r.messages(),
        vec!["Variable with this name already declared in this scope."]
    );
    let error = &r.output.errors[0];
    assert_eq!(error.code, ErrorCode::E2001);
    assert_eq!(error.location, "at 'a'");
}

#[test]
fn test_global_redeclaration_is_allowed() {
    let r = resolve_source("var a = 1; var a = 2;");
    assert!(!r.output.has_errors());
}

#[test]
fn test_duplicate_parameter() {
    let r = resolve_source("fun f(a, a) {}");
    assert_eq!(r.output.errors.len(), 1);
    assert_eq!(r.output.errors[0].code, ErrorCode::E2001);
}

#[test]
fn test_read_in_own_initializer() {
    let r = resolve_source("var a = 1; { var a = a; }");
    assert_eq!(
        r.messages(),
        vec!["Cannot read local variable in its own initializer."]
    );
}

#[test]
fn test_global_self_initializer_is_allowed() {
    let r = resolve_source("var a = a;");
    assert!(!r.output.has_errors());
}

#[test]
fn test_top_level_return() {
    let r = resolve_source("return 1;");
    assert_eq!(r.messages(), vec!["Cannot return from top-level code."]);
    assert_eq!(r.output.errors[0].location, "at 'return'");

    let r = resolve_source("fun f() { return 1; }");
    assert!(!r.output.has_errors());
}

#[test]
fn test_closure_depths() {
    let r = resolve_source(
        "fun outer() {
           var x = 0;
           fun inner() { x = x + 1; return x; }
           return inner;
         }",
    );
    assert!(!r.output.has_errors());
    // `x + 1`, the assignment, then `return x`.
    assert_eq!(r.depths_of("x"), vec![Some(1), Some(1), Some(1)]);
    assert_eq!(r.depths_of("inner"), vec![Some(0)]);
}

#[test]
fn test_recursive_function_sees_itself() {
    let r = resolve_source("{ fun fib(n) { if (n < 2) return n; return fib(n - 1); } }");
    assert!(!r.output.has_errors());
    assert_eq!(r.depths_of("fib"), vec![Some(1)]);
}

#[test]
fn test_method_parameters_and_this() {
    let r = resolve_source("class A { m(p) { return p + this.q; } }");
    assert!(!r.output.has_errors());
    assert_eq!(r.depths_of("p"), vec![Some(0)]);
    assert_eq!(r.this_depths(), vec![Some(1)]);
}

#[test]
fn test_this_in_closure_inside_method() {
    let r = resolve_source("class A { m() { fun f() { return this; } return f; } }");
    assert!(!r.output.has_errors());
    assert_eq!(r.this_depths(), vec![Some(2)]);
}

#[test]
fn test_this_outside_class() {
    let r = resolve_source("print this; fun f() { return this; }");
    assert_eq!(
        r.messages(),
        vec![
            "Can't use 'this' outside of a class.",
            "Can't use 'this' outside of a class."
        ]
    );
}

#[test]
fn test_errors_do_not_stop_resolution() {
    let r = resolve_source("{ var a = 1; var a = 2; } return;");
    assert_eq!(r.output.errors.len(), 2);
    let lines: Vec<u32> = r.output.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 1]);
}

#[test]
fn test_diagnostic_rendering() {
    let r = resolve_source("{\nvar a = 1;\nvar a = 2;\n}");
    let diag = r.output.diagnostics().next();
    assert_eq!(
        diag.map(|d| d.to_string()),
        Some(
            "[line 3] error[E2001] at 'a': Variable with this name already declared in this scope."
                .to_string()
        )
    );
}
