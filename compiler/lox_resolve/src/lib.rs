//! Static scope resolution.
//!
//! Walks the tree once and records, for every local variable reference,
//! how many scopes out its declaration lives. The evaluator walks exactly
//! that many frames at runtime. References that bind to no enclosing scope
//! stay unrecorded and are globals.
//!
//! The top level has no scope on the stack; an empty stack means global.

mod error;

pub use error::ResolveError;

use lox_diagnostic::Diagnostic;
use lox_ir::{
    ExprArena, ExprId, ExprKind, FunctionId, Ident, Name, Resolutions, StmtId, StmtKind,
    StringInterner,
};
use lox_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::trace;

/// The kind of function body being resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ClassKind {
    None,
    Class,
}

/// Resolution result: the hop-count table and any scoping errors.
#[derive(Debug, Default)]
pub struct ResolveOutput {
    pub resolutions: Resolutions,
    pub errors: Vec<ResolveError>,
}

impl ResolveOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(ResolveError::to_diagnostic)
    }
}

/// Scope-tracking walker.
///
/// Each scope maps a name to whether its initializer has finished
/// (`false` = declared only, `true` = defined).
pub struct Resolver<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    scopes: Vec<FxHashMap<Name, bool>>,
    current_function: FunctionKind,
    current_class: ClassKind,
    this_name: Name,
    init_name: Name,
    output: ResolveOutput,
}

impl<'a> Resolver<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Resolver {
            arena,
            interner,
            scopes: Vec::new(),
            current_function: FunctionKind::None,
            current_class: ClassKind::None,
            this_name: interner.intern("this"),
            init_name: interner.intern("init"),
            output: ResolveOutput::default(),
        }
    }

    /// Resolve a statement list and return the table.
    pub fn resolve_program(mut self, statements: &[StmtId]) -> ResolveOutput {
        self.resolve_stmts(statements);
        self.output
    }

    fn resolve_stmts(&mut self, statements: &[StmtId]) {
        for &stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, id: StmtId) {
        ensure_sufficient_stack(|| self.resolve_stmt_inner(id));
    }

    fn resolve_stmt_inner(&mut self, id: StmtId) {
        let arena = self.arena;
        let stmt = *arena.get_stmt(id);
        match stmt.kind {
            StmtKind::Expression(expr) | StmtKind::Print(expr) => self.resolve_expr(expr),
            StmtKind::Var { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(name.name);
            }
            StmtKind::Block(body) => {
                self.begin_scope();
                self.resolve_stmts(arena.get_stmt_list(body));
                self.end_scope();
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            StmtKind::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            StmtKind::Function(function) => {
                let name = arena.get_function(function).name;
                self.declare(name);
                self.define(name.name);
                self.resolve_function(function, FunctionKind::Function);
            }
            StmtKind::Return { value } => {
                if self.current_function == FunctionKind::None {
                    self.report(ResolveError::top_level_return(stmt.span, stmt.line));
                }
                // A value returned from `init` is rejected when it runs.
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            StmtKind::Class { name, methods } => {
                self.declare(name);
                self.define(name.name);

                let enclosing_class = self.current_class;
                self.current_class = ClassKind::Class;

                self.begin_scope();
                self.define(self.this_name);
                for &method in arena.get_function_list(methods) {
                    let kind = if arena.get_function(method).name.name == self.init_name {
                        FunctionKind::Initializer
                    } else {
                        FunctionKind::Method
                    };
                    self.resolve_function(method, kind);
                }
                self.end_scope();

                self.current_class = enclosing_class;
            }
        }
    }

    fn resolve_function(&mut self, id: FunctionId, kind: FunctionKind) {
        let arena = self.arena;
        let decl = arena.get_function(id);
        let enclosing = self.current_function;
        self.current_function = kind;

        self.begin_scope();
        for &param in &decl.params {
            self.declare(param);
            self.define(param.name);
        }
        self.resolve_stmts(arena.get_stmt_list(decl.body));
        self.end_scope();

        self.current_function = enclosing;
    }

    fn resolve_expr(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.resolve_expr_inner(id));
    }

    fn resolve_expr_inner(&mut self, id: ExprId) {
        let arena = self.arena;
        let expr = *arena.get_expr(id);
        match expr.kind {
            ExprKind::Nil | ExprKind::Bool(_) | ExprKind::Number(_) | ExprKind::String(_) => {}
            ExprKind::Grouping(members) => {
                for &member in arena.get_expr_list(members) {
                    self.resolve_expr(member);
                }
            }
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                for &arg in arena.get_expr_list(args) {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Variable(name) => {
                let in_own_initializer = self
                    .scopes
                    .last()
                    .is_some_and(|scope| scope.get(&name) == Some(&false));
                if in_own_initializer {
                    self.report(ResolveError::read_in_own_initializer(
                        self.interner.lookup(name),
                        expr.span,
                        expr.line,
                    ));
                }
                self.resolve_local(id, name);
            }
            ExprKind::Assign { name, value } => {
                self.resolve_expr(value);
                self.resolve_local(id, name);
            }
            ExprKind::Get { object, .. } => self.resolve_expr(object),
            ExprKind::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            }
            ExprKind::This => {
                if self.current_class == ClassKind::None {
                    self.report(ResolveError::this_outside_class(expr.span, expr.line));
                    return;
                }
                self.resolve_local(id, self.this_name);
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Add `ident` to the innermost scope as not yet initialized.
    fn declare(&mut self, ident: Ident) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if scope.contains_key(&ident.name) {
            let error = ResolveError::already_declared(
                self.interner.lookup(ident.name),
                ident.span,
                ident.line,
            );
            self.report(error);
            return;
        }
        scope.insert(ident.name, false);
    }

    fn define(&mut self, name: Name) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, true);
        }
    }

    /// Record how many scopes out `name` is declared, if any scope has it.
    fn resolve_local(&mut self, expr: ExprId, name: Name) {
        let found = self
            .scopes
            .iter()
            .rev()
            .position(|scope| scope.contains_key(&name));
        if let Some(depth) = found {
            trace!(?expr, depth, "local");
            #[expect(
                clippy::cast_possible_truncation,
                reason = "scope depth is bounded by source nesting"
            )]
            self.output.resolutions.record(expr, depth as u32);
        }
    }

    fn report(&mut self, error: ResolveError) {
        tracing::debug!(line = error.line, message = %error.message, "resolve error");
        self.output.errors.push(error);
    }
}

/// Resolve a parsed program.
#[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
pub fn resolve(
    arena: &ExprArena,
    statements: &[StmtId],
    interner: &StringInterner,
) -> ResolveOutput {
    let output = Resolver::new(arena, interner).resolve_program(statements);
    tracing::debug!(
        locals = output.resolutions.len(),
        errors = output.errors.len(),
        "resolved"
    );
    output
}

#[cfg(test)]
mod tests;
