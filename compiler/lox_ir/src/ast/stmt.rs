//! Statement nodes and declarations.

use std::fmt;

use crate::{ExprId, FunctionRange, Name, Span, StmtId, StmtRange};
use crate::FunctionId;

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span, line: u32) -> Self {
        Stmt { kind, span, line }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
///
/// There is no `for` variant: `for` loops are rewritten by the parser into a
/// block holding the initializer and a `While`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Expression(ExprId),
    Print(ExprId),
    Var {
        name: Ident,
        initializer: Option<ExprId>,
    },
    /// Braced block with its own scope.
    Block(StmtRange),
    If {
        condition: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },
    While {
        condition: ExprId,
        body: StmtId,
    },
    Function(FunctionId),
    Return {
        value: Option<ExprId>,
    },
    Class {
        name: Ident,
        methods: FunctionRange,
    },
}

/// A declared name together with where it was written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
    pub line: u32,
}

impl Ident {
    pub fn new(name: Name, span: Span, line: u32) -> Self {
        Ident { name, span, line }
    }
}

/// Function declaration: a named `fun` or a class method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: StmtRange,
    pub span: Span,
}

impl FunctionDecl {
    /// Number of declared parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
