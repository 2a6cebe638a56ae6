//! Declaration and statement parsing.

use lox_diagnostic::ErrorCode;
use lox_ir::{
    Expr, ExprId, ExprKind, FunctionDecl, FunctionId, Span, Stmt, StmtId, StmtKind,
    StmtRange, TokenKind,
};
use lox_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser, MAX_PARAMS};

/// What a function declaration is being parsed as. Only affects messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionKind {
    Function,
    Method,
}

impl FunctionKind {
    fn as_str(self) -> &'static str {
        match self {
            FunctionKind::Function => "function",
            FunctionKind::Method => "method",
        }
    }
}

impl<'a> Parser<'a> {
    /// `declaration = classDecl | funDecl | varDecl | statement`
    pub(crate) fn parse_declaration(&mut self) -> Result<StmtId, ParseError> {
        trace!(line = self.current().line, "declaration");
        let start = self.current_span();
        let line = self.current().line;

        if self.eat(&TokenKind::Class).is_some() {
            return self.parse_class_decl(start, line);
        }
        if self.eat(&TokenKind::Fun).is_some() {
            let function = self.parse_function(FunctionKind::Function)?;
            return Ok(self.alloc_stmt(StmtKind::Function(function), start, line));
        }
        if self.eat(&TokenKind::Var).is_some() {
            return self.parse_var_decl(start, line);
        }
        self.parse_statement()
    }

    /// `classDecl = "class" IDENT "{" function* "}"`
    fn parse_class_decl(&mut self, start: Span, line: u32) -> Result<StmtId, ParseError> {
        let name = self.expect_ident("Expect class name.")?;
        self.expect(&TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            let method = self
                .parse_function(FunctionKind::Method)
                .map_err(|e| e.with_context("a class body"))?;
            methods.push(method);
        }
        self.expect(&TokenKind::RightBrace, "Expect '}' after class body.")?;

        let methods = self.arena.alloc_function_list(methods);
        Ok(self.alloc_stmt(StmtKind::Class { name, methods }, start, line))
    }

    /// `function = IDENT "(" parameters? ")" block`
    ///
    /// More than eight parameters is reported but parsing carries on.
    fn parse_function(&mut self, kind: FunctionKind) -> Result<FunctionId, ParseError> {
        let kind_str = kind.as_str();
        let name = self.expect_ident(&format!("Expect {kind_str} name."))?;
        self.expect(
            &TokenKind::LeftParen,
            &format!("Expect '(' after {kind_str} name."),
        )?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_PARAMS {
                    let error = self.error_at_current(
                        ErrorCode::E1004,
                        "Cannot have more than 8 parameters.",
                    );
                    self.report(error);
                }
                params.push(self.expect_ident("Expect parameter name.")?);
                if self.eat(&TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.expect(
            &TokenKind::LeftBrace,
            &format!("Expect '{{' before {kind_str} body."),
        )?;
        let body = self.parse_block_body()?;

        Ok(self.arena.alloc_function(FunctionDecl {
            name,
            params,
            body,
            span: name.span.merge(self.previous_span()),
        }))
    }

    /// `varDecl = "var" IDENT ( "=" expression )? ";"`
    fn parse_var_decl(&mut self, start: Span, line: u32) -> Result<StmtId, ParseError> {
        let name = self.expect_ident("Expect variable name.")?;
        let initializer = if self.eat(&TokenKind::Equal).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(
            &TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(self.alloc_stmt(StmtKind::Var { name, initializer }, start, line))
    }

    fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.current_span();
            let line = self.current().line;

            match self.current().kind {
                TokenKind::For => {
                    self.advance();
                    self.parse_for(start, line)
                        .map_err(|e| e.with_context("a for loop"))
                }
                TokenKind::If => {
                    self.advance();
                    self.parse_if(start, line)
                }
                TokenKind::Print => {
                    self.advance();
                    let value = self.parse_expr()?;
                    self.expect(&TokenKind::Semicolon, "Expect ';' after value.")?;
                    Ok(self.alloc_stmt(StmtKind::Print(value), start, line))
                }
                TokenKind::Return => {
                    self.advance();
                    let value = if self.check(&TokenKind::Semicolon) {
                        None
                    } else {
                        Some(self.parse_expr()?)
                    };
                    self.expect(&TokenKind::Semicolon, "Expect ';' after return value.")?;
                    Ok(self.alloc_stmt(StmtKind::Return { value }, start, line))
                }
                TokenKind::While => {
                    self.advance();
                    self.parse_while(start, line)
                }
                TokenKind::LeftBrace => {
                    self.advance();
                    let body = self.parse_block_body()?;
                    Ok(self.alloc_stmt(StmtKind::Block(body), start, line))
                }
                _ => {
                    let expr = self.parse_expr()?;
                    self.expect(&TokenKind::Semicolon, "Expect ';' after expression.")?;
                    Ok(self.alloc_stmt(StmtKind::Expression(expr), start, line))
                }
            }
        })
    }

    /// `for ( init ; cond ; incr ) body`, rewritten into
    /// `{ init; while (cond) { body; incr; } }` with `true` for a missing
    /// condition.
    fn parse_for(&mut self, start: Span, line: u32) -> Result<StmtId, ParseError> {
        self.expect(&TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = match self.current().kind {
            TokenKind::Semicolon => {
                self.advance();
                None
            }
            TokenKind::Var => {
                let var_start = self.current_span();
                let var_line = self.advance().line;
                Some(self.parse_var_decl(var_start, var_line)?)
            }
            _ => {
                let expr_start = self.current_span();
                let expr_line = self.current().line;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::Semicolon, "Expect ';' after expression.")?;
                Some(self.alloc_stmt(StmtKind::Expression(expr), expr_start, expr_line))
            }
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let cond_token = self.expect(&TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RightParen, "Expect ')' after 'for' clauses.")?;

        let mut body = self.parse_statement()?;

        if let Some(increment) = increment {
            let incr = *self.arena.get_expr(increment);
            let incr_stmt = self.alloc_stmt(StmtKind::Expression(increment), incr.span, incr.line);
            let stmts = self.arena.alloc_stmt_list([body, incr_stmt]);
            let body_stmt = *self.arena.get_stmt(body);
            body = self.alloc_stmt(StmtKind::Block(stmts), body_stmt.span, body_stmt.line);
        }

        let condition = match condition {
            Some(condition) => condition,
            None => self.alloc_true(cond_token.span, cond_token.line),
        };
        let while_stmt = self.alloc_stmt(StmtKind::While { condition, body }, start, line);

        let stmts = match initializer {
            Some(init) => self.arena.alloc_stmt_list([init, while_stmt]),
            None => self.arena.alloc_stmt_list([while_stmt]),
        };
        Ok(self.alloc_stmt(StmtKind::Block(stmts), start, line))
    }

    /// `if ( cond ) stmt ( else stmt )?`. A dangling `else` binds to the
    /// nearest `if`.
    fn parse_if(&mut self, start: Span, line: u32) -> Result<StmtId, ParseError> {
        self.expect(&TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RightParen, "Expect ')' after 'if' condition.")?;

        let then_branch = self.parse_statement()?;
        let else_branch = if self.eat(&TokenKind::Else).is_some() {
            Some(self.parse_statement()?)
        } else {
            None
        };

        Ok(self.alloc_stmt(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            start,
            line,
        ))
    }

    fn parse_while(&mut self, start: Span, line: u32) -> Result<StmtId, ParseError> {
        self.expect(&TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RightParen, "Expect ')' after 'while' condition.")?;
        let body = self.parse_statement()?;
        Ok(self.alloc_stmt(StmtKind::While { condition, body }, start, line))
    }

    /// Declarations up to the closing `}`. The `{` is already consumed.
    fn parse_block_body(&mut self) -> Result<StmtRange, ParseError> {
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            stmts.push(self.parse_declaration()?);
        }
        self.expect(&TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(self.arena.alloc_stmt_list(stmts))
    }

    fn alloc_stmt(&mut self, kind: StmtKind, start: Span, line: u32) -> StmtId {
        let span = start.merge(self.previous_span());
        self.arena.alloc_stmt(Stmt::new(kind, span, line))
    }

    fn alloc_true(&mut self, span: Span, line: u32) -> ExprId {
        self.arena
            .alloc_expr(Expr::new(ExprKind::Bool(true), span, line))
    }
}
