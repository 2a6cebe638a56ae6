//! Expression parsing.
//!
//! Precedence, lowest to highest:
//! assignment < or < and < equality < comparison < additive
//! < multiplicative < unary < call < primary

use lox_diagnostic::ErrorCode;
use lox_ir::{BinaryOp, Expr, ExprId, ExprKind, LogicalOp, TokenKind, UnaryOp};
use lox_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use super::operators::{
    match_additive_op, match_comparison_op, match_equality_op, match_multiplicative_op,
};
use crate::{ParseError, Parser, MAX_PARAMS};

type ParseFn<'a> = fn(&mut Parser<'a>) -> Result<ExprId, ParseError>;

impl<'a> Parser<'a> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    /// `assignment = ( call "." )? IDENT "=" assignment | logic_or`
    ///
    /// The target is parsed as an ordinary expression first; only a variable
    /// or a property get may stand left of `=`.
    fn parse_assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_logic_or()?;

        let Some(equals) = self.eat(&TokenKind::Equal) else {
            return Ok(target);
        };
        let value = self.parse_assignment()?;

        let target_expr = *self.arena.get_expr(target);
        let span = target_expr.span.merge(self.arena.get_expr(value).span);
        let kind = match target_expr.kind {
            ExprKind::Variable(name) => ExprKind::Assign { name, value },
            ExprKind::Get { object, name } => ExprKind::Set {
                object,
                name,
                value,
            },
            _ => {
                return Err(self.error_at(
                    ErrorCode::E1003,
                    "Invalid assignment target.",
                    equals,
                ));
            }
        };
        Ok(self
            .arena
            .alloc_expr(Expr::new(kind, span, target_expr.line)))
    }

    fn parse_logic_or(&mut self) -> Result<ExprId, ParseError> {
        self.parse_logical_level(TokenKind::Or, LogicalOp::Or, Self::parse_logic_and)
    }

    fn parse_logic_and(&mut self) -> Result<ExprId, ParseError> {
        self.parse_logical_level(TokenKind::And, LogicalOp::And, Self::parse_equality)
    }

    fn parse_logical_level(
        &mut self,
        token: TokenKind,
        op: LogicalOp,
        next: ParseFn<'a>,
    ) -> Result<ExprId, ParseError> {
        let mut left = next(self)?;

        while let Some(op_token) = self.eat(&token) {
            let right = next(self)?;
            let span = self
                .arena
                .get_expr(left)
                .span
                .merge(self.arena.get_expr(right).span);
            left = self.arena.alloc_expr(Expr::new(
                ExprKind::Logical { op, left, right },
                span,
                op_token.line,
            ));
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(match_equality_op, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(match_comparison_op, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(match_additive_op, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(match_multiplicative_op, Self::parse_unary)
    }

    /// One left-associative binary precedence level.
    fn parse_binary_level(
        &mut self,
        match_op: fn(&TokenKind) -> Option<BinaryOp>,
        next: ParseFn<'a>,
    ) -> Result<ExprId, ParseError> {
        let mut left = next(self)?;

        while let Some(op) = match_op(&self.current().kind) {
            let op_line = self.advance().line;
            let right = next(self)?;
            let span = self
                .arena
                .get_expr(left)
                .span
                .merge(self.arena.get_expr(right).span);
            left = self.arena.alloc_expr(Expr::new(
                ExprKind::Binary { op, left, right },
                span,
                op_line,
            ));
        }

        Ok(left)
    }

    /// `unary = ( "!" | "-" ) unary | call`
    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.current().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_call(),
        };
        let op_token = self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        let span = op_token.span.merge(self.arena.get_expr(operand).span);
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::Unary { op, operand },
            span,
            op_token.line,
        )))
    }

    /// `call = primary ( "(" arguments? ")" | "." IDENT )*`
    fn parse_call(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.eat(&TokenKind::LeftParen).is_some() {
                expr = self.finish_call(expr)?;
            } else if self.eat(&TokenKind::Dot).is_some() {
                let name = self.expect_ident("Expect property name after '.'.")?;
                let span = self.arena.get_expr(expr).span.merge(name.span);
                expr = self.arena.alloc_expr(Expr::new(
                    ExprKind::Get {
                        object: expr,
                        name: name.name,
                    },
                    span,
                    name.line,
                ));
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Argument list after `(`. Too many arguments is reported but does not
    /// stop parsing.
    fn finish_call(&mut self, callee: ExprId) -> Result<ExprId, ParseError> {
        let mut args: SmallVec<[ExprId; MAX_PARAMS]> = SmallVec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                if args.len() >= MAX_PARAMS {
                    let error = self.error_at_current(
                        ErrorCode::E1005,
                        "Cannot have more than 8 arguments.",
                    );
                    self.report(error);
                }
                args.push(self.parse_expr()?);
                if self.eat(&TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        let paren = self.expect(&TokenKind::RightParen, "Expect ')' after arguments.")?;
        let args = self.arena.alloc_expr_list(args);
        let span = self.arena.get_expr(callee).span.merge(paren.span);
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::Call { callee, args },
            span,
            paren.line,
        )))
    }

    /// Literals, identifiers, `this`, and parenthesized comma groups.
    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::Nil => ExprKind::Nil,
            TokenKind::Number(bits) => ExprKind::Number(bits),
            TokenKind::String(contents) => ExprKind::String(contents),
            TokenKind::Ident(name) => ExprKind::Variable(name),
            TokenKind::This => ExprKind::This,
            TokenKind::LeftParen => return self.parse_group(),
            _ => {
                return Err(self.error_at_current(ErrorCode::E1002, "Expect expression."));
            }
        };
        self.advance();
        Ok(self
            .arena
            .alloc_expr(Expr::new(kind, token.span, token.line)))
    }

    /// `"(" expression ( "," expression )* ")"`
    fn parse_group(&mut self) -> Result<ExprId, ParseError> {
        let open = self.advance();
        let mut members: SmallVec<[ExprId; 4]> = SmallVec::new();
        members.push(self.parse_expr()?);
        while self.eat(&TokenKind::Comma).is_some() {
            members.push(self.parse_expr()?);
        }
        let close = self.expect(&TokenKind::RightParen, "Expect ')' after expression.")?;

        let members = self.arena.alloc_expr_list(members);
        Ok(self.arena.alloc_expr(Expr::new(
            ExprKind::Grouping(members),
            open.span.merge(close.span),
            open.line,
        )))
    }
}
