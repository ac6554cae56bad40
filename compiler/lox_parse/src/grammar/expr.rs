//! Expressions, loosest binding first.
//!
//! Every binary level rejects its operator in prefix position: the operand is
//! parsed anyway and then "Unary operator not supported." is raised. Only `-`
//! is a real prefix operator.

use std::rc::Rc;

use lox_diagnostic::ErrorCode;
use lox_ir::{Expr, ExprKind, FunctionDecl, Literal, LiteralValue, Token, TokenKind};
use lox_stack::ensure_sufficient_stack;

use crate::error::{PResult, ParseError};
use crate::{Parser, MAX_ARITY};

/// Node built for an operator level.
#[derive(Copy, Clone)]
enum Shape {
    Binary,
    Logical,
}

const ASSIGN_OPS: &[TokenKind] = &[
    TokenKind::Equal,
    TokenKind::PlusEqual,
    TokenKind::MinusEqual,
    TokenKind::StarEqual,
    TokenKind::SlashEqual,
];

impl Parser<'_> {
    /// expression → comma
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        ensure_sufficient_stack(|| self.comma())
    }

    /// comma → assignment ( "," assignment )*
    fn comma(&mut self) -> PResult<Expr> {
        self.binary_level(
            &[TokenKind::Comma],
            &[TokenKind::Comma],
            Shape::Binary,
            Self::assignment,
        )
    }

    /// assignment → ( call "." )? IDENT ( "=" | "+=" | "-=" | "*=" | "/=" ) assignment
    ///            | ternary
    fn assignment(&mut self) -> PResult<Expr> {
        if let Some(op) = self.cursor.eat_any(ASSIGN_OPS) {
            self.ternary()?;
            return Err(ParseError::missing_left_operand(op));
        }

        let mut expr = self.ternary()?;
        let Some(op) = self.cursor.eat_any(ASSIGN_OPS) else {
            return Ok(expr);
        };
        let op = op.clone();
        let value = Box::new(self.assignment()?);

        let kind = std::mem::replace(&mut expr.kind, ExprKind::Literal(LiteralValue::Nil));
        match kind {
            ExprKind::Variable { name } => {
                let line = name.line;
                Ok(Expr::new(ExprKind::Assign { name, op, value }, line))
            }
            ExprKind::Get { object, name } => {
                let line = name.line;
                Ok(Expr::new(
                    ExprKind::Set {
                        object,
                        name,
                        op,
                        value,
                    },
                    line,
                ))
            }
            kind => {
                // Reported, not thrown: the parser is not confused.
                self.report(ParseError::new(
                    ErrorCode::E1003,
                    &op,
                    "Invalid assignment target.",
                ));
                expr.kind = kind;
                Ok(expr)
            }
        }
    }

    /// ternary → logic_or ( "?" ternary ":" ternary )?
    fn ternary(&mut self) -> PResult<Expr> {
        if let Some(op) = self
            .cursor
            .eat_any(&[TokenKind::Question, TokenKind::Colon])
        {
            self.logic_or()?;
            return Err(ParseError::missing_left_operand(op));
        }

        let condition = self.logic_or()?;
        if !self.cursor.eat(TokenKind::Question) {
            return Ok(condition);
        }
        let line = self.cursor.previous().line;
        let then_branch = ensure_sufficient_stack(|| self.ternary())?;
        self.cursor.expect(
            TokenKind::Colon,
            "Expect ':' after then branch of ternary.",
        )?;
        let else_branch = ensure_sufficient_stack(|| self.ternary())?;
        Ok(Expr::new(
            ExprKind::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            line,
        ))
    }

    fn logic_or(&mut self) -> PResult<Expr> {
        self.binary_level(
            &[TokenKind::Or],
            &[TokenKind::Or],
            Shape::Logical,
            Self::logic_and,
        )
    }

    fn logic_and(&mut self) -> PResult<Expr> {
        self.binary_level(
            &[TokenKind::And],
            &[TokenKind::And],
            Shape::Logical,
            Self::equality,
        )
    }

    fn equality(&mut self) -> PResult<Expr> {
        const OPS: &[TokenKind] = &[TokenKind::BangEqual, TokenKind::EqualEqual];
        self.binary_level(OPS, OPS, Shape::Binary, Self::comparison)
    }

    fn comparison(&mut self) -> PResult<Expr> {
        const OPS: &[TokenKind] = &[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ];
        self.binary_level(OPS, OPS, Shape::Binary, Self::addition)
    }

    /// `-` is excluded from the prefix check: it is a real unary operator.
    fn addition(&mut self) -> PResult<Expr> {
        self.binary_level(
            &[TokenKind::Plus],
            &[TokenKind::Minus, TokenKind::Plus],
            Shape::Binary,
            Self::multiplication,
        )
    }

    fn multiplication(&mut self) -> PResult<Expr> {
        const OPS: &[TokenKind] = &[TokenKind::Slash, TokenKind::Star];
        self.binary_level(OPS, OPS, Shape::Binary, Self::unary)
    }

    /// One left-associative operator level.
    ///
    /// `prefix_ops` are rejected when they appear with no left operand;
    /// `ops` are the operators this level folds.
    fn binary_level(
        &mut self,
        prefix_ops: &[TokenKind],
        ops: &[TokenKind],
        shape: Shape,
        operand: fn(&mut Self) -> PResult<Expr>,
    ) -> PResult<Expr> {
        if let Some(op) = self.cursor.eat_any(prefix_ops) {
            operand(self)?;
            return Err(ParseError::missing_left_operand(op));
        }

        let mut expr = operand(self)?;
        while let Some(op) = self.cursor.eat_any(ops) {
            let right = operand(self)?;
            let left = Box::new(expr);
            let right = Box::new(right);
            let op = op.clone();
            let line = op.line;
            let kind = match shape {
                Shape::Binary => ExprKind::Binary { left, op, right },
                Shape::Logical => ExprKind::Logical { left, op, right },
            };
            expr = Expr::new(kind, line);
        }
        Ok(expr)
    }

    /// unary → ( "!" | "-" ) unary | call
    fn unary(&mut self) -> PResult<Expr> {
        if let Some(op) = self.cursor.eat_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let op = op.clone();
            let operand = ensure_sufficient_stack(|| self.unary())?;
            let line = op.line;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                line,
            ));
        }
        self.call()
    }

    /// call → primary ( "(" arguments? ")" | "." IDENT )*
    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.cursor.eat(TokenKind::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if self.cursor.eat(TokenKind::Dot) {
                let name = self
                    .cursor
                    .expect(TokenKind::Identifier, "Expect property name after '.'.")?
                    .clone();
                let line = name.line;
                expr = Expr::new(
                    ExprKind::Get {
                        object: Box::new(expr),
                        name,
                    },
                    line,
                );
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Arguments parse at assignment level so `,` separates rather than
    /// sequences.
    fn finish_call(&mut self, callee: Expr) -> PResult<Expr> {
        let mut args = Vec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                if args.len() == MAX_ARITY {
                    self.report(ParseError::new(
                        ErrorCode::E1006,
                        self.cursor.current(),
                        "Cannot have more than 255 arguments.",
                    ));
                }
                args.push(ensure_sufficient_stack(|| self.assignment())?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let paren = self
            .cursor
            .expect(TokenKind::RightParen, "Expect ')' after arguments.")?
            .clone();
        let line = paren.line;
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                paren,
                args,
            },
            line,
        ))
    }

    fn primary(&mut self) -> PResult<Expr> {
        let tok = self.cursor.current();
        let line = tok.line;
        let kind = match tok.kind {
            TokenKind::False => ExprKind::Literal(LiteralValue::Bool(false)),
            TokenKind::True => ExprKind::Literal(LiteralValue::Bool(true)),
            TokenKind::Nil => ExprKind::Literal(LiteralValue::Nil),
            TokenKind::Number | TokenKind::String => ExprKind::Literal(literal_value(tok)),
            TokenKind::Identifier => ExprKind::Variable { name: tok.clone() },
            TokenKind::This => ExprKind::This {
                keyword: tok.clone(),
            },
            TokenKind::Super => {
                let keyword = self.cursor.advance().clone();
                self.cursor
                    .expect(TokenKind::Dot, "Expect '.' after 'super'.")?;
                let method = self
                    .cursor
                    .expect(TokenKind::Identifier, "Expect superclass method name.")?
                    .clone();
                return Ok(Expr::new(ExprKind::Super { keyword, method }, line));
            }
            TokenKind::Fun => {
                self.cursor.advance();
                return self.lambda(line);
            }
            TokenKind::LeftParen => {
                self.cursor.advance();
                let inner = self.expression()?;
                self.cursor
                    .expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::new(ExprKind::Grouping(Box::new(inner)), line));
            }
            _ => {
                return Err(ParseError::new(
                    ErrorCode::E1002,
                    tok,
                    "Expect expression.",
                ))
            }
        };
        self.cursor.advance();
        Ok(Expr::new(kind, line))
    }

    /// lambda → "fun" "(" parameters? ")" block, with `fun` consumed.
    fn lambda(&mut self, line: u32) -> PResult<Expr> {
        self.cursor
            .expect(TokenKind::LeftParen, "Expect '(' after 'fun'.")?;
        let params = self.parameters()?;
        self.cursor
            .expect(TokenKind::LeftBrace, "Expect '{' before lambda body.")?;
        let body = self.block()?;
        let decl = FunctionDecl {
            name: None,
            line,
            params,
            body,
        };
        Ok(Expr::new(ExprKind::Lambda(Rc::new(decl)), line))
    }
}

fn literal_value(tok: &Token) -> LiteralValue {
    match &tok.literal {
        Some(Literal::Number(n)) => LiteralValue::Number(*n),
        Some(Literal::Str(s)) => LiteralValue::Str(Rc::from(s.as_str())),
        None => LiteralValue::Nil,
    }
}
