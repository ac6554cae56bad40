//! Declarations and statements.

use std::rc::Rc;

use lox_diagnostic::ErrorCode;
use lox_ir::{ClassDecl, Expr, ExprKind, FunctionDecl, LiteralValue, Stmt, Token, TokenKind};
use lox_stack::ensure_sufficient_stack;

use crate::error::{PResult, ParseError};
use crate::recovery::{synchronize, STMT_START};
use crate::{Parser, MAX_ARITY};

/// What a function body belongs to, for error messages.
#[derive(Copy, Clone)]
enum FnKind {
    Function,
    Method,
}

impl FnKind {
    fn noun(self) -> &'static str {
        match self {
            FnKind::Function => "function",
            FnKind::Method => "method",
        }
    }
}

impl Parser<'_> {
    /// declaration → classDecl | funDecl | varDecl | statement
    ///
    /// On error, reports, resynchronizes and yields `None`.
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        let result = ensure_sufficient_stack(|| match self.cursor.current_kind() {
            TokenKind::Class => {
                self.cursor.advance();
                self.class_declaration()
            }
            // `fun (` starts a lambda expression statement instead
            TokenKind::Fun if self.cursor.peek_kind() == TokenKind::Identifier => {
                self.cursor.advance();
                self.function(FnKind::Function).map(Stmt::Function)
            }
            TokenKind::Var => {
                self.cursor.advance();
                self.var_declaration()
            }
            _ => self.statement(),
        });

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.report(err);
                synchronize(&mut self.cursor, STMT_START);
                None
            }
        }
    }

    fn class_declaration(&mut self) -> PResult<Stmt> {
        let name = self
            .cursor
            .expect(TokenKind::Identifier, "Expect class name.")?
            .clone();

        let superclass = if self.cursor.eat(TokenKind::Less) {
            let super_name = self
                .cursor
                .expect(TokenKind::Identifier, "Expect superclass name.")?
                .clone();
            let line = super_name.line;
            Some(Expr::new(ExprKind::Variable { name: super_name }, line))
        } else {
            None
        };

        self.cursor
            .expect(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        let mut statics = Vec::new();
        let mut getters = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            if self.cursor.eat(TokenKind::Class) {
                statics.push(self.function(FnKind::Method)?);
            } else if self.cursor.check(TokenKind::Identifier)
                && self.cursor.peek_kind() == TokenKind::LeftBrace
            {
                getters.push(self.getter()?);
            } else {
                methods.push(self.function(FnKind::Method)?);
            }
        }

        self.cursor
            .expect(TokenKind::RightBrace, "Expect '}' after class body.")?;

        tracing::trace!(
            class = %name.lexeme,
            methods = methods.len(),
            statics = statics.len(),
            getters = getters.len(),
            "parsed class"
        );
        Ok(Stmt::Class(ClassDecl {
            name,
            superclass,
            methods,
            statics,
            getters,
        }))
    }

    /// function → IDENT "(" parameters? ")" block
    fn function(&mut self, kind: FnKind) -> PResult<Rc<FunctionDecl>> {
        let noun = kind.noun();
        let name = self
            .cursor
            .expect(TokenKind::Identifier, &format!("Expect {noun} name."))?
            .clone();
        self.cursor
            .expect(TokenKind::LeftParen, &format!("Expect '(' after {noun} name."))?;
        let params = self.parameters()?;
        self.cursor
            .expect(TokenKind::LeftBrace, &format!("Expect '{{' before {noun} body."))?;
        let body = self.block()?;

        Ok(Rc::new(FunctionDecl {
            line: name.line,
            name: Some(name),
            params,
            body,
        }))
    }

    /// getter → IDENT block
    fn getter(&mut self) -> PResult<Rc<FunctionDecl>> {
        let name = self.cursor.advance().clone();
        self.cursor
            .expect(TokenKind::LeftBrace, "Expect '{' before getter body.")?;
        let body = self.block()?;
        Ok(Rc::new(FunctionDecl {
            line: name.line,
            name: Some(name),
            params: Vec::new(),
            body,
        }))
    }

    /// Parameter list after the opening parenthesis, through the closing one.
    pub(crate) fn parameters(&mut self) -> PResult<Vec<Token>> {
        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RightParen) {
            loop {
                if params.len() == MAX_ARITY {
                    self.report(ParseError::new(
                        ErrorCode::E1005,
                        self.cursor.current(),
                        "Cannot have more than 255 parameters.",
                    ));
                }
                let param = self
                    .cursor
                    .expect(TokenKind::Identifier, "Expect parameter name.")?;
                params.push(param.clone());
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor
            .expect(TokenKind::RightParen, "Expect ')' after parameters.")?;
        Ok(params)
    }

    fn var_declaration(&mut self) -> PResult<Stmt> {
        let name = self
            .cursor
            .expect(TokenKind::Identifier, "Expect variable name.")?
            .clone();
        let initializer = if self.cursor.eat(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };
        self.cursor.expect(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    /// `if` and `while` bodies come back here without passing through
    /// [`declaration`](Self::declaration), so this level guards the stack too.
    fn statement(&mut self) -> PResult<Stmt> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> PResult<Stmt> {
        match self.cursor.current_kind() {
            TokenKind::For => {
                self.cursor.advance();
                self.for_statement()
            }
            TokenKind::If => {
                self.cursor.advance();
                self.if_statement()
            }
            TokenKind::Print => {
                self.cursor.advance();
                let value = self.expression()?;
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after value.")?;
                Ok(Stmt::Print(value))
            }
            TokenKind::Return => {
                let keyword = self.cursor.advance().clone();
                let value = if self.cursor.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after return value.")?;
                Ok(Stmt::Return { keyword, value })
            }
            TokenKind::While => {
                self.cursor.advance();
                self.cursor
                    .expect(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
                let condition = self.expression()?;
                self.cursor
                    .expect(TokenKind::RightParen, "Expect ')' after condition.")?;
                let body = Box::new(self.statement()?);
                Ok(Stmt::While { condition, body })
            }
            TokenKind::Break => {
                let keyword = self.cursor.advance().clone();
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after break.")?;
                Ok(Stmt::Break { keyword })
            }
            TokenKind::LeftBrace => {
                self.cursor.advance();
                Ok(Stmt::Block(self.block()?))
            }
            _ => {
                let expr = self.expression()?;
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
                Ok(Stmt::Expression(expr))
            }
        }
    }

    /// Statements up to the closing brace; the opening one is already consumed.
    pub(crate) fn block(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RightBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.declaration() {
                stmts.push(stmt);
            }
        }
        self.cursor
            .expect(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(stmts)
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        self.cursor
            .expect(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.cursor
            .expect(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.cursor.eat(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// Desugars into `{ init; while (cond) { body; incr; } }`.
    fn for_statement(&mut self) -> PResult<Stmt> {
        let for_line = self.cursor.previous().line;
        self.cursor
            .expect(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                None
            }
            TokenKind::Var => {
                self.cursor.advance();
                Some(self.var_declaration()?)
            }
            _ => {
                let expr = self.expression()?;
                self.cursor
                    .expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
                Some(Stmt::Expression(expr))
            }
        };

        let condition = if self.cursor.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.cursor.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.cursor
            .expect(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;
        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }
        let condition = condition.unwrap_or_else(|| {
            Expr::new(ExprKind::Literal(LiteralValue::Bool(true)), for_line)
        });
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }
        Ok(body)
    }
}
