use super::*;
use crate::ast::{FunctionDecl, Literal};
use log::trace;
use std::rc::Rc;

impl<'a> Parser<'a> {
    /// Parses a declaration (or statement).
    /// Returns `None` if the declaration had a syntax error. The error is reported and the parser is synchronized.
    pub fn parse_declaration(&mut self) -> Option<Stmt> {
        let result = if self.eat(TokenKind::Fun) {
            self.parse_fn_declaration()
        } else if self.eat(TokenKind::Var) {
            self.parse_var_declaration()
        } else {
            self.parse_stmt()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                trace!(
                    "skipping declaration after error at line {}: {}",
                    err.token.line,
                    err.message
                );
                self.synchronize();
                None
            }
        }
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        if self.eat(TokenKind::For) {
            self.parse_for_stmt()
        } else if self.eat(TokenKind::If) {
            self.parse_if_stmt()
        } else if self.eat(TokenKind::Print) {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "Expect ';' after value.")?;
            Ok(Stmt::PrintStmt(expr))
        } else if self.check(&TokenKind::Return) {
            self.parse_return_stmt()
        } else if self.eat(TokenKind::While) {
            self.parse_while_stmt()
        } else if self.eat(TokenKind::LeftBrace) {
            Ok(Stmt::Block(self.parse_block_stmt()?))
        } else {
            // expression statement
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
            Ok(Stmt::ExprStmt(expr))
        }
    }

    /// Parses the body of a block. The opening `{` must already be eaten.
    fn parse_block_stmt(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();

        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration() {
                body.push(stmt);
            }
        }

        self.expect(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(body)
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        let ident = self.expect(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = if self.eat(TokenKind::Equal) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::VarDeclaration { ident, initializer })
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        let ident = self.expect(TokenKind::Identifier, "Expect function name.")?;
        self.expect(TokenKind::LeftParen, "Expect '(' after function name.")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    let token = self.peek().clone();
                    self.report(&token, "Can't have more than 255 parameters.");
                }
                params.push(self.expect(TokenKind::Identifier, "Expect parameter name.")?);

                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.expect(TokenKind::LeftBrace, "Expect '{' before function body.")?;

        self.function_depth += 1;
        let body = self.parse_block_stmt();
        self.function_depth -= 1;

        Ok(Stmt::FnDeclaration(Rc::new(FunctionDecl {
            ident,
            params,
            body: body?,
        })))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_stmt()?);
        // dangling else binds to the nearest if
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::WhileStmt { condition, body })
    }

    /// Parses a `for` loop and desugars it into a `while` loop.
    /// `for (init; cond; incr) body` becomes `{ init; while (cond) { body; incr; } }`.
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.eat(TokenKind::Semicolon) {
            None
        } else if self.eat(TokenKind::Var) {
            Some(self.parse_var_declaration()?)
        } else {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
            Some(Stmt::ExprStmt(expr))
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_stmt()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::ExprStmt(increment)]);
        }

        body = Stmt::WhileStmt {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        let keyword = self.next();
        if self.function_depth == 0 {
            self.report(&keyword, "Can't return from top-level code.");
        }

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "Expect ';' after return value.")?;

        Ok(Stmt::ReturnStmt { keyword, value })
    }
}
