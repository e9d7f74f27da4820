use super::*;
use crate::ast::Literal;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_assignment_expr()
    }

    /// Parses an assignment expression or any expression with a higher precedence.
    /// Assignment is right associative and the target must be a plain variable.
    fn parse_assignment_expr(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr_bp(0)?;

        if self.check(&TokenKind::Equal) {
            let equals = self.next();
            let value = self.parse_assignment_expr()?;

            return match expr {
                Expr::Variable(name) => Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                }),
                expr => {
                    // not fatal, the parser is not confused
                    self.report(&equals, "Invalid assignment target.");
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    /// Parses an expression with the specified `min_bp`.
    /// All binary levels are left associative.
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.peek().kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.peek() is a valid binop
            let op = self.next();
            let rhs = Box::new(self.parse_expr_bp(r_bp)?);
            let lhs_box = Box::new(lhs);

            lhs = match op.kind {
                TokenKind::And | TokenKind::Or => Expr::Logical {
                    lhs: lhs_box,
                    op,
                    rhs,
                },
                _ => Expr::Binary {
                    lhs: lhs_box,
                    op,
                    rhs,
                },
            };
        }

        Ok(lhs)
    }

    /// Parses a prefix `!` or `-` expression. Prefix operators are right associative.
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Bang) || self.check(&TokenKind::Minus) {
            let op = self.next();
            let arg = self.parse_unary_expr()?;
            return Ok(Expr::Unary {
                op,
                arg: Box::new(arg),
            });
        }

        self.parse_call_expr()
    }

    /// Parses a primary expression followed by any number of call suffixes.
    fn parse_call_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary_expr()?;

        while self.eat(TokenKind::LeftParen) {
            let mut args = Vec::new();

            if !self.check(&TokenKind::RightParen) {
                loop {
                    if args.len() >= MAX_ARGS {
                        let token = self.peek().clone();
                        self.report(&token, "Can't have more than 255 arguments.");
                    }
                    args.push(self.parse_expr()?);

                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }

            let paren = self.expect(TokenKind::RightParen, "Expect ')' after arguments.")?;
            expr = Expr::Call {
                callee: Box::new(expr),
                paren,
                args,
            };
        }

        Ok(expr)
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let literal = match &self.peek().kind {
            TokenKind::False => Some(Literal::Bool(false)),
            TokenKind::True => Some(Literal::Bool(true)),
            TokenKind::Nil => Some(Literal::Nil),
            TokenKind::Number(val) => Some(Literal::Number(*val)),
            TokenKind::String(val) => Some(Literal::Str(val.clone())),
            _ => None,
        };
        if let Some(literal) = literal {
            self.next(); // eat parsed token
            return Ok(Expr::Literal(literal));
        }

        if self.check(&TokenKind::Identifier) {
            return Ok(Expr::Variable(self.next()));
        }

        if self.eat(TokenKind::LeftParen) {
            let expr = self.parse_expr()?;
            self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(self.error(self.peek().clone(), "Expect expression."))
    }
}
