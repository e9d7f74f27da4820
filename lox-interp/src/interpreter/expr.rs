use super::*;
use lox_parser::ast::Expr;
use lox_parser::lexer::{Token, TokenKind};

impl<O: Output> Interpreter<O> {
    /// Evaluates an expression to a [`Value`].
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { op, arg } => {
                let arg = self.evaluate(arg)?;
                match op.kind {
                    TokenKind::Minus => match arg.cast_to_number() {
                        Some(val) => Ok(Value::Number(-val)),
                        None => Err(RuntimeError::new(op, "Operand must be a number.")),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!arg.is_truthy())),
                    _ => unreachable!("invalid unary operator {}", op.kind),
                }
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                binary_op(op, lhs, rhs)
            }
            Expr::Logical { lhs, op, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let short_circuits = match op.kind {
                    TokenKind::Or => lhs.is_truthy(),
                    _ => !lhs.is_truthy(),
                };
                if short_circuits {
                    Ok(lhs)
                } else {
                    self.evaluate(rhs)
                }
            }
            Expr::Variable(name) => self.environment.borrow().get(name),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value)
            }
            Expr::Call {
                callee,
                paren,
                args,
            } => {
                let callee = self.evaluate(callee)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.evaluate(arg)?);
                }

                let callable = match callee {
                    Value::Callable(callable) => callable,
                    _ => {
                        return Err(RuntimeError::new(
                            paren,
                            "Can only call functions and classes.",
                        ))
                    }
                };
                if arg_values.len() != callable.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            arg_values.len()
                        ),
                    ));
                }

                self.call(&callable, arg_values)
            }
        }
    }
}

fn binary_op(op: &Token, lhs: Value, rhs: Value) -> EvalResult<Value> {
    /// Generate evaluation for a binary operator that only accepts numbers.
    macro_rules! gen_num_binary_op {
        ($op: tt, $result: path) => {
            match (lhs.cast_to_number(), rhs.cast_to_number()) {
                (Some(a), Some(b)) => Ok($result(a $op b)),
                _ => Err(RuntimeError::new(op, "Operands must be numbers.")),
            }
        };

        ($op: tt) => {
            gen_num_binary_op!($op, Value::Number)
        };
    }

    match op.kind {
        // equality never type checks its operands
        TokenKind::EqualEqual => Ok(Value::Bool(lhs == rhs)),
        TokenKind::BangEqual => Ok(Value::Bool(lhs != rhs)),
        TokenKind::Plus => match (&lhs, &rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut concat = String::with_capacity(a.len() + b.len());
                concat.push_str(a);
                concat.push_str(b);
                Ok(Value::Str(concat.into()))
            }
            _ => Err(RuntimeError::new(
                op,
                "Operands must be two numbers or two strings.",
            )),
        },
        TokenKind::Minus => gen_num_binary_op!(-),
        TokenKind::Star => gen_num_binary_op!(*),
        TokenKind::Slash => gen_num_binary_op!(/),
        TokenKind::Greater => gen_num_binary_op!(>, Value::Bool),
        TokenKind::GreaterEqual => gen_num_binary_op!(>=, Value::Bool),
        TokenKind::Less => gen_num_binary_op!(<, Value::Bool),
        TokenKind::LessEqual => gen_num_binary_op!(<=, Value::Bool),
        _ => unreachable!("invalid binary operator {}", op.kind),
    }
}
