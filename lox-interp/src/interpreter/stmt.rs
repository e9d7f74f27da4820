use super::*;
use lox_value::callable::Function;

impl<O: Output> Interpreter<O> {
    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> EvalResult<Exec> {
        match stmt {
            Stmt::ExprStmt(expr) => {
                self.evaluate(expr)?;
            }
            Stmt::PrintStmt(expr) => {
                let value = self.evaluate(expr)?;
                self.output.print(&value.to_string());
            }
            Stmt::VarDeclaration { ident, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(ident.lexeme.as_str(), value);
            }
            Stmt::Block(body) => {
                trace!("entering block with {} statements", body.len());
                let environment = Environment::with_enclosing(self.environment.clone());
                return self.execute_block(body, environment);
            }
            Stmt::IfStmt {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                } else if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            }
            Stmt::WhileStmt { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Exec::Return(value) = self.execute(body)? {
                        return Ok(Exec::Return(value));
                    }
                }
            }
            Stmt::FnDeclaration(declaration) => {
                // The function captures the frame it is stored in. That Rc cycle is never freed.
                let function = Function::new(declaration.clone(), self.environment.clone());
                let value = Value::Callable(Rc::new(Callable::Function(function)));
                self.environment
                    .borrow_mut()
                    .define(declaration.ident.lexeme.as_str(), value);
            }
            Stmt::ReturnStmt { keyword: _, value } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                return Ok(Exec::Return(value));
            }
        }

        Ok(Exec::Normal)
    }
}
