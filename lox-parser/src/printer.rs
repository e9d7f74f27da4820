//! Renders the AST in a fully-parenthesized prefix form. Used for debugging and in tests.

use crate::ast::{Expr, Literal, Stmt};
use crate::visitor::Visitor;

pub struct AstPrinter {
    buf: String,
    /// If `false`, groupings are printed as their inner expression.
    show_groups: bool,
}

impl AstPrinter {
    fn new(show_groups: bool) -> Self {
        Self {
            buf: String::new(),
            show_groups,
        }
    }

    /// Prints an expression, e.g. `(* (- 123) (group 45.67))`.
    pub fn print(expr: &Expr) -> String {
        let mut printer = Self::new(true);
        printer.visit_expr(expr);
        printer.buf
    }

    /// Prints an expression without `(group ...)` nodes.
    /// Two expressions that only differ by redundant parentheses print the same.
    pub fn print_ungrouped(expr: &Expr) -> String {
        let mut printer = Self::new(false);
        printer.visit_expr(expr);
        printer.buf
    }

    /// Prints a statement, e.g. `(var a (+ 1 2))`.
    pub fn print_stmt(stmt: &Stmt) -> String {
        let mut printer = Self::new(true);
        printer.visit_stmt(stmt);
        printer.buf
    }

    fn open(&mut self, name: &str) {
        self.buf.push('(');
        self.buf.push_str(name);
    }

    fn close(&mut self) {
        self.buf.push(')');
    }

    fn word(&mut self, word: &str) {
        self.buf.push(' ');
        self.buf.push_str(word);
    }

    fn expr(&mut self, expr: &Expr) {
        self.buf.push(' ');
        self.visit_expr(expr);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.buf.push(' ');
        self.visit_stmt(stmt);
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::Literal(Literal::Str(val)) => self.buf.push_str(val),
            Expr::Literal(literal) => self.buf.push_str(&literal.to_string()),
            Expr::Grouping(inner) => {
                if self.show_groups {
                    self.open("group");
                    self.expr(inner);
                    self.close();
                } else {
                    self.visit_expr(inner);
                }
            }
            Expr::Unary { op, arg } => {
                self.open(&op.lexeme);
                self.expr(arg);
                self.close();
            }
            Expr::Binary { lhs, op, rhs } | Expr::Logical { lhs, op, rhs } => {
                self.open(&op.lexeme);
                self.expr(lhs);
                self.expr(rhs);
                self.close();
            }
            Expr::Variable(name) => self.buf.push_str(&name.lexeme),
            Expr::Assign { name, value } => {
                self.open("=");
                self.word(&name.lexeme);
                self.expr(value);
                self.close();
            }
            Expr::Call { callee, args, .. } => {
                self.open("call");
                self.expr(callee);
                for arg in args {
                    self.expr(arg);
                }
                self.close();
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::ExprStmt(expr) => {
                self.open(";");
                self.expr(expr);
            }
            Stmt::PrintStmt(expr) => {
                self.open("print");
                self.expr(expr);
            }
            Stmt::VarDeclaration { ident, initializer } => {
                self.open("var");
                self.word(&ident.lexeme);
                if let Some(initializer) = initializer {
                    self.expr(initializer);
                }
            }
            Stmt::Block(body) => {
                self.open("block");
                for stmt in body {
                    self.stmt(stmt);
                }
            }
            Stmt::IfStmt {
                condition,
                then_branch,
                else_branch,
            } => {
                self.open("if");
                self.expr(condition);
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch);
                }
            }
            Stmt::WhileStmt { condition, body } => {
                self.open("while");
                self.expr(condition);
                self.stmt(body);
            }
            Stmt::FnDeclaration(decl) => {
                self.open("fun");
                self.word(&decl.ident.lexeme);
                let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
                self.word(&format!("({})", params.join(" ")));
                for stmt in &decl.body {
                    self.stmt(stmt);
                }
            }
            Stmt::ReturnStmt { value, .. } => {
                self.open("return");
                if let Some(value) = value {
                    self.expr(value);
                }
            }
        }
        self.close();
    }
}
