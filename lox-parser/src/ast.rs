use crate::lexer::Token;
use std::{fmt, rc::Rc};

/// A literal value written in source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("nil"),
            Literal::Bool(val) => write!(f, "{}", val),
            Literal::Number(val) => f.write_str(&format_number(*val)),
            Literal::Str(val) => f.write_str(val),
        }
    }
}

/// Formats a number the way Lox prints it.
/// Integral values have no decimal point, other values keep at most five fractional digits.
///
/// # Example
/// ```
/// use lox_parser::ast::format_number;
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(1.5), "1.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.33333");
/// ```
pub fn format_number(val: f64) -> String {
    if val.is_nan() {
        "NaN".to_string()
    } else if val.is_infinite() {
        if val > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if val.fract() == 0.0 {
        format!("{:.0}", val)
    } else {
        let formatted = format!("{:.5}", val);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A parenthesized expression (e.g. `(1 + 2)`).
    Grouping(Box<Expr>),
    /// A unary expression (e.g. `-x` or `!x`).
    Unary { op: Token, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A short-circuiting `and` / `or` expression.
    Logical {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A variable reference (e.g. `foo`).
    Variable(Token),
    Assign { name: Token, value: Box<Expr> },
    Call {
        callee: Box<Expr>,
        /// The closing paren. Used for reporting runtime errors.
        paren: Token,
        args: Vec<Expr>,
    },
}

/// A function declaration. Shared between the AST and every closure created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub ident: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    ExprStmt(Expr),
    PrintStmt(Expr),
    VarDeclaration {
        ident: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    IfStmt {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    WhileStmt {
        condition: Expr,
        body: Box<Stmt>,
    },
    FnDeclaration(Rc<FunctionDecl>),
    ReturnStmt {
        keyword: Token,
        value: Option<Expr>,
    },
}
