use crate::environment::Environment;
use crate::Value;
use log::trace;
use lox_parser::ast::FunctionDecl;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A function implemented in Rust.
#[derive(Clone)]
pub struct NativeFn {
    pub ident: String,
    /// Number of arguments that the function accepts.
    pub arity: usize,
    pub func: &'static dyn Fn(&mut [Value]) -> Value,
}

/// A user function together with the environment it was declared in.
pub struct Function {
    pub declaration: Rc<FunctionDecl>,
    pub closure: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>) -> Self {
        Self {
            declaration,
            closure,
        }
    }

    pub fn ident(&self) -> &str {
        &self.declaration.ident.lexeme
    }
}

/// `Drop` is implemented for `Function` merely to ease debugging of captured environments.
impl Drop for Function {
    fn drop(&mut self) {
        trace!("collecting function object {:?}", self.ident());
    }
}

pub enum Callable {
    Native(NativeFn),
    Function(Function),
}

impl Callable {
    /// Number of arguments that the callable accepts.
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::Function(function) => function.declaration.params.len(),
        }
    }

    pub fn ident(&self) -> &str {
        match self {
            Callable::Native(native) => &native.ident,
            Callable::Function(function) => function.ident(),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(NativeFn { ident, .. }) => write!(f, "<native fn {}>", ident),
            Callable::Function(function) => write!(f, "<fn {}>", function.ident()),
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
