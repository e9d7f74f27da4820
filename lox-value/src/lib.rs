//! Runtime values of the Lox language.

pub mod callable;
pub mod environment;
pub mod error;

use callable::{Callable, NativeFn};
use lox_parser::ast::{format_number, Literal};
use std::fmt;
use std::rc::Rc;

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Callable(Rc<Callable>),
}

impl Value {
    /// `nil` and `false` are falsy. Every other value, including `0` and `""`, is truthy.
    ///
    /// # Example
    /// ```
    /// use lox_value::Value;
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Attempts to cast the `Value` into a `&str` or `None` if wrong type.
    pub fn cast_to_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Value::Str(string.into())
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(val) => Value::Bool(*val),
            Literal::Number(val) => Value::Number(*val),
            Literal::Str(val) => Value::Str(val.as_str().into()),
        }
    }
}

/// Numbers and strings compare by value, callables by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Str(l), Value::Str(r)) => l == r,
            (Value::Callable(l), Value::Callable(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Number(val) => f.write_str(&format_number(*val)),
            Value::Str(val) => f.write_str(val),
            Value::Callable(callable) => write!(f, "{}", callable),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Native functions that are defined in the global scope before any user code runs.
#[derive(Default)]
pub struct BuiltinVars {
    pub values: Vec<(String, Value)>,
}

impl BuiltinVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_native_fn(
        &mut self,
        ident: &str,
        func: &'static dyn Fn(&mut [Value]) -> Value,
        arity: usize,
    ) {
        let native = NativeFn {
            ident: ident.to_string(),
            arity,
            func,
        };
        self.values.push((
            ident.to_string(),
            Value::Callable(Rc::new(Callable::Native(native))),
        ));
    }
}
