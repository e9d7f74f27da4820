//! Variable bindings. Frames are chained from the innermost scope to the global scope.

use crate::error::RuntimeError;
use crate::Value;
use lox_parser::lexer::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A single frame of variable bindings.
/// A frame is shared between the scope that created it and every closure that captured it.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a new global frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new frame nested inside `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Binds `name` in this frame. An existing binding with the same name in this frame is overwritten.
    ///
    /// # Example
    /// ```
    /// use lox_value::environment::Environment;
    /// use lox_value::Value;
    ///
    /// let mut env = Environment::new();
    /// env.define("a", Value::Number(1.0));
    /// env.define("a", Value::Bool(true));
    /// assert_eq!(env.get_by_name("a"), Some(Value::Bool(true)));
    /// ```
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks up `name` in this frame and then in the enclosing frames.
    pub fn get_by_name(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .enclosing
                .as_ref()
                .and_then(|enclosing| enclosing.borrow().get_by_name(name)),
        }
    }

    /// Looks up the variable named by `name`.
    /// Returns a [`RuntimeError`] if no frame in the chain binds it.
    ///
    /// # Example
    /// ```
    /// use lox_parser::lexer::{Token, TokenKind};
    /// use lox_value::environment::Environment;
    /// use lox_value::Value;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let globals = Rc::new(RefCell::new(Environment::new()));
    /// globals.borrow_mut().define("a", Value::Number(1.0));
    /// let inner = Environment::with_enclosing(globals);
    ///
    /// let a = Token::new(TokenKind::Identifier, "a", 1);
    /// assert_eq!(inner.get(&a), Ok(Value::Number(1.0)));
    ///
    /// let b = Token::new(TokenKind::Identifier, "b", 3);
    /// let err = inner.get(&b).unwrap_err();
    /// assert_eq!(err.message, "Undefined variable 'b'.");
    /// assert_eq!(err.line, 3);
    /// ```
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.get_by_name(&name.lexeme)
            .ok_or_else(|| undefined_variable(name))
    }

    /// Assigns to the innermost existing binding of `name`. Never creates a new binding.
    /// Returns the assigned value.
    ///
    /// # Example
    /// ```
    /// use lox_parser::lexer::{Token, TokenKind};
    /// use lox_value::environment::Environment;
    /// use lox_value::Value;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let globals = Rc::new(RefCell::new(Environment::new()));
    /// globals.borrow_mut().define("a", Value::Number(1.0));
    /// let mut inner = Environment::with_enclosing(globals.clone());
    ///
    /// let a = Token::new(TokenKind::Identifier, "a", 1);
    /// inner.assign(&a, Value::Number(2.0)).unwrap();
    /// assert_eq!(globals.borrow().get(&a), Ok(Value::Number(2.0)));
    ///
    /// let b = Token::new(TokenKind::Identifier, "b", 1);
    /// assert!(inner.assign(&b, Value::Nil).is_err());
    /// assert!(inner.get(&b).is_err());
    /// ```
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<Value, RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value.clone();
            return Ok(value);
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => Err(undefined_variable(name)),
        }
    }
}

fn undefined_variable(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_parser::lexer::TokenKind;

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, 1)
    }

    #[test]
    fn test_shadowing_does_not_destroy_outer_binding() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(globals.clone());
        inner.define("a", Value::Number(2.0));
        assert_eq!(inner.get(&ident("a")), Ok(Value::Number(2.0)));

        inner
            .assign(&ident("a"), Value::Number(3.0))
            .expect("assign to inner binding");
        assert_eq!(inner.get(&ident("a")), Ok(Value::Number(3.0)));

        drop(inner);
        assert_eq!(globals.borrow().get(&ident("a")), Ok(Value::Number(1.0)));
    }

    #[test]
    fn test_assign_walks_chain() {
        let globals = Rc::new(RefCell::new(Environment::new()));
        globals.borrow_mut().define("a", Value::Nil);
        let middle = Rc::new(RefCell::new(Environment::with_enclosing(globals.clone())));
        let mut inner = Environment::with_enclosing(middle.clone());

        let assigned = inner
            .assign(&ident("a"), Value::Bool(true))
            .expect("assign to global binding");
        assert_eq!(assigned, Value::Bool(true));
        assert_eq!(globals.borrow().get_by_name("a"), Some(Value::Bool(true)));
        assert_eq!(middle.borrow().get_by_name("a"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_assign_undefined() {
        let mut env = Environment::new();
        let err = env
            .assign(&ident("missing"), Value::Nil)
            .expect_err("assignment never defines");
        assert_eq!(err.message, "Undefined variable 'missing'.");
        assert_eq!(env.get_by_name("missing"), None);
    }
}
