use lox_parser::lexer::Token;
use thiserror::Error;

/// A fault raised while evaluating a program. Aborts the rest of the run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub message: String,
    /// The line of the token that caused the error.
    pub line: usize,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: token.line,
        }
    }
}
