//! Source code representation and error management.

use std::{cell::RefCell, fmt};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Represents a syntax error (compile time error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
    /// Source line of the offending lexeme.
    line: usize,
    /// Location context, e.g. ` at 'foo'` or ` at end`. Empty for scanner errors.
    location: String,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message` on `line`, without location context.
    pub fn new(message: impl ToString, line: usize) -> Self {
        Self {
            message: message.to_string(),
            line,
            location: String::new(),
        }
    }

    /// Attaches location context to the error.
    ///
    /// # Example
    /// ```
    /// use lox_source::SyntaxError;
    /// let error = SyntaxError::new("Expect expression.", 3).with_location(" at ')'");
    /// assert_eq!(error.to_string(), "[line 3] Error at ')': Expect expression.");
    /// ```
    pub fn with_location(mut self, location: impl ToString) -> Self {
        self.location = location.to_string();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {line}] Error{location}: {message}",
            line = self.line,
            location = self.location,
            message = self.message
        )
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: SyntaxError) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    /// Returns a copy of the accumulated errors, in the order they were reported.
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.errors.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_starts_without_errors() {
        let source: Source = "print 1;".into();
        assert!(source.has_no_errors());
        assert_eq!(source.errors.len(), 0);
    }

    #[test]
    fn test_scanner_error_has_no_location() {
        let error = SyntaxError::new("Unexpected character.", 1);
        assert_eq!(error.to_string(), "[line 1] Error: Unexpected character.");
    }

    #[test]
    fn test_reporter_keeps_order() {
        let source: Source = "".into();
        source
            .errors
            .add_error(SyntaxError::new("Expect expression.", 1).with_location(" at ';'"));
        source
            .errors
            .add_error(SyntaxError::new("Expect ';' after value.", 2).with_location(" at end"));

        assert!(!source.has_no_errors());
        let errors = source.errors.errors();
        assert_eq!(errors[0].line(), 1);
        assert_eq!(errors[1].message(), "Expect ';' after value.");
        assert_eq!(
            source.errors.to_string(),
            "[line 1] Error at ';': Expect expression.\n[line 2] Error at end: Expect ';' after value.\n"
        );
    }
}
