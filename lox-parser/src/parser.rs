use crate::ast::{Expr, Stmt};
use crate::lexer::{Scanner, Token, TokenKind};
use log::debug;
use lox_source::{Source, SyntaxError};
use std::mem;

mod expr;
mod stmt;

/// Maximum number of arguments in a call and parameters in a function declaration.
pub const MAX_ARGS: usize = 255;

/// A syntax error that aborts the current declaration.
/// The error has already been reported to the [`Source`] when this is created.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    /// Index of the next token to consume.
    current: usize,
    /// Number of function bodies currently being parsed.
    function_depth: u32,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over already scanned `tokens`.
    /// An [`TokenKind::Eof`] is appended if `tokens` does not end with one.
    pub fn new(mut tokens: Vec<Token>, source: &'a Source<'a>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::new(TokenKind::Eof, "", line));
        }
        Self {
            tokens,
            current: 0,
            function_depth: 0,
            source,
        }
    }

    /// Scans `source` and creates a parser over the resulting tokens.
    pub fn from_source(source: &'a Source<'a>) -> Self {
        let tokens = Scanner::new(source).scan_tokens();
        Self::new(tokens, source)
    }
}

impl<'a> Parser<'a> {
    /// Parses declarations until the end of input.
    /// Declarations that fail to parse are reported and left out of the result.
    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.parse_declaration() {
                statements.push(stmt);
            }
        }
        debug!(
            "parsed {} top level statements ({} errors)",
            statements.len(),
            self.source.errors.len()
        );
        statements
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consumes and returns the current token. Stays on [`TokenKind::Eof`] once reached.
    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Predicate that tests whether the current token has the same discriminant as `kind`.
    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.peek().kind) == mem::discriminant(kind)
    }

    /// Predicate that tests whether the next token has the same discriminant and eats the next token if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    /// Eats the current token if it has the same discriminant as `kind`, otherwise raises an error with `message`.
    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(&kind) {
            Ok(self.next())
        } else {
            Err(self.error(self.peek().clone(), message))
        }
    }

    /// Reports an error at `token` and returns the [`ParseError`] to propagate.
    fn error(&self, token: Token, message: &str) -> ParseError {
        self.report(&token, message);
        ParseError {
            token,
            message: message.to_string(),
        }
    }

    /// Reports an error at `token` without aborting the current declaration.
    fn report(&self, token: &Token, message: &str) {
        let location = if token.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        self.source
            .errors
            .add_error(SyntaxError::new(message, token.line).with_location(location));
    }

    /// Discards tokens until a statement boundary.
    /// A boundary is right after a `;` or right before a keyword that starts a statement.
    fn synchronize(&mut self) {
        let mut previous = self.next();

        while !self.is_at_end() {
            if previous.kind == TokenKind::Semicolon || self.peek().kind.starts_statement() {
                return;
            }
            previous = self.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::AstPrinter;

    fn parse(source: &str) -> (Vec<Stmt>, Vec<SyntaxError>) {
        let source = source.into();
        let program = Parser::from_source(&source).parse_program();
        (program, source.errors.errors())
    }

    fn messages(source: &str) -> Vec<String> {
        parse(source)
            .1
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_empty_program() {
        let (program, errors) = parse("");
        assert!(program.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_appends_missing_eof() {
        let source = "".into();
        let tokens = vec![
            Token::new(TokenKind::Print, "print", 1),
            Token::new(TokenKind::Number(1.0), "1", 1),
            Token::new(TokenKind::Semicolon, ";", 1),
        ];
        let program = Parser::new(tokens, &source).parse_program();
        assert!(source.has_no_errors());
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_multiple_errors_are_reported() {
        let (program, errors) = parse("var = 1;\nprint 2;\nprint (3;");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '=': Expect variable name."
        );
        assert_eq!(
            errors[1].to_string(),
            "[line 3] Error at ';': Expect ')' after expression."
        );
        assert_eq!(errors[0].location(), " at '='");
        assert_eq!(errors[1].message(), "Expect ')' after expression.");
        // the valid statement in between still parses
        assert_eq!(program.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(print 2)");
    }

    #[test]
    fn test_error_at_end() {
        assert_eq!(
            messages("print 1"),
            vec!["[line 1] Error at end: Expect ';' after value."]
        );
        let (_, errors) = parse("print 1");
        assert_eq!(errors[0].location(), " at end");
    }

    #[test]
    fn test_synchronize_stops_before_statement_keyword() {
        // parsing resumes at the second `print` even though no `;` was seen
        let (program, errors) = parse("print 1 + ) 2 print 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at ')': Expect expression."
        );
        assert_eq!(program.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(print 3)");
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let (program, errors) = parse("1 + ; print 2;");
        assert_eq!(errors.len(), 1);
        assert_eq!(program.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(print 2)");
    }

    #[test]
    fn test_error_inside_block_recovers_in_block() {
        let (program, errors) = parse("{ var x = ; print x; }");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            AstPrinter::print_stmt(&program[0]),
            "(block (print x))"
        );
    }

    #[test]
    fn test_missing_closing_brace() {
        assert_eq!(
            messages("{ print 1;"),
            vec!["[line 1] Error at end: Expect '}' after block."]
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let (program, errors) = parse("a + b = c;");
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '=': Invalid assignment target."
        );
        // the left hand side is still returned
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(; (+ a b))");
    }

    #[test]
    fn test_too_many_arguments() {
        let args = vec!["1"; 256].join(", ");
        let source = format!("f({});", args);
        let (program, errors) = parse(&source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Can't have more than 255 arguments.");
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_too_many_parameters() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));
        let (_, errors) = parse(&source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Can't have more than 255 parameters.");
    }

    #[test]
    fn test_return_at_top_level() {
        assert_eq!(
            messages("return 1;"),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
        assert!(messages("fun f() { return 1; }").is_empty());
    }

    #[test]
    fn test_declaration_not_allowed_as_branch() {
        assert_eq!(
            messages("if (true) var x = 1;"),
            vec!["[line 1] Error at 'var': Expect expression."]
        );
    }
}
