use crate::ast::Literal;
use log::trace;
use logos::{Lexer, Logos};
use lox_source::{Source, SyntaxError};
use std::fmt;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum TokenKind {
    // punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equal,
    // - equality
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    // - ordering
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // unary operators
    #[token("!")]
    Bang,

    // literals
    #[regex("[0-9]+", number)]
    Number(f64),
    #[regex(r#""[^"]*""#, |lex| { let slice = lex.slice(); slice[1..slice.len() - 1].to_string() })]
    String(String),
    /// A string literal that runs into the end of the source.
    /// Never reaches the parser; the [`Scanner`] reports it instead.
    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // keywords
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    // misc
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated by the [`Scanner`] after the lexer is exhausted.
    Eof,
}

/// Consumes an optional fractional part. The `.` is only part of the number if a digit follows it.
fn number(lex: &mut Lexer<TokenKind>) -> Option<f64> {
    let remainder = lex.remainder().as_bytes();
    if remainder.len() >= 2 && remainder[0] == b'.' && remainder[1].is_ascii_digit() {
        let fraction_len = 1 + remainder[1..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        lex.bump(fraction_len);
    }
    lex.slice().parse().ok()
}

impl TokenKind {
    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Assignment is parsed separately as it is right associative and validates its target.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Logical */
            TokenKind::Or => Some((2, 3)),
            TokenKind::And => Some((4, 5)),
            /* Equality */
            TokenKind::EqualEqual | TokenKind::BangEqual => Some((6, 7)),
            /* Comparison */
            TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::Less
            | TokenKind::LessEqual => Some((8, 9)),
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some((10, 11)),
            /* Multiplicative */
            TokenKind::Star | TokenKind::Slash => Some((12, 13)),
            _ => None,
        }
    }

    /// Returns `true` if the token starts a declaration or statement.
    /// Used as a synchronization point after a syntax error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Bang => "BANG",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::String(_) => "STRING",
            TokenKind::UnterminatedString => "UNTERMINATED_STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Error => "ERROR",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A scanned token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token.
    pub lexeme: String,
    /// The line of the token (1-based). Multi-line strings are on the line they end on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }

    /// Returns the literal value carried by `NUMBER` and `STRING` tokens.
    pub fn literal(&self) -> Option<Literal> {
        match &self.kind {
            TokenKind::Number(val) => Some(Literal::Number(*val)),
            TokenKind::String(val) => Some(Literal::Str(val.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)?;
        if let Some(literal) = self.literal() {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}

/// Converts source text into a sequence of [`Token`]s.
/// Errors are reported to the [`Source`] and never stop the scan.
pub struct Scanner<'a> {
    source: &'a Source<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self { source }
    }

    /// Scans the whole source. The result always ends with exactly one [`TokenKind::Eof`].
    pub fn scan_tokens(&self) -> Vec<Token> {
        let content = self.source.content;
        let mut lexer = TokenKind::lexer(content);
        let mut tokens = Vec::new();

        let mut line = 1;
        // Newlines before this byte offset have already been counted.
        let mut counted = 0;

        while let Some(kind) = lexer.next() {
            let span = lexer.span();
            line += count_newlines(&content.as_bytes()[counted..span.start]);
            counted = span.start;

            // string tokens take the line they end on
            if matches!(kind, TokenKind::String(_) | TokenKind::UnterminatedString) {
                line += count_newlines(lexer.slice().as_bytes());
                counted = span.end;
            }

            match kind {
                TokenKind::Error => self
                    .source
                    .errors
                    .add_error(SyntaxError::new("Unexpected character.", line)),
                TokenKind::UnterminatedString => self
                    .source
                    .errors
                    .add_error(SyntaxError::new("Unterminated string.", line)),
                kind => tokens.push(Token::new(kind, lexer.slice(), line)),
            }
        }

        line += count_newlines(&content.as_bytes()[counted..]);
        tokens.push(Token::new(TokenKind::Eof, "", line));

        trace!("scanned {} tokens over {} lines", tokens.len(), line);
        tokens
    }
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&byte| byte == b'\n').count()
}
