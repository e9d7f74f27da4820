//! Runs Lox programs: scanning, parsing and interpreting.

pub mod builtin_functions;

use log::debug;
use lox_interp::interpreter::Interpreter;
use lox_interp::output::Output;
use lox_parser::parser::Parser;
use lox_source::{Source, SyntaxError};
use lox_value::error::RuntimeError;
use thiserror::Error;

/// Exit status for a program with syntax errors (`EX_DATAERR`).
pub const EXIT_SYNTAX_ERROR: i32 = 64;
/// Exit status for a program that failed at runtime (`EX_SOFTWARE`).
pub const EXIT_RUNTIME_ERROR: i32 = 70;

#[derive(Debug, Error)]
pub enum Error {
    /// The program did not parse. It was not executed.
    #[error("{}", join_lines(.0))]
    Syntax(Vec<SyntaxError>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Syntax(_) => EXIT_SYNTAX_ERROR,
            Error::Runtime(_) => EXIT_RUNTIME_ERROR,
        }
    }
}

fn join_lines(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scans, parses and executes `source` with `interpreter`.
/// Nothing is executed if there is any syntax error.
pub fn run<O: Output>(source: &str, interpreter: &mut Interpreter<O>) -> Result<(), Error> {
    let source: Source = source.into();
    let program = Parser::from_source(&source).parse_program();

    if !source.has_no_errors() {
        debug!("{} syntax errors, not executing", source.errors.len());
        return Err(Error::Syntax(source.errors.errors()));
    }

    interpreter.interpret(&program).into_result()?;
    Ok(())
}

/// Runs `source` with the default builtins and returns the printed lines.
/// For testing purposes only.
pub fn interpret(source: &str) -> Result<Vec<String>, Error> {
    let builtin_vars = builtin_functions::default_builtin_vars();
    let mut interpreter = Interpreter::new(&builtin_vars, Vec::<String>::new());
    run(source, &mut interpreter)?;
    Ok(interpreter.into_output())
}
