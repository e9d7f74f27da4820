//! Tree-walking interpreter for the Lox language.

pub mod interpreter;
pub mod output;
