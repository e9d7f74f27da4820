use crate::output::Output;
use log::{debug, trace};
use lox_parser::ast::Stmt;
use lox_value::callable::Callable;
use lox_value::environment::Environment;
use lox_value::error::RuntimeError;
use lox_value::{BuiltinVars, Value};
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

mod expr;
mod stmt;

#[derive(Debug, Clone, PartialEq)]
pub enum InterpretResult {
    Ok,
    RuntimeError { message: String, line: usize },
}

impl InterpretResult {
    pub fn into_result(self) -> Result<(), RuntimeError> {
        match self {
            InterpretResult::Ok => Ok(()),
            InterpretResult::RuntimeError { message, line } => Err(RuntimeError { message, line }),
        }
    }
}

impl From<RuntimeError> for InterpretResult {
    fn from(err: RuntimeError) -> Self {
        InterpretResult::RuntimeError {
            message: err.message,
            line: err.line,
        }
    }
}

/// How a statement completed.
#[derive(Debug, Clone, PartialEq)]
pub enum Exec {
    Normal,
    /// A `return` statement is unwinding to the nearest function call.
    Return(Value),
}

pub type EvalResult<T> = Result<T, RuntimeError>;

pub struct Interpreter<O: Output> {
    /// The global frame. Persists across calls to [`Interpreter::interpret`].
    globals: Rc<RefCell<Environment>>,
    /// The frame of the innermost scope being executed.
    environment: Rc<RefCell<Environment>>,
    output: O,
}

impl<O: Output> Interpreter<O> {
    /// Creates a new interpreter with `builtin_vars` defined in the global scope.
    pub fn new(builtin_vars: &BuiltinVars, output: O) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        for (ident, value) in &builtin_vars.values {
            globals.borrow_mut().define(ident.as_str(), value.clone());
        }

        Self {
            environment: globals.clone(),
            globals,
            output,
        }
    }

    pub fn globals(&self) -> &Rc<RefCell<Environment>> {
        &self.globals
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Executes a program. Stops at the first runtime error.
    /// Side effects of the statements executed before the error are kept.
    pub fn interpret(&mut self, program: &[Stmt]) -> InterpretResult {
        debug!("interpreting {} top level statements", program.len());

        for stmt in program {
            match self.execute(stmt) {
                Ok(Exec::Normal) => {}
                Ok(Exec::Return(_)) => {
                    // rejected by the parser, only reachable with a hand built AST
                    debug!("ignoring return outside of a function");
                }
                Err(err) => {
                    debug!("runtime error at line {}: {}", err.line, err.message);
                    self.environment = self.globals.clone();
                    return err.into();
                }
            }
        }

        InterpretResult::Ok
    }

    /// Executes `body` in the frame `environment`.
    /// The previous frame is restored afterwards, whether the body completes, returns or fails.
    pub(crate) fn execute_block(
        &mut self,
        body: &[Stmt],
        environment: Environment,
    ) -> EvalResult<Exec> {
        let previous = mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)));
        let result = self.execute_stmts(body);
        self.environment = previous;
        result
    }

    fn execute_stmts(&mut self, body: &[Stmt]) -> EvalResult<Exec> {
        for stmt in body {
            if let Exec::Return(value) = self.execute(stmt)? {
                return Ok(Exec::Return(value));
            }
        }
        Ok(Exec::Normal)
    }

    /// Invokes `callable`. The argument count must already be checked against its arity.
    pub(crate) fn call(&mut self, callable: &Callable, mut args: Vec<Value>) -> EvalResult<Value> {
        match callable {
            Callable::Native(native) => {
                trace!("calling native function {}", native.ident);
                Ok((native.func)(&mut args))
            }
            Callable::Function(function) => {
                trace!("calling function {}", function.ident());
                let mut environment = Environment::with_enclosing(function.closure.clone());
                for (param, arg) in function.declaration.params.iter().zip(args) {
                    environment.define(param.lexeme.as_str(), arg);
                }

                match self.execute_block(&function.declaration.body, environment)? {
                    Exec::Return(value) => Ok(value),
                    Exec::Normal => Ok(Value::Nil),
                }
            }
        }
    }
}
