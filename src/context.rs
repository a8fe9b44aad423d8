//! Calculator context
//!
//! The Calculator is the main entry point: it compiles an expression into a
//! postfix program and runs it.

use std::fmt;

use log::debug;
use thiserror::Error;

use crate::parser::compiler::{CompileError, Compiler, Program};
use crate::util::format_number;
use crate::vm::{Interpreter, InterpreterError};

/// Text shown for a failed evaluation
pub const ERROR_TEXT: &str = "error";

/// Calculator context
///
/// Holds no per-expression state, so one instance can be shared across
/// threads and reused for any number of evaluations.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    interpreter: Interpreter,
}

/// Error from expression evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Lexing or parsing failed
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),
    /// Evaluation of the postfix program failed
    #[error("runtime error: {0}")]
    Runtime(#[from] InterpreterError),
}

impl EvalError {
    /// Untokenizable character or malformed number
    pub fn is_lex_error(&self) -> bool {
        matches!(self, EvalError::Compile(CompileError::Lex(_)))
    }

    /// Input does not match the grammar
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, EvalError::Compile(e) if !matches!(e, CompileError::Lex(_)))
    }

    /// Stack underflow, unknown name, or malformed program
    pub fn is_runtime_error(&self) -> bool {
        matches!(self, EvalError::Runtime(_))
    }
}

impl Calculator {
    /// Create a calculator with the default interpreter settings
    pub fn new() -> Self {
        Calculator {
            interpreter: Interpreter::new(),
        }
    }

    /// Create a calculator around a configured interpreter
    pub fn with_interpreter(interpreter: Interpreter) -> Self {
        Calculator { interpreter }
    }

    /// Evaluate an expression
    ///
    /// # Returns
    /// The numeric result, or the first error encountered
    pub fn eval(&self, source: &str) -> Result<f64, EvalError> {
        let program = self.compile(source)?;
        let result = self.execute(&program);
        match &result {
            Ok(value) => debug!("{:?} = {}", source, value),
            Err(e) => debug!("{:?} failed: {}", source, e),
        }
        result
    }

    /// Compile an expression without executing it
    ///
    /// Returns the postfix program for inspection or later execution.
    pub fn compile(&self, source: &str) -> Result<Program, CompileError> {
        Compiler::new(source).compile().map_err(|e| {
            debug!("{:?} rejected: {}", source, e);
            e
        })
    }

    /// Execute a pre-compiled program
    pub fn execute(&self, program: &Program) -> Result<f64, EvalError> {
        Ok(self.interpreter.execute(program)?)
    }

    /// Evaluate an expression, keeping the compiled program for display
    pub fn run(&self, source: &str) -> Evaluation {
        match self.compile(source) {
            Ok(program) => {
                let outcome = Outcome::from(self.execute(&program));
                Evaluation {
                    program: Some(program),
                    outcome,
                }
            }
            Err(e) => Evaluation {
                program: None,
                outcome: Outcome::Error(e.into()),
            },
        }
    }
}

/// Boundary result: a number or the error sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(f64),
    Error(EvalError),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<Result<f64, EvalError>> for Outcome {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(e) => Outcome::Error(e),
        }
    }
}

/// Renders `error` for every failure, whatever its cause
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => f.write_str(&format_number(*v)),
            Outcome::Error(_) => f.write_str(ERROR_TEXT),
        }
    }
}

/// One evaluation together with the program the interpreter consumed
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Compiled program, absent when compilation failed
    pub program: Option<Program>,
    pub outcome: Outcome,
}

impl Evaluation {
    /// Space-joined postfix listing, empty when compilation failed
    pub fn postfix(&self) -> String {
        self.program
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
