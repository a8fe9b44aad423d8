//! rcalc - an arithmetic expression calculator
//!
//! Expressions are compiled in a single pass into a postfix program, which a
//! small stack machine then evaluates to an `f64`.
//!
//! # Features
//! - Numbers (`12`, `3.25`), `+ - * / ^`, unary signs and parentheses
//! - Right-associative exponentiation: `2^3^2` is `2^(3^2)`
//! - Named constants (`pi`, `e`) and unary functions (`sqrt`, `sin`, ...)
//! - IEEE-754 semantics throughout: `1/0` is `Infinity`, not an error
//!
//! # Example
//! ```
//! use rcalc::{evaluate, Calculator};
//!
//! assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
//! assert!(evaluate("2+").is_err());
//!
//! let calc = Calculator::new();
//! let run = calc.run("-sqrt(16)");
//! assert_eq!(run.outcome.to_string(), "-4");
//! assert_eq!(run.postfix(), "16 sqrt !");
//! ```

// Core modules
pub mod context;

// Virtual machine
pub mod vm;

// Parser and compiler
pub mod parser;

// Built-in constants and functions
pub mod builtins;

// Utilities
pub mod util;

// Re-export main types
pub use context::{Calculator, EvalError, Evaluation, Outcome, ERROR_TEXT};
pub use parser::{CompileError, LexError, Program};
pub use vm::InterpreterError;

/// Evaluate an expression with a default calculator
///
/// Every failure surfaces as an [`EvalError`]; render through [`Outcome`]
/// to get the `error` sentinel text.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    Calculator::new().eval(expression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("sqrt(9)"), Ok(3.0));
        assert_eq!(evaluate("1/0"), Ok(f64::INFINITY));
    }

    #[test]
    fn test_evaluate_errors() {
        for source in ["", "1.", "foo", "sqrt", "2+2 foo", "(2+3", "2+3)"] {
            let outcome = Outcome::from(evaluate(source));
            assert_eq!(outcome.to_string(), ERROR_TEXT, "{:?}", source);
        }
    }
}
