//! Postfix interpreter
//!
//! Executes a compiled program with a single pass over an operand stack.

use log::{debug, trace};
use thiserror::Error;

use crate::builtins;
use crate::parser::compiler::Program;
use crate::vm::opcode::Instruction;
use crate::vm::stack::Stack;

/// Interpreter error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    /// An instruction needed more operands than the stack held
    #[error("stack underflow")]
    StackUnderflow,
    /// Constant reference with no table entry
    #[error("unknown constant '{0}'")]
    UnknownConstant(String),
    /// Call of a function with no table entry
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    /// Program finished with other than one value on the stack
    #[error("malformed program: {depth} values left on the stack")]
    MalformedProgram { depth: usize },
    /// Number literal text that does not parse as a float
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
}

/// Result type for interpreter operations
pub type InterpreterResult<T> = Result<T, InterpreterError>;

/// Interpreter state
///
/// Holds no state between runs; the operand stack is created per call.
#[derive(Debug, Clone)]
pub struct Interpreter {
    stack_capacity: usize,
}

impl Interpreter {
    /// Default stack capacity
    const DEFAULT_STACK_SIZE: usize = 64;

    /// Create a new interpreter
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_STACK_SIZE)
    }

    /// Create an interpreter with a custom initial stack capacity
    pub fn with_config(stack_capacity: usize) -> Self {
        Interpreter { stack_capacity }
    }

    /// Execute a program and return its single result
    pub fn execute(&self, program: &Program) -> InterpreterResult<f64> {
        let mut stack = Stack::new(self.stack_capacity);

        for instruction in program.instructions() {
            Self::step(&mut stack, instruction)?;
            trace!("{:<8} -> depth {}", instruction.to_string(), stack.len());
        }

        if stack.len() != 1 {
            debug!("program left {} values on the stack", stack.len());
            return Err(InterpreterError::MalformedProgram { depth: stack.len() });
        }
        stack.pop().ok_or(InterpreterError::StackUnderflow)
    }

    /// Execute one instruction against the stack
    fn step(stack: &mut Stack, instruction: &Instruction) -> InterpreterResult<()> {
        match instruction {
            Instruction::Number(text) => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| InterpreterError::InvalidNumber(text.clone()))?;
                stack.push(value);
            }

            Instruction::Binary(op) => {
                let (lhs, rhs) = stack.pop2().ok_or(InterpreterError::StackUnderflow)?;
                stack.push(op.apply(lhs, rhs));
            }

            Instruction::Negate => {
                let val = stack.pop().ok_or(InterpreterError::StackUnderflow)?;
                stack.push(-val);
            }

            Instruction::Constant(name) => {
                let value = builtins::constant(name)
                    .ok_or_else(|| InterpreterError::UnknownConstant(name.clone()))?;
                stack.push(value);
            }

            Instruction::Call(name) => {
                let func = builtins::function(name)
                    .ok_or_else(|| InterpreterError::UnknownFunction(name.clone()))?;
                let arg = stack.pop().ok_or(InterpreterError::StackUnderflow)?;
                stack.push(func(arg));
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::opcode::BinaryOp;

    fn num(text: &str) -> Instruction {
        Instruction::Number(text.to_string())
    }

    fn run(code: Vec<Instruction>) -> InterpreterResult<f64> {
        Interpreter::new().execute(&Program::new(code))
    }

    #[test]
    fn test_arithmetic() {
        // 10 - 3 * 2
        let result = run(vec![
            num("10"),
            num("3"),
            num("2"),
            Instruction::Binary(BinaryOp::Mul),
            Instruction::Binary(BinaryOp::Sub),
        ]);
        assert_eq!(result, Ok(4.0));
    }

    #[test]
    fn test_right_operand_is_popped_first() {
        let result = run(vec![num("2"), num("8"), Instruction::Binary(BinaryOp::Div)]);
        assert_eq!(result, Ok(0.25));

        let result = run(vec![num("2"), num("3"), Instruction::Binary(BinaryOp::Pow)]);
        assert_eq!(result, Ok(8.0));
    }

    #[test]
    fn test_pow_run_groups_right() {
        let result = run(vec![
            num("2"),
            num("3"),
            num("2"),
            Instruction::Binary(BinaryOp::Pow),
            Instruction::Binary(BinaryOp::Pow),
        ]);
        assert_eq!(result, Ok(512.0));
    }

    #[test]
    fn test_negate_and_call() {
        let result = run(vec![num("16"), Instruction::Call("sqrt".into()), Instruction::Negate]);
        assert_eq!(result, Ok(-4.0));
    }

    #[test]
    fn test_constant() {
        let result = run(vec![Instruction::Constant("pi".into())]);
        assert_eq!(result, Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let result = run(vec![num("1"), num("0"), Instruction::Binary(BinaryOp::Div)]);
        assert_eq!(result, Ok(f64::INFINITY));

        let result = run(vec![num("0"), num("0"), Instruction::Binary(BinaryOp::Div)]).unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            run(vec![Instruction::Constant("foo".into())]),
            Err(InterpreterError::UnknownConstant("foo".into()))
        );
        // the lookup fails before the operand is inspected
        assert_eq!(
            run(vec![Instruction::Call("log".into())]),
            Err(InterpreterError::UnknownFunction("log".into()))
        );
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            run(vec![num("1"), Instruction::Binary(BinaryOp::Add)]),
            Err(InterpreterError::StackUnderflow)
        );
        assert_eq!(run(vec![Instruction::Negate]), Err(InterpreterError::StackUnderflow));
        assert_eq!(
            run(vec![Instruction::Call("sin".into())]),
            Err(InterpreterError::StackUnderflow)
        );
    }

    #[test]
    fn test_malformed_program() {
        assert_eq!(run(vec![]), Err(InterpreterError::MalformedProgram { depth: 0 }));
        assert_eq!(
            run(vec![num("1"), num("2")]),
            Err(InterpreterError::MalformedProgram { depth: 2 })
        );
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(run(vec![num("1..2")]), Err(InterpreterError::InvalidNumber("1..2".into())));
    }

    #[test]
    fn test_reuse() {
        let interp = Interpreter::with_config(2);
        let program = Program::new(vec![num("1"), num("2"), Instruction::Binary(BinaryOp::Add)]);

        assert_eq!(interp.execute(&program), Ok(3.0));
        assert_eq!(interp.execute(&program), Ok(3.0));
    }
}
