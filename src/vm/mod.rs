//! Virtual machine module
//!
//! The VM executes postfix programs using a stack-based architecture.

pub mod interpreter;
pub mod opcode;
pub mod stack;

pub use interpreter::{Interpreter, InterpreterError, InterpreterResult};
pub use opcode::{BinaryOp, Instruction};
pub use stack::Stack;
