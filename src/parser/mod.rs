//! Expression parser and compiler
//!
//! Single-pass parser that generates postfix code directly.

pub mod compiler;
pub mod lexer;

// Re-exports
pub use compiler::{CompileError, Compiler, Program};
pub use lexer::{LexError, Lexer, Token};
