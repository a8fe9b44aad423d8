//! Expression compiler
//!
//! Recursive descent over the precedence layers, emitting postfix
//! instructions in a single pass while tokens are consumed. No syntax
//! tree is ever built.
//!
//! ```text
//! Start   := AddSub
//! AddSub  := MulDiv (('+'|'-') MulDiv)*
//! MulDiv  := Pow (('*'|'/') Pow)*
//! Pow     := Primary ('^' Primary)*
//! Primary := NUMBER | IDENT ['(' AddSub ')'] | '-' Pow | '+' Pow | '(' AddSub ')'
//! ```
//!
//! A sign takes a whole `^` chain as its operand, so `-2^2` is `-(2^2)`.

use std::fmt;

use log::{debug, trace};
use thiserror::Error;

use super::lexer::{LexError, Lexer, Token};
use crate::vm::opcode::{BinaryOp, Instruction};

/// Maximum nesting of parentheses, calls and unary signs
///
/// Each level costs about five parser frames; 1000 levels stay well inside
/// an 8 MiB main-thread stack.
pub const MAX_NESTING: usize = 1000;

/// Compiler state
pub struct Compiler<'a> {
    lexer: Lexer<'a>,
    code: Vec<Instruction>,
    depth: usize,
}

impl<'a> Compiler<'a> {
    /// Create a new compiler for the given source
    pub fn new(source: &'a str) -> Self {
        Compiler {
            lexer: Lexer::new(source),
            code: Vec::new(),
            depth: 0,
        }
    }

    /// Compile the whole source into a postfix program
    ///
    /// Fails if the input is empty, does not match the grammar, or has
    /// tokens left over after a complete expression.
    pub fn compile(mut self) -> Result<Program, CompileError> {
        self.require_token()?;
        self.parse_add_sub()?;

        if let Some(token) = self.lexer.peek_token()? {
            return Err(CompileError::TrailingTokens(token.to_string()));
        }

        let program = Program::new(self.code);
        debug!("compiled program: {}", program);
        Ok(program)
    }

    /// Peek the next token, failing at end of input
    fn require_token(&mut self) -> Result<Token, CompileError> {
        self.lexer
            .peek_token()?
            .ok_or(CompileError::UnexpectedEndOfInput)
    }

    /// Consume a token already inspected with a peek
    fn advance(&mut self) -> Result<(), CompileError> {
        self.lexer.next_token()?;
        Ok(())
    }

    /// Consume the next token if it is the given operator
    fn eat_op(&mut self, op: char) -> Result<bool, CompileError> {
        match self.lexer.peek_token()? {
            Some(token) if token.is_op(op) => {
                self.advance()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Consume a closing parenthesis
    fn expect_close_paren(&mut self) -> Result<(), CompileError> {
        if self.eat_op(')')? {
            Ok(())
        } else {
            Err(CompileError::ExpectedClosingParen)
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!("emit {}", instruction);
        self.code.push(instruction);
    }

    /// Run a nested rule with the nesting guard held
    fn nested<F>(&mut self, rule: F) -> Result<(), CompileError>
    where
        F: FnOnce(&mut Self) -> Result<(), CompileError>,
    {
        if self.depth >= MAX_NESTING {
            return Err(CompileError::NestingTooDeep);
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// AddSub := MulDiv (('+'|'-') MulDiv)*
    fn parse_add_sub(&mut self) -> Result<(), CompileError> {
        self.require_token()?;
        self.parse_mul_div()?;
        self.parse_left_assoc(&['+', '-'], Self::parse_mul_div)
    }

    /// MulDiv := Pow (('*'|'/') Pow)*
    fn parse_mul_div(&mut self) -> Result<(), CompileError> {
        self.require_token()?;
        self.parse_pow()?;
        self.parse_left_assoc(&['*', '/'], Self::parse_pow)
    }

    /// Left-associative tail: each operator is emitted right after its
    /// right operand
    fn parse_left_assoc(
        &mut self,
        ops: &[char],
        operand: fn(&mut Self) -> Result<(), CompileError>,
    ) -> Result<(), CompileError> {
        loop {
            let op = match self.lexer.peek_token()? {
                Some(Token::Operator(c)) if ops.contains(&c) => c,
                _ => return Ok(()),
            };
            self.advance()?;
            operand(self)?;
            if let Some(op) = BinaryOp::from_char(op) {
                self.emit(Instruction::Binary(op));
            }
        }
    }

    /// Pow := Primary ('^' Primary)*
    ///
    /// Every primary is emitted as it is parsed; the `^` operators are
    /// counted and emitted together after the last one. The trailing run
    /// combines the two most recent operands first, which groups the chain
    /// from the right: `a b c ^ ^` is `a ^ (b ^ c)`.
    fn parse_pow(&mut self) -> Result<(), CompileError> {
        self.require_token()?;
        self.parse_primary()?;

        let mut operations = 0usize;
        while self.eat_op('^')? {
            self.parse_primary()?;
            operations += 1;
        }

        for _ in 0..operations {
            self.emit(Instruction::Binary(BinaryOp::Pow));
        }
        Ok(())
    }

    /// Primary := NUMBER | IDENT ['(' AddSub ')'] | '-' Pow | '+' Pow | '(' AddSub ')'
    fn parse_primary(&mut self) -> Result<(), CompileError> {
        let token = self.require_token()?;
        self.advance()?;

        match token {
            Token::Number(text) => self.emit(Instruction::Number(text)),
            Token::Ident(name) => {
                if self.eat_op('(')? {
                    self.nested(|c| {
                        c.parse_add_sub()?;
                        c.expect_close_paren()
                    })?;
                    self.emit(Instruction::Call(name));
                } else {
                    self.emit(Instruction::Constant(name));
                }
            }
            Token::Operator('-') => {
                self.nested(Self::parse_pow)?;
                self.emit(Instruction::Negate);
            }
            Token::Operator('+') => self.nested(Self::parse_pow)?,
            Token::Operator('(') => self.nested(|c| {
                c.parse_add_sub()?;
                c.expect_close_paren()
            })?,
            other => return Err(CompileError::UnexpectedToken(other.to_string())),
        }
        Ok(())
    }
}

/// Compiled postfix program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wrap an instruction sequence
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Program { instructions }
    }

    /// Instructions in execution order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Space-joined postfix listing, as shown in developer mode
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

/// Compilation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),
    #[error("expected closing parenthesis ')'")]
    ExpectedClosingParen,
    #[error("extra tokens after expression: {0}")]
    TrailingTokens(String),
    #[error("expression nested too deeply")]
    NestingTooDeep,
}
