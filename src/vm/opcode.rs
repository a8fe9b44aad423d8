//! Postfix instruction definitions
//!
//! The program is stack-based. Every instruction either pushes one value
//! or pops its operands and pushes one result:
//!
//! | instruction | pops | pushes |
//! |-------------|------|--------|
//! | `Number`    | 0    | 1      |
//! | `Constant`  | 0    | 1      |
//! | `Negate`    | 1    | 1      |
//! | `Call`      | 1    | 1      |
//! | `Binary`    | 2    | 1      |

use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Map an operator character to its binary operator
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    /// Source symbol of the operator
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    /// Apply the operator; `lhs` was pushed before `rhs`
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            // IEEE-754: x/0 is ±Infinity or NaN
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

/// A single postfix instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a literal, kept as source text until evaluation
    Number(String),
    /// Pop two operands, push the result
    Binary(BinaryOp),
    /// Pop one operand, push its negation
    Negate,
    /// Push the value of a named constant
    Constant(String),
    /// Pop one operand, push the named function applied to it
    Call(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Number(text) => f.write_str(text),
            Instruction::Binary(op) => write!(f, "{}", op.symbol()),
            Instruction::Negate => f.write_str("!"),
            Instruction::Constant(name) => write!(f, "@{}", name),
            Instruction::Call(name) => f.write_str(name),
        }
    }
}
