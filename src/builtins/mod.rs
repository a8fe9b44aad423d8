//! Built-in constants and functions available to expressions

pub mod math;

pub use math::{constant, function, MathFn};
