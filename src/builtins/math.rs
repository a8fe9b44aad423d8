//! Named constants and unary math functions
//!
//! Both tables are immutable statics, so lookups need no synchronization.

use std::f64::consts;

/// Signature of a built-in function
pub type MathFn = fn(f64) -> f64;

/// Named constants
pub static CONSTANTS: &[(&str, f64)] = &[("pi", consts::PI), ("e", consts::E)];

/// Single-argument functions
pub static FUNCTIONS: &[(&str, MathFn)] = &[
    ("sqrt", f64::sqrt),
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
];

/// Look up a constant by name (case-sensitive)
pub fn constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, value)| value)
}

/// Look up a function by name (case-sensitive)
pub fn function(name: &str) -> Option<MathFn> {
    FUNCTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, f)| f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(constant("pi"), Some(consts::PI));
        assert_eq!(constant("e"), Some(consts::E));
        assert_eq!(constant("PI"), None);
        assert_eq!(constant("sqrt"), None);
    }

    #[test]
    fn test_functions() {
        let sqrt = function("sqrt").unwrap();
        assert_eq!(sqrt(9.0), 3.0);

        let atan = function("atan").unwrap();
        assert!((atan(1.0) - consts::FRAC_PI_4).abs() < 1e-12);

        assert!(function("log").is_none());
        assert!(function("pi").is_none());
    }

    #[test]
    fn test_every_function_resolves() {
        for (name, _) in FUNCTIONS {
            assert!(function(name).is_some(), "{}", name);
        }
    }
}
