//! Operand stack for the evaluator

/// Operand stack for postfix execution
#[derive(Debug, Default)]
pub struct Stack {
    values: Vec<f64>,
}

impl Stack {
    /// Create a new stack with the given capacity
    pub fn new(capacity: usize) -> Self {
        Stack {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Push a value onto the stack
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Pop a value from the stack
    #[inline]
    pub fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }

    /// Pop the top two values as `(lhs, rhs)`, where `rhs` was on top
    ///
    /// Leaves the stack untouched if fewer than two values are present.
    #[inline]
    pub fn pop2(&mut self) -> Option<(f64, f64)> {
        if self.values.len() < 2 {
            return None;
        }
        let rhs = self.values.pop()?;
        let lhs = self.values.pop()?;
        Some((lhs, rhs))
    }

    /// Get the current stack depth
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the stack is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new(16);

        stack.push(1.0);
        stack.push(2.0);
        stack.push(3.0);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3.0));
        assert_eq!(stack.pop(), Some(2.0));
        assert_eq!(stack.pop(), Some(1.0));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_pop2_order() {
        let mut stack = Stack::new(4);

        stack.push(10.0);
        stack.push(4.0);

        assert_eq!(stack.pop2(), Some((10.0, 4.0)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop2_underflow_keeps_stack() {
        let mut stack = Stack::new(4);

        stack.push(7.0);

        assert_eq!(stack.pop2(), None);
        assert_eq!(stack.len(), 1);
    }
}
