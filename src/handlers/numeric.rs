//! Numeric predicates.

use std::fmt;

/// A numeric subject or expected bound. Booleans are never numbers here;
/// the dispatcher rejects them before a handler is constructed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(i) => *i as f64,
            Num::Float(f) => *f,
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(i) => write!(f, "{}", i),
            Num::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Handler for numeric subjects.
pub(crate) struct NumericHandler {
    actual: Num,
}

impl NumericHandler {
    pub fn new(actual: Num) -> Self {
        Self { actual }
    }

    pub fn is_zero(&self) -> Result<(), String> {
        if self.actual.as_f64() == 0.0 {
            Ok(())
        } else {
            Err(format!("expected {} to be zero but it was not", self.actual))
        }
    }

    pub fn is_not_zero(&self) -> Result<(), String> {
        if self.actual.as_f64() != 0.0 {
            Ok(())
        } else {
            Err(format!("expected {} to not be zero but it was", self.actual))
        }
    }

    pub fn is_greater_than(&self, other: Num) -> Result<(), String> {
        if self.actual.as_f64() > other.as_f64() {
            Ok(())
        } else {
            Err(format!(
                "expected {} to be greater than {}, but it was not",
                self.actual, other
            ))
        }
    }

    pub fn is_lesser_than(&self, other: Num) -> Result<(), String> {
        if self.actual.as_f64() < other.as_f64() {
            Ok(())
        } else {
            Err(format!(
                "expected {} to be lesser than {}, but it was not",
                self.actual, other
            ))
        }
    }

    pub fn is_positive(&self) -> Result<(), String> {
        self.is_greater_than(Num::Int(0))
    }

    pub fn is_negative(&self) -> Result<(), String> {
        self.is_lesser_than(Num::Int(0))
    }

    /// Exclusive bounds: the endpoints themselves are not "between".
    pub fn is_between(&self, low: Num, high: Num) -> Result<(), String> {
        let x = self.actual.as_f64();
        if x > low.as_f64() && x < high.as_f64() {
            Ok(())
        } else {
            Err(format!(
                "expected {} to be between ({}, {})",
                self.actual, low, high
            ))
        }
    }

    /// Inclusive bounds: the endpoints satisfy "between".
    pub fn is_between_inclusive(&self, low: Num, high: Num) -> Result<(), String> {
        let x = self.actual.as_f64();
        if x >= low.as_f64() && x <= high.as_f64() {
            Ok(())
        } else {
            Err(format!(
                "expected {} to be between [{}, {}]",
                self.actual, low, high
            ))
        }
    }

    pub fn is_not_between(&self, low: Num, high: Num) -> Result<(), String> {
        match self.is_between(low, high) {
            Err(_) => Ok(()),
            Ok(()) => Err(format!(
                "expected {} to not be between ({}, {})",
                self.actual, low, high
            )),
        }
    }

    pub fn is_not_between_inclusive(&self, low: Num, high: Num) -> Result<(), String> {
        match self.is_between_inclusive(low, high) {
            Err(_) => Ok(()),
            Ok(()) => Err(format!(
                "expected {} to not be between [{}, {}]",
                self.actual, low, high
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(NumericHandler::new(Num::Int(0)).is_zero().is_ok());
        assert!(NumericHandler::new(Num::Float(0.0)).is_zero().is_ok());
        assert!(NumericHandler::new(Num::Int(1)).is_zero().is_err());
        assert!(NumericHandler::new(Num::Int(1)).is_not_zero().is_ok());
    }

    #[test]
    fn test_comparisons() {
        let five = NumericHandler::new(Num::Int(5));
        assert!(five.is_greater_than(Num::Int(4)).is_ok());
        assert!(five.is_greater_than(Num::Int(5)).is_err());
        assert!(five.is_lesser_than(Num::Int(6)).is_ok());
        assert!(five.is_lesser_than(Num::Float(5.0)).is_err());
    }

    #[test]
    fn test_sign() {
        assert!(NumericHandler::new(Num::Int(3)).is_positive().is_ok());
        assert!(NumericHandler::new(Num::Int(0)).is_positive().is_err());
        assert!(NumericHandler::new(Num::Float(-0.5)).is_negative().is_ok());
    }

    #[test]
    fn test_between_is_exclusive_by_default() {
        let five = NumericHandler::new(Num::Int(5));
        assert!(five.is_between(Num::Int(4), Num::Int(6)).is_ok());
        assert!(five.is_between(Num::Int(5), Num::Int(6)).is_err());
        assert!(five.is_between(Num::Int(4), Num::Int(5)).is_err());
    }

    #[test]
    fn test_between_inclusive_admits_endpoints() {
        let hundred = NumericHandler::new(Num::Int(100));
        assert!(hundred.is_between(Num::Int(100), Num::Int(101)).is_err());
        assert!(hundred
            .is_between_inclusive(Num::Int(100), Num::Int(101))
            .is_ok());
    }

    #[test]
    fn test_not_between_inverts() {
        let five = NumericHandler::new(Num::Int(5));
        assert!(five.is_not_between(Num::Int(4), Num::Int(6)).is_err());
        assert!(five.is_not_between(Num::Int(5), Num::Int(6)).is_ok());
        assert!(five
            .is_not_between_inclusive(Num::Int(5), Num::Int(6))
            .is_err());
    }
}
