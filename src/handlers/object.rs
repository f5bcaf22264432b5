//! Generic object predicates, valid for any subject.

use crate::errors::ConfigError;
use crate::value::{Kind, Value};

/// Handler for checks that apply to every value shape.
pub(crate) struct ObjectHandler<'a> {
    actual: &'a Value,
}

impl<'a> ObjectHandler<'a> {
    pub fn new(actual: &'a Value) -> Self {
        Self { actual }
    }

    /// Identity against the boolean `true`, not boolean-context coercion.
    pub fn is_true(&self) -> Result<(), String> {
        match self.actual {
            Value::Bool(true) => Ok(()),
            _ => Err(format!("{} was not true", self.actual)),
        }
    }

    /// Identity against the boolean `false`.
    pub fn is_false(&self) -> Result<(), String> {
        match self.actual {
            Value::Bool(false) => Ok(()),
            _ => Err(format!("{} was not false", self.actual)),
        }
    }

    pub fn is_truthy(&self) -> Result<(), String> {
        if self.actual.is_truthy() {
            Ok(())
        } else {
            Err(format!("{} was not truthy", self.actual))
        }
    }

    pub fn is_falsy(&self) -> Result<(), String> {
        if !self.actual.is_truthy() {
            Ok(())
        } else {
            Err(format!("{} was not falsy", self.actual))
        }
    }

    pub fn is_equal_to(&self, other: &Value) -> Result<(), String> {
        if self.actual == other {
            Ok(())
        } else {
            Err(format!("{} was not equal to: {}", self.actual, other))
        }
    }

    pub fn is_not_equal_to(&self, other: &Value) -> Result<(), String> {
        if self.actual != other {
            Ok(())
        } else {
            Err(format!("{} was equal to: {}", self.actual, other))
        }
    }

    pub fn has_length(&self, expected: usize) -> Result<(), String> {
        match self.actual.len() {
            Some(n) if n == expected => Ok(()),
            Some(_) => Err(format!(
                "length of {} was not equal to: {}",
                self.actual, expected
            )),
            // Unsized subjects are a usage error, not a failed assertion.
            None => ConfigError::UnsupportedType {
                handler: "ObjectHandler",
                method: "has_length".to_string(),
                kind: self.actual.kind(),
            }
            .raise(),
        }
    }

    pub fn is_instance(&self, kind: Kind) -> Result<(), String> {
        if kind.matches(self.actual) {
            Ok(())
        } else {
            Err(format!(
                "{} was not an instance of: {} (was {})",
                self.actual,
                kind,
                self.actual.kind()
            ))
        }
    }

    pub fn is_instance_any(&self, kinds: &[Kind]) -> Result<(), String> {
        if kinds.iter().any(|kind| kind.matches(self.actual)) {
            Ok(())
        } else {
            let names: Vec<&str> = kinds.iter().map(Kind::as_str).collect();
            Err(format!(
                "{} was not an instance of any of: [{}] (was {})",
                self.actual,
                names.join(", "),
                self.actual.kind()
            ))
        }
    }

    /// Identity against the null singleton.
    pub fn is_none(&self) -> Result<(), String> {
        match self.actual {
            Value::Null => Ok(()),
            _ => Err(format!("{} was not null", self.actual)),
        }
    }

    pub fn is_not_none(&self) -> Result<(), String> {
        match self.actual {
            Value::Null => Err("the value was null".to_string()),
            _ => Ok(()),
        }
    }
}
