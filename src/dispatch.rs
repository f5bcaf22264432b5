//! Method routing: predicate name -> handler kind.
//!
//! The route table is built once and shared process-wide. Each built-in
//! predicate passes its own name to the dispatcher explicitly; a name absent
//! from the table is a fatal configuration error, not an assertion failure.
//! Binding a handler to an incompatible subject is a typed, recoverable
//! outcome so the dispatcher can translate it into the "unsupported type"
//! signal deterministically.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::errors::ConfigError;
use crate::handlers::{Num, NumericHandler, ObjectHandler, RegexHandler, StringHandler};
use crate::value::Value;

/// The closed set of handler types a predicate can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandlerKind {
    Object,
    Strings,
    Numeric,
    Regex,
}

impl HandlerKind {
    pub fn name(&self) -> &'static str {
        match self {
            HandlerKind::Object => "ObjectHandler",
            HandlerKind::Strings => "StringHandler",
            HandlerKind::Numeric => "NumericHandler",
            HandlerKind::Regex => "RegexHandler",
        }
    }

    /// Bind a handler to the subject, guarding the subject's type.
    pub fn bind<'a>(&self, actual: &'a Value, method: &str) -> Result<Handler<'a>, ConfigError> {
        let mismatch = || ConfigError::UnsupportedType {
            handler: self.name(),
            method: method.to_string(),
            kind: actual.kind(),
        };
        match self {
            HandlerKind::Object => Ok(Handler::Object(ObjectHandler::new(actual))),
            HandlerKind::Strings => match actual {
                Value::Str(s) => Ok(Handler::Strings(StringHandler::new(s))),
                _ => Err(mismatch()),
            },
            HandlerKind::Numeric => match actual {
                Value::Int(i) => Ok(Handler::Numeric(NumericHandler::new(Num::Int(*i)))),
                Value::Float(x) => Ok(Handler::Numeric(NumericHandler::new(Num::Float(*x)))),
                // Bools are never numeric.
                _ => Err(mismatch()),
            },
            HandlerKind::Regex => match actual {
                Value::Str(s) => Ok(Handler::Regex(RegexHandler::new(s))),
                _ => Err(mismatch()),
            },
        }
    }
}

/// A handler bound to one subject for a single dispatch call.
pub(crate) enum Handler<'a> {
    Object(ObjectHandler<'a>),
    Strings(StringHandler<'a>),
    Numeric(NumericHandler),
    Regex(RegexHandler<'a>),
}

impl<'a> Handler<'a> {
    pub fn object(self) -> ObjectHandler<'a> {
        match self {
            Handler::Object(h) => h,
            _ => unreachable!("route table binds object methods to ObjectHandler"),
        }
    }

    pub fn strings(self) -> StringHandler<'a> {
        match self {
            Handler::Strings(h) => h,
            _ => unreachable!("route table binds string methods to StringHandler"),
        }
    }

    pub fn numeric(self) -> NumericHandler {
        match self {
            Handler::Numeric(h) => h,
            _ => unreachable!("route table binds numeric methods to NumericHandler"),
        }
    }

    pub fn regex(self) -> RegexHandler<'a> {
        match self {
            Handler::Regex(h) => h,
            _ => unreachable!("route table binds regex methods to RegexHandler"),
        }
    }
}

/// The process-wide route table, built once on first use.
pub(crate) fn routes() -> &'static HashMap<&'static str, HandlerKind> {
    static ROUTES: OnceLock<HashMap<&'static str, HandlerKind>> = OnceLock::new();
    ROUTES.get_or_init(|| {
        let mut table = HashMap::new();

        for method in ["ends_with", "starts_with", "is_alpha", "is_digit"] {
            table.insert(method, HandlerKind::Strings);
        }

        for method in [
            "is_zero",
            "is_not_zero",
            "is_greater_than",
            "is_lesser_than",
            "is_positive",
            "is_negative",
            "is_between",
            "is_between_inclusive",
            "is_not_between",
            "is_not_between_inclusive",
        ] {
            table.insert(method, HandlerKind::Numeric);
        }

        for method in ["matches", "searches", "matches_fully", "finds"] {
            table.insert(method, HandlerKind::Regex);
        }

        for method in [
            "is_true",
            "is_false",
            "is_truthy",
            "is_falsy",
            "is_equal_to",
            "is_not_equal_to",
            "has_length",
            "is_instance",
            "is_instance_any",
            "has_same_identity_as",
            "does_not_have_same_identity_as",
            "is_none",
            "is_not_none",
        ] {
            table.insert(method, HandlerKind::Object);
        }

        table
    })
}

/// Whether a name belongs to a built-in predicate.
pub(crate) fn is_route(method: &str) -> bool {
    routes().contains_key(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_cover_every_domain() {
        assert_eq!(routes().get("ends_with"), Some(&HandlerKind::Strings));
        assert_eq!(routes().get("is_between"), Some(&HandlerKind::Numeric));
        assert_eq!(routes().get("searches"), Some(&HandlerKind::Regex));
        assert_eq!(routes().get("is_equal_to"), Some(&HandlerKind::Object));
        assert!(routes().get("frobnicate").is_none());
    }

    #[test]
    fn test_string_handler_guards_type() {
        let err = HandlerKind::Strings
            .bind(&Value::Int(5), "ends_with")
            .err()
            .unwrap();
        let message = err.to_string();
        assert!(message.contains("StringHandler"));
        assert!(message.contains("ends_with"));
        assert!(message.contains("int"));
    }

    #[test]
    fn test_numeric_handler_rejects_bool() {
        assert!(HandlerKind::Numeric.bind(&Value::Int(5), "is_zero").is_ok());
        assert!(HandlerKind::Numeric
            .bind(&Value::Float(1.5), "is_zero")
            .is_ok());
        assert!(HandlerKind::Numeric
            .bind(&Value::Bool(true), "is_zero")
            .is_err());
    }

    #[test]
    fn test_object_handler_accepts_anything() {
        for value in [Value::Null, Value::Bool(true), Value::from("x")] {
            assert!(HandlerKind::Object.bind(&value, "is_equal_to").is_ok());
        }
    }
}
