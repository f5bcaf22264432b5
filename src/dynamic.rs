//! Dynamic attribute assertions: `<key>_is(expected)`.
//!
//! The prober is the fallback tier of method resolution. It classifies the
//! subject's shape, precomputes a deferred missing-attribute failure, and
//! hands back an invokable probe. Invoking the probe always marks the
//! session triggered, even when it short-circuits on the deferred failure.

use crate::errors::ConfigError;
use crate::session::Session;
use crate::value::Value;

/// How the subject's sub-values are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Tuple-like record with named fields; wins over mapping.
    Record,
    /// Keyed lookup.
    Mapping,
    /// Plain attribute holder; scalars have no attributes, so probing one
    /// always defers a missing-attribute failure.
    Attribute,
}

/// A resolved-but-not-yet-invoked dynamic assertion.
#[derive(Debug)]
pub(crate) struct DynamicProbe {
    key: String,
    shape: Shape,
    missing: Option<String>,
}

impl DynamicProbe {
    /// Classify the subject and build a probe for `key`.
    ///
    /// A missing attribute or key does not fail here: the failure is
    /// deferred into the probe so invocation still updates the session's
    /// triggered state.
    pub fn probe(actual: &Value, key: &str) -> DynamicProbe {
        let (shape, missing) = match actual {
            Value::Record(record) => {
                let missing = if record.field(key).is_none() {
                    Some(format!("{} missing attribute: {}", actual, key))
                } else {
                    None
                };
                (Shape::Record, missing)
            }
            Value::Map(entries) => {
                let missing = if !entries.contains_key(key) {
                    Some(format!("{} missing key: {}", actual, key))
                } else {
                    None
                };
                (Shape::Mapping, missing)
            }
            _ => (
                Shape::Attribute,
                Some(format!("{} missing attribute: {}", actual, key)),
            ),
        };
        DynamicProbe {
            key: key.to_string(),
            shape,
            missing,
        }
    }

    /// Run the probe with the call's arguments.
    pub fn invoke(&self, session: &mut Session, args: &[Value]) {
        session.mark_triggered();
        if let Some(missing) = &self.missing {
            // Soft mode records this and continues; hard mode raises here.
            session.error(missing.clone());
        }
        if args.len() != 1 {
            ConfigError::DynamicArity { given: args.len() }.raise();
        }
        if self.missing.is_some() {
            return;
        }
        let resolved = self.resolve(session.actual());
        if resolved != args[0] {
            session.error(format!("{} was not equal to: {}", resolved, args[0]));
        }
    }

    fn resolve(&self, actual: &Value) -> Value {
        let raw = match (self.shape, actual) {
            (Shape::Record, Value::Record(record)) => record.field(&self.key),
            (Shape::Mapping, Value::Map(entries)) => entries.get(&self.key),
            _ => None,
        };
        match raw {
            Some(Value::Callable(callable)) => {
                if callable.arity() != 0 {
                    ConfigError::CallableWithArgs {
                        name: self.key.clone(),
                    }
                    .raise();
                }
                callable.invoke()
            }
            Some(other) => other.clone(),
            // The deferred-failure path already handled absence.
            None => Value::Null,
        }
    }
}
