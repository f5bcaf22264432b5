//! Small value utilities shared by assertions and test helpers.

use crate::value::Value;

/// Whether a value can be iterated: strings (per character), sequences,
/// maps (over keys) and records (over field values).
pub fn is_iterable(value: &Value) -> bool {
    matches!(
        value,
        Value::Str(_) | Value::Seq(_) | Value::Map(_) | Value::Record(_)
    )
}

/// Convert a value into an ordered sequence of values.
///
/// Iterable values yield their elements in order; scalars yield a
/// single-element sequence containing the value itself.
pub fn to_iterable(value: Value) -> Vec<Value> {
    match value {
        Value::Seq(items) => items,
        Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
        Value::Map(entries) => entries.into_keys().map(Value::Str).collect(),
        Value::Record(record) => record
            .fields()
            .iter()
            .map(|(_, value)| value.clone())
            .collect(),
        scalar => vec![scalar],
    }
}
