//! Dynamic value model for wrapped subjects.
//!
//! Assertions operate on a closed set of value shapes rather than a generic
//! type parameter, which is what makes runtime handler routing and the
//! dynamic attribute prober possible. `From` conversions cover the common
//! Rust primitives and `serde_json::Value`, so `json!` literals can be
//! wrapped directly.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value under test.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Record(Record),
    Callable(Callable),
}

impl Value {
    /// The kind tag for this value.
    pub fn kind(&self) -> Kind {
        Kind::of(self)
    }

    /// Build a `Map` value from key/value pairs.
    pub fn map<S, V, I>(pairs: I) -> Value
    where
        S: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (S, V)>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Size of the value, for shapes that have one.
    ///
    /// Strings count characters, sequences and maps count entries, records
    /// count fields. Scalars have no size.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Str(s) => Some(s.chars().count()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Record(record) => Some(record.fields().len()),
            _ => None,
        }
    }

    /// Whether the value is empty, for shapes that have a size.
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|n| n == 0)
    }

    /// Boolean-context coercion, used by `is_truthy`/`is_falsy`.
    ///
    /// Null, false, zero and empty containers are falsy; everything else is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Seq(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Record(record) => !record.fields().is_empty(),
            Value::Callable(_) => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Ints and floats compare numerically. Converting through f64
            // loses integer precision above 2^53, so the float must round
            // trip exactly. The upper bound is exclusive: `i64::MAX as f64`
            // rounds up to 2^63, one past the last valid integer.
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                b.trunc() == *b
                    && *b >= i64::MIN as f64
                    && *b < i64::MAX as f64
                    && *b as i64 == *a
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => write!(f, "{}", record),
            Value::Callable(callable) => write!(f, "{}", callable),
        }
    }
}

/// A tuple-like record: a named shape with ordered, string-named fields.
///
/// Records take precedence over maps in the dynamic attribute prober, the
/// same way a named tuple wins over a plain mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new<N, S, V, I>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        S: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (S, V)>,
    {
        Self {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (field, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", field, value)?;
        }
        write!(f, ")")
    }
}

/// A named thunk stored inside a value.
///
/// Only zero-arity thunks can be resolved by the dynamic attribute prober;
/// a non-zero arity marks a callable that would need arguments and is
/// rejected as a configuration error when probed.
#[derive(Clone)]
pub struct Callable {
    name: String,
    arity: usize,
    thunk: Arc<dyn Fn() -> Value + Send + Sync>,
}

impl Callable {
    /// A zero-arity callable that can be invoked during probing.
    pub fn new<N, F>(name: N, thunk: F) -> Self
    where
        N: Into<String>,
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity: 0,
            thunk: Arc::new(thunk),
        }
    }

    /// A callable that declares required parameters and therefore cannot be
    /// resolved by the prober.
    pub fn with_arity<N, F>(name: N, arity: usize, thunk: F) -> Self
    where
        N: Into<String>,
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            thunk: Arc::new(thunk),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn invoke(&self) -> Value {
        (self.thunk)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<callable {}>", self.name)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        // Thunks have no structural equality; compare by identity.
        Arc::ptr_eq(&self.thunk, &other.thunk)
    }
}

/// Kind tags for values.
///
/// `Number` is a widened kind covering both `Int` and `Float`, so
/// `is_instance(Kind::Number)` accepts either, the way an indirect instance
/// check would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Number,
    Str,
    Seq,
    Map,
    Record,
    Callable,
}

impl Kind {
    /// The kind of a concrete value. Never returns the widened `Number`.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// Whether a value is an instance of this kind, widened kinds included.
    pub fn matches(&self, value: &Value) -> bool {
        let direct = Kind::of(value);
        if direct == *self {
            return true;
        }
        matches!((self, direct), (Kind::Number, Kind::Int | Kind::Float))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::Str => "str",
            Kind::Seq => "seq",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Callable => "callable",
        }
    }

    /// Parse a kind name, as used by dynamic `is_instance` dispatch.
    pub fn parse(name: &str) -> Option<Kind> {
        Kind::all().iter().copied().find(|k| k.as_str() == name)
    }

    /// All kind variants.
    pub fn all() -> &'static [Kind] {
        &[
            Kind::Null,
            Kind::Bool,
            Kind::Int,
            Kind::Float,
            Kind::Number,
            Kind::Str,
            Kind::Seq,
            Kind::Map,
            Kind::Record,
            Kind::Callable,
        ]
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(v)
    }
}

impl From<Callable> for Value {
    fn from(v: Callable) -> Self {
        Value::Callable(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
