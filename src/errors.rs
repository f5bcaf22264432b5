//! Error taxonomy.
//!
//! Only predicate failures participate in soft collection. Everything in
//! `ConfigError` is a programmer error in test code and surfaces immediately
//! in every mode.

use crate::value::Kind;

/// A configuration or usage error: a mistake in the test code itself, never
/// a test outcome.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown assertion method: {0}")]
    UnknownMethod(String),

    #[error("{method} does not have a dedicated handler")]
    NoHandler { method: String },

    #[error("{handler} cannot perform `{method}` against {kind} values")]
    UnsupportedType {
        handler: &'static str,
        method: String,
        kind: Kind,
    },

    #[error("length must be a non-negative integer, got {0}")]
    InvalidLength(i64),

    #[error("dynamic assertion takes 1 argument but {given} were given")]
    DynamicArity { given: usize },

    #[error("{name} expects arguments, this is not supported")]
    CallableWithArgs { name: String },

    #[error("cannot bind predicate: {0}")]
    InvalidBinding(String),

    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("`{method}` expected {expected}, got {kind}")]
    ExpectedType {
        method: String,
        expected: &'static str,
        kind: Kind,
    },

    #[error("`{method}` takes {expected} argument(s) but {given} were given")]
    BadArity {
        method: String,
        expected: usize,
        given: usize,
    },

    #[error("soft context is not reentrant")]
    NestedSoftContext,
}

impl ConfigError {
    /// Configuration errors are never soft-collected; they abort the test
    /// immediately regardless of mode.
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}

/// The aggregate error raised when a soft scope exits with collected
/// failures. Messages are in invocation order.
#[derive(Debug, thiserror::Error)]
#[error("{} soft assertion failure(s)\n{}", .failures.len(), render(.failures))]
pub struct SoftFailure {
    pub failures: Vec<String>,
}

fn render(failures: &[String]) -> String {
    failures
        .iter()
        .enumerate()
        .map(|(i, failure)| format!("  {}. {}", i + 1, failure))
        .collect::<Vec<_>>()
        .join("\n")
}
