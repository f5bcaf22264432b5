//! The assertion session: the fluent facade over a wrapped value.
//!
//! `assert_that()` is the entry point. Every predicate returns the session
//! again so chains keep flowing, which is what makes soft mode useful: a
//! failed predicate in a soft scope records its failure and the chain keeps
//! evaluating.
//!
//! # Example
//!
//! ```rust,ignore
//! use affirm::assert_that;
//!
//! assert_that("hello world").ends_with("world").starts_with("hello");
//!
//! let mut session = assert_that(5);
//! let outcome = session.softly(|s| {
//!     s.is_greater_than(4).is_lesser_than(6);
//! });
//! assert!(outcome.is_ok());
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::dispatch::{routes, Handler};
use crate::dynamic::DynamicProbe;
use crate::errors::{ConfigError, SoftFailure};
use crate::handlers::Num;
use crate::reason::Reason;
use crate::registry::{self, BoundPredicate, Registry};
use crate::value::{Kind, Value};

/// Failure routing mode.
///
/// `Hard` raises on the first failing predicate. `Soft` queues failures for
/// an aggregate raise at scope exit and is only ever entered through
/// [`Session::softly`]. `Warn` reports failures as warnings without failing
/// the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hard,
    Soft,
    Warn,
}

/// Wrap a value for assertion.
///
/// # Example
///
/// ```rust,ignore
/// use affirm::assert_that;
///
/// assert_that(25).with_category("pricing").is_equal_to(25);
/// ```
pub fn assert_that(actual: impl Into<Value>) -> Session {
    Session::new(Arc::new(actual.into()))
}

/// Wrap an already-shared value, preserving its identity for
/// [`Session::has_same_identity_as`].
pub fn assert_shared(actual: Arc<Value>) -> Session {
    Session::new(actual)
}

/// The fluent wrapper holding the value under test and assertion state.
pub struct Session {
    actual: Arc<Value>,
    reason: Reason,
    triggered: bool,
    mode: Mode,
    failures: Vec<String>,
    registry: Option<Registry>,
    warn_unused: bool,
}

/// Restores the prior mode and empties the collector when a soft scope
/// unwinds or returns.
struct SoftScope<'a> {
    session: &'a mut Session,
    prior: Mode,
}

impl Drop for SoftScope<'_> {
    fn drop(&mut self) {
        self.session.mode = self.prior;
        // On an unwind the collector was never flushed; failures may only
        // be queued while the session is in soft mode.
        self.session.failures.clear();
    }
}

impl Session {
    fn new(actual: Arc<Value>) -> Self {
        Self {
            actual,
            reason: Reason::default(),
            triggered: false,
            mode: Mode::Hard,
            failures: Vec::new(),
            registry: None,
            warn_unused: true,
        }
    }

    // =========================================================================
    // Construction-time knobs
    // =========================================================================

    /// Report failures as warnings instead of raising them.
    pub fn warn_only(mut self) -> Self {
        self.mode = Mode::Warn;
        self
    }

    /// Disable the used-but-never-asserted diagnostic for this session.
    pub fn quietly(mut self) -> Self {
        self.warn_unused = false;
        self
    }

    /// Attach a session-scoped registry, consulted instead of the
    /// process-wide default during dynamic resolution.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    // =========================================================================
    // Message shaping (last write wins, no stacking)
    // =========================================================================

    /// Prefix generated failure messages with `[category]`.
    pub fn with_category(&mut self, category: impl Into<String>) -> &mut Self {
        self.reason.category = Some(category.into());
        self
    }

    /// Replace failure messages entirely. A description supersedes both the
    /// generated message and the category.
    pub fn described_as(&mut self, description: impl Into<String>) -> &mut Self {
        self.reason.description = Some(description.into());
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The wrapped value.
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// Whether any predicate has been invoked on this session.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Failures collected so far inside the current soft scope.
    pub fn pending_failures(&self) -> &[String] {
        &self.failures
    }

    pub(crate) fn mark_triggered(&mut self) {
        self.triggered = true;
    }

    // =========================================================================
    // Failure routing
    // =========================================================================

    /// The single point of assertion failure. Registered predicates report
    /// their failing case through here as well.
    pub fn error(&mut self, reason: impl Into<String>) -> &mut Self {
        let message = self.reason.format(&reason.into());
        match self.mode {
            Mode::Soft => self.failures.push(message),
            Mode::Warn => tracing::warn!("assertion failed: {}", message),
            Mode::Hard => panic!("assertion failed: {}", message),
        }
        self
    }

    // =========================================================================
    // Soft-context protocol
    // =========================================================================

    /// Run a soft scope: failures inside the closure are queued instead of
    /// raised, and surface together when the scope exits.
    ///
    /// The collector is reset on entry. The prior mode is restored and the
    /// collector emptied on every exit path, panicking ones included.
    /// Nesting soft scopes is a configuration error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut session = assert_that(1);
    /// let outcome = session.softly(|s| {
    ///     s.is_equal_to(2).is_equal_to(3);
    /// });
    /// assert_eq!(outcome.unwrap_err().failures.len(), 2);
    /// ```
    pub fn softly<F>(&mut self, f: F) -> Result<&mut Self, SoftFailure>
    where
        F: FnOnce(&mut Session),
    {
        if self.mode == Mode::Soft {
            ConfigError::NestedSoftContext.raise();
        }
        let prior = self.mode;
        self.mode = Mode::Soft;
        self.failures.clear();
        let failures;
        {
            let mut scope = SoftScope {
                session: self,
                prior,
            };
            f(&mut *scope.session);
            failures = std::mem::take(&mut scope.session.failures);
        }
        if !self.triggered && self.warn_unused {
            warn_never_triggered(&self.actual);
        }
        if failures.is_empty() {
            Ok(self)
        } else {
            Err(SoftFailure { failures })
        }
    }

    /// Explicitly end the session, emitting the used-but-never-asserted
    /// diagnostic if no predicate ran. The check only happens here and at
    /// soft-scope exit; dropping a session never warns.
    pub fn finish(self) {
        if !self.triggered && self.warn_unused {
            warn_never_triggered(&self.actual);
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route one predicate call through the route table to its handler.
    /// Predicates pass their own name; a missing route or an incompatible
    /// subject is a configuration error, never a collectible failure.
    fn dispatch<F>(&mut self, method: &'static str, check: F) -> &mut Self
    where
        F: FnOnce(Handler<'_>) -> Result<(), String>,
    {
        self.triggered = true;
        let kind = match routes().get(method) {
            Some(kind) => kind,
            None => ConfigError::NoHandler {
                method: method.to_string(),
            }
            .raise(),
        };
        let actual = Arc::clone(&self.actual);
        let handler = match kind.bind(&actual, method) {
            Ok(handler) => handler,
            Err(err) => err.raise(),
        };
        if let Err(reason) = check(handler) {
            self.error(reason);
        }
        self
    }

    /// Invoke an assertion method by name.
    ///
    /// Resolution is two-tier: the built-in route table first, then the
    /// registry of user predicates, then the reserved `_is` dynamic
    /// attribute fallback. Anything else is an unknown-method error.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use serde_json::json;
    ///
    /// assert_that(json!({"foo": 10})).call("foo_is", &[10.into()]);
    /// ```
    pub fn call(&mut self, method: &str, args: &[Value]) -> &mut Self {
        if routes().contains_key(method) {
            return self.call_builtin(method, args);
        }
        if let Some(predicate) = self.resolve_registered(method) {
            self.triggered = true;
            (*predicate)(self, args);
            return self;
        }
        if let Some(key) = method.strip_suffix("_is") {
            let actual = Arc::clone(&self.actual);
            let probe = DynamicProbe::probe(&actual, key);
            probe.invoke(self, args);
            return self;
        }
        ConfigError::UnknownMethod(method.to_string()).raise();
    }

    fn resolve_registered(&self, name: &str) -> Option<BoundPredicate> {
        match &self.registry {
            Some(local) => local.lookup(name),
            None => registry::lookup_global(name),
        }
    }

    fn call_builtin(&mut self, method: &str, args: &[Value]) -> &mut Self {
        match method {
            // String handler
            "ends_with" => {
                let suffix = str_arg(method, one(method, args));
                self.ends_with(suffix)
            }
            "starts_with" => {
                let prefix = str_arg(method, one(method, args));
                self.starts_with(prefix)
            }
            "is_alpha" => {
                none(method, args);
                self.is_alpha()
            }
            "is_digit" => {
                none(method, args);
                self.is_digit()
            }
            // Numeric handler
            "is_zero" => {
                none(method, args);
                self.is_zero()
            }
            "is_not_zero" => {
                none(method, args);
                self.is_not_zero()
            }
            "is_positive" => {
                none(method, args);
                self.is_positive()
            }
            "is_negative" => {
                none(method, args);
                self.is_negative()
            }
            "is_greater_than" => self.is_greater_than(one(method, args).clone()),
            "is_lesser_than" => self.is_lesser_than(one(method, args).clone()),
            "is_between" => {
                let (low, high) = two(method, args);
                self.is_between(low.clone(), high.clone())
            }
            "is_between_inclusive" => {
                let (low, high) = two(method, args);
                self.is_between_inclusive(low.clone(), high.clone())
            }
            "is_not_between" => {
                let (low, high) = two(method, args);
                self.is_not_between(low.clone(), high.clone())
            }
            "is_not_between_inclusive" => {
                let (low, high) = two(method, args);
                self.is_not_between_inclusive(low.clone(), high.clone())
            }
            // Regex handler
            "matches" => {
                let pattern = str_arg(method, one(method, args));
                self.matches(&pattern)
            }
            "searches" => {
                let pattern = str_arg(method, one(method, args));
                self.searches(&pattern)
            }
            "matches_fully" => {
                let pattern = str_arg(method, one(method, args));
                self.matches_fully(&pattern)
            }
            "finds" => {
                let (pattern, count) = two(method, args);
                let pattern = str_arg(method, pattern);
                let count = length_arg(method, count);
                self.finds(&pattern, count)
            }
            // Object handler
            "is_true" => {
                none(method, args);
                self.is_true()
            }
            "is_false" => {
                none(method, args);
                self.is_false()
            }
            "is_truthy" => {
                none(method, args);
                self.is_truthy()
            }
            "is_falsy" => {
                none(method, args);
                self.is_falsy()
            }
            "is_none" => {
                none(method, args);
                self.is_none()
            }
            "is_not_none" => {
                none(method, args);
                self.is_not_none()
            }
            "is_equal_to" => self.is_equal_to(one(method, args).clone()),
            "is_not_equal_to" => self.is_not_equal_to(one(method, args).clone()),
            "has_length" => {
                let expected = int_arg(method, one(method, args));
                self.has_length(expected)
            }
            "is_instance" => {
                let kind = kind_arg(method, one(method, args));
                self.is_instance(kind)
            }
            "is_instance_any" => {
                let kinds: Vec<Kind> = args.iter().map(|arg| kind_arg(method, arg)).collect();
                self.is_instance_any(&kinds)
            }
            "has_same_identity_as" | "does_not_have_same_identity_as" => {
                ConfigError::ExpectedType {
                    method: method.to_string(),
                    expected: "a shared value; identity checks cannot be dispatched dynamically",
                    kind: args.first().map(Value::kind).unwrap_or(Kind::Null),
                }
                .raise()
            }
            _ => ConfigError::NoHandler {
                method: method.to_string(),
            }
            .raise(),
        }
    }

    // =========================================================================
    // String predicates
    // =========================================================================

    /// Asserts that the value ends with `suffix`.
    pub fn ends_with(&mut self, suffix: impl Into<String>) -> &mut Self {
        let suffix = suffix.into();
        self.dispatch("ends_with", |h| h.strings().ends_with(&suffix))
    }

    /// Asserts that the value starts with `prefix`.
    pub fn starts_with(&mut self, prefix: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        self.dispatch("starts_with", |h| h.strings().starts_with(&prefix))
    }

    /// Asserts that the value has at least one character and only letters.
    pub fn is_alpha(&mut self) -> &mut Self {
        self.dispatch("is_alpha", |h| h.strings().is_alpha())
    }

    /// Asserts that the value has at least one character and only digits.
    pub fn is_digit(&mut self) -> &mut Self {
        self.dispatch("is_digit", |h| h.strings().is_digit())
    }

    // =========================================================================
    // Numeric predicates
    // =========================================================================

    pub fn is_zero(&mut self) -> &mut Self {
        self.dispatch("is_zero", |h| h.numeric().is_zero())
    }

    pub fn is_not_zero(&mut self) -> &mut Self {
        self.dispatch("is_not_zero", |h| h.numeric().is_not_zero())
    }

    pub fn is_greater_than(&mut self, other: impl Into<Value>) -> &mut Self {
        let other = expect_num("is_greater_than", other.into());
        self.dispatch("is_greater_than", |h| h.numeric().is_greater_than(other))
    }

    pub fn is_lesser_than(&mut self, other: impl Into<Value>) -> &mut Self {
        let other = expect_num("is_lesser_than", other.into());
        self.dispatch("is_lesser_than", |h| h.numeric().is_lesser_than(other))
    }

    pub fn is_positive(&mut self) -> &mut Self {
        self.dispatch("is_positive", |h| h.numeric().is_positive())
    }

    pub fn is_negative(&mut self) -> &mut Self {
        self.dispatch("is_negative", |h| h.numeric().is_negative())
    }

    /// Asserts `low < value < high`. The endpoints are not "between".
    pub fn is_between(&mut self, low: impl Into<Value>, high: impl Into<Value>) -> &mut Self {
        let low = expect_num("is_between", low.into());
        let high = expect_num("is_between", high.into());
        self.dispatch("is_between", |h| h.numeric().is_between(low, high))
    }

    /// Asserts `low <= value <= high`.
    pub fn is_between_inclusive(
        &mut self,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        let low = expect_num("is_between_inclusive", low.into());
        let high = expect_num("is_between_inclusive", high.into());
        self.dispatch("is_between_inclusive", |h| {
            h.numeric().is_between_inclusive(low, high)
        })
    }

    pub fn is_not_between(&mut self, low: impl Into<Value>, high: impl Into<Value>) -> &mut Self {
        let low = expect_num("is_not_between", low.into());
        let high = expect_num("is_not_between", high.into());
        self.dispatch("is_not_between", |h| h.numeric().is_not_between(low, high))
    }

    pub fn is_not_between_inclusive(
        &mut self,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        let low = expect_num("is_not_between_inclusive", low.into());
        let high = expect_num("is_not_between_inclusive", high.into());
        self.dispatch("is_not_between_inclusive", |h| {
            h.numeric().is_not_between_inclusive(low, high)
        })
    }

    // =========================================================================
    // Regex predicates
    // =========================================================================

    /// Asserts that `pattern` matches at the beginning of the value.
    pub fn matches(&mut self, pattern: &str) -> &mut Self {
        let re = compile(pattern);
        self.dispatch("matches", |h| h.regex().matches(&re, pattern))
    }

    /// Asserts that `pattern` matches anywhere in the value.
    pub fn searches(&mut self, pattern: &str) -> &mut Self {
        let re = compile(pattern);
        self.dispatch("searches", |h| h.regex().searches(&re, pattern))
    }

    /// Asserts that `pattern` matches the entire value.
    pub fn matches_fully(&mut self, pattern: &str) -> &mut Self {
        let re = compile(&format!("^(?:{})$", pattern));
        self.dispatch("matches_fully", |h| h.regex().matches_fully(&re, pattern))
    }

    /// Asserts that `pattern` occurs exactly `count` times in the value.
    pub fn finds(&mut self, pattern: &str, count: usize) -> &mut Self {
        let re = compile(pattern);
        self.dispatch("finds", |h| h.regex().finds(&re, pattern, count))
    }

    // =========================================================================
    // Object predicates
    // =========================================================================

    /// Asserts the value is the boolean `true` (no coercion).
    pub fn is_true(&mut self) -> &mut Self {
        self.dispatch("is_true", |h| h.object().is_true())
    }

    /// Asserts the value is the boolean `false` (no coercion).
    pub fn is_false(&mut self) -> &mut Self {
        self.dispatch("is_false", |h| h.object().is_false())
    }

    /// Asserts the value is truthy in a boolean context.
    pub fn is_truthy(&mut self) -> &mut Self {
        self.dispatch("is_truthy", |h| h.object().is_truthy())
    }

    /// Asserts the value is falsy in a boolean context.
    pub fn is_falsy(&mut self) -> &mut Self {
        self.dispatch("is_falsy", |h| h.object().is_falsy())
    }

    /// Asserts equality against `other`.
    pub fn is_equal_to(&mut self, other: impl Into<Value>) -> &mut Self {
        let other = other.into();
        self.dispatch("is_equal_to", |h| h.object().is_equal_to(&other))
    }

    /// Asserts inequality against `other`.
    pub fn is_not_equal_to(&mut self, other: impl Into<Value>) -> &mut Self {
        let other = other.into();
        self.dispatch("is_not_equal_to", |h| h.object().is_not_equal_to(&other))
    }

    /// Asserts the value's size equals `expected`. Negative lengths are a
    /// configuration error, not an assertion failure.
    pub fn has_length(&mut self, expected: i64) -> &mut Self {
        if expected < 0 {
            ConfigError::InvalidLength(expected).raise();
        }
        let expected = expected as usize;
        self.dispatch("has_length", move |h| h.object().has_length(expected))
    }

    /// Asserts the value is an instance of `kind`. Widened kinds
    /// (`Kind::Number`) accept their narrower members.
    pub fn is_instance(&mut self, kind: Kind) -> &mut Self {
        self.dispatch("is_instance", move |h| h.object().is_instance(kind))
    }

    /// Asserts the value is an instance of any of `kinds`.
    pub fn is_instance_any(&mut self, kinds: &[Kind]) -> &mut Self {
        let kinds = kinds.to_vec();
        self.dispatch("is_instance_any", move |h| {
            h.object().is_instance_any(&kinds)
        })
    }

    /// Asserts the value and `other` are the same shared allocation.
    /// Distinct-but-equal values fail this check.
    pub fn has_same_identity_as(&mut self, other: &Arc<Value>) -> &mut Self {
        let mine = Arc::clone(&self.actual);
        let other = Arc::clone(other);
        self.dispatch("has_same_identity_as", move |handler| {
            let _ = handler.object();
            if Arc::ptr_eq(&mine, &other) {
                Ok(())
            } else {
                Err(format!("{} does not share identity with: {}", mine, other))
            }
        })
    }

    /// Asserts the value and `other` are different allocations.
    pub fn does_not_have_same_identity_as(&mut self, other: &Arc<Value>) -> &mut Self {
        let mine = Arc::clone(&self.actual);
        let other = Arc::clone(other);
        self.dispatch("does_not_have_same_identity_as", move |handler| {
            let _ = handler.object();
            if !Arc::ptr_eq(&mine, &other) {
                Ok(())
            } else {
                Err(format!("{} shares identity with: {}", mine, other))
            }
        })
    }

    /// Asserts the value is the null singleton.
    pub fn is_none(&mut self) -> &mut Self {
        self.dispatch("is_none", |h| h.object().is_none())
    }

    /// Asserts the value is not the null singleton.
    pub fn is_not_none(&mut self) -> &mut Self {
        self.dispatch("is_not_none", |h| h.object().is_not_none())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("actual", &self.actual)
            .field("mode", &self.mode)
            .field("triggered", &self.triggered)
            .field("failures", &self.failures.len())
            .finish()
    }
}

fn warn_never_triggered(actual: &Value) {
    tracing::warn!(actual = %actual, "assertion session was created and never used");
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(source) => ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
        .raise(),
    }
}

fn expect_num(method: &str, value: Value) -> Num {
    match value {
        Value::Int(i) => Num::Int(i),
        Value::Float(x) => Num::Float(x),
        other => ConfigError::ExpectedType {
            method: method.to_string(),
            expected: "a number",
            kind: other.kind(),
        }
        .raise(),
    }
}

fn one<'a>(method: &str, args: &'a [Value]) -> &'a Value {
    if args.len() != 1 {
        ConfigError::BadArity {
            method: method.to_string(),
            expected: 1,
            given: args.len(),
        }
        .raise();
    }
    &args[0]
}

fn two<'a>(method: &str, args: &'a [Value]) -> (&'a Value, &'a Value) {
    if args.len() != 2 {
        ConfigError::BadArity {
            method: method.to_string(),
            expected: 2,
            given: args.len(),
        }
        .raise();
    }
    (&args[0], &args[1])
}

fn none(method: &str, args: &[Value]) {
    if !args.is_empty() {
        ConfigError::BadArity {
            method: method.to_string(),
            expected: 0,
            given: args.len(),
        }
        .raise();
    }
}

fn str_arg(method: &str, value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => ConfigError::ExpectedType {
            method: method.to_string(),
            expected: "a string",
            kind: other.kind(),
        }
        .raise(),
    }
}

fn int_arg(method: &str, value: &Value) -> i64 {
    match value {
        Value::Int(i) => *i,
        other => ConfigError::ExpectedType {
            method: method.to_string(),
            expected: "an integer",
            kind: other.kind(),
        }
        .raise(),
    }
}

fn length_arg(method: &str, value: &Value) -> usize {
    let raw = int_arg(method, value);
    if raw < 0 {
        ConfigError::InvalidLength(raw).raise();
    }
    raw as usize
}

fn kind_arg(method: &str, value: &Value) -> Kind {
    let name = str_arg(method, value);
    match Kind::parse(&name) {
        Some(kind) => kind,
        None => ConfigError::ExpectedType {
            method: method.to_string(),
            expected: "a kind name",
            kind: value.kind(),
        }
        .raise(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_mode_passes_silently() {
        assert_that(5).is_equal_to(5).is_not_equal_to(6);
    }

    #[test]
    #[should_panic(expected = "assertion failed: 5 was not equal to: 6")]
    fn test_hard_mode_panics_on_first_failure() {
        assert_that(5).is_equal_to(6);
    }

    #[test]
    #[should_panic(expected = "[pricing] 5 was not equal to: 6")]
    fn test_category_prefixes_failures() {
        assert_that(5).with_category("pricing").is_equal_to(6);
    }

    #[test]
    #[should_panic(expected = "assertion failed: totals drifted")]
    fn test_description_supersedes_category() {
        assert_that(5)
            .with_category("pricing")
            .described_as("totals drifted")
            .is_equal_to(6);
    }

    #[test]
    fn test_soft_scope_collects_and_restores_mode() {
        let mut session = assert_that(1);
        let outcome = session.softly(|s| {
            s.is_equal_to(2).is_equal_to(3);
        });
        let failure = outcome.unwrap_err();
        assert_eq!(failure.failures.len(), 2);
        assert!(failure.failures[0].contains("1 was not equal to: 2"));
        assert!(failure.failures[1].contains("1 was not equal to: 3"));
        // Back in hard mode and empty collector afterwards.
        assert!(session.pending_failures().is_empty());
        session.is_equal_to(1);
    }

    #[test]
    fn test_soft_scope_with_no_failures_is_ok() {
        let mut session = assert_that("abc");
        let outcome = session.softly(|s| {
            s.starts_with("a").ends_with("c");
        });
        assert!(outcome.is_ok());
    }

    #[test]
    #[should_panic(expected = "soft context is not reentrant")]
    fn test_nested_soft_scope_is_rejected() {
        let mut session = assert_that(1);
        let _ = session.softly(|s| {
            let _ = s.softly(|inner| {
                inner.is_equal_to(1);
            });
        });
    }

    #[test]
    #[should_panic(expected = "StringHandler cannot perform `ends_with` against int values")]
    fn test_type_mismatch_is_a_config_error() {
        assert_that(5).ends_with("x");
    }

    #[test]
    fn test_config_errors_bypass_soft_collection() {
        let mut session = assert_that(5).quietly();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = session.softly(|s| {
                s.ends_with("x");
            });
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unwound_soft_scope_leaves_no_stale_failures() {
        let mut session = assert_that(5).quietly();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = session.softly(|s| {
                s.is_equal_to(6);
                s.ends_with("x");
            });
        }));
        assert!(result.is_err());
        // The aborted scope must not leak queued failures into hard mode.
        assert!(session.pending_failures().is_empty());
        session.is_equal_to(5);
    }

    #[test]
    fn test_dispatch_marks_triggered() {
        let mut session = assert_that(5);
        assert!(!session.triggered());
        session.is_equal_to(5);
        assert!(session.triggered());
    }

    #[test]
    #[should_panic(expected = "length must be a non-negative integer, got -1")]
    fn test_negative_length_is_a_config_error() {
        assert_that(vec![1, 2]).has_length(-1);
    }

    #[test]
    #[should_panic(expected = "unknown assertion method: frobnicate")]
    fn test_unknown_dynamic_method() {
        assert_that(5).call("frobnicate", &[]);
    }

    #[test]
    #[should_panic(expected = "`ends_with` takes 1 argument(s) but 2 were given")]
    fn test_dynamic_builtin_arity_checked() {
        assert_that("abc").call("ends_with", &["a".into(), "b".into()]);
    }

    #[test]
    fn test_dynamic_builtin_dispatch() {
        assert_that("hello").call("ends_with", &["lo".into()]);
        assert_that(5).call("is_between", &[4.into(), 6.into()]);
        assert_that(5).call("is_instance", &["number".into()]);
    }

    #[test]
    #[should_panic(expected = "invalid regex pattern")]
    fn test_invalid_pattern_is_a_config_error() {
        assert_that("abc").matches("(unclosed");
    }

    #[test]
    fn test_warn_mode_does_not_raise() {
        assert_that(5).warn_only().is_equal_to(6).is_equal_to(7);
    }
}
