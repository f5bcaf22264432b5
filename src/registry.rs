//! User-defined predicate registration.
//!
//! Predicates live in an explicit registry consulted during dynamic method
//! resolution, after the built-in route table and before the `_is` prober.
//! A process-wide default registry backs [`register`]; tests that want
//! isolation construct their own [`Registry`] and attach it to a session.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::dispatch::is_route;
use crate::errors::ConfigError;
use crate::session::Session;
use crate::value::Value;

/// A registered predicate: the session is the first parameter, call
/// arguments follow. Failures are reported through [`Session::error`].
pub type BoundPredicate = Arc<dyn Fn(&mut Session, &[Value]) + Send + Sync>;

/// A named collection of user predicates.
#[derive(Default, Clone)]
pub struct Registry {
    predicates: HashMap<String, BoundPredicate>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a predicate under a name.
    ///
    /// Names must be non-empty identifiers, must not end in the reserved
    /// `_is` suffix, and must not shadow a built-in predicate. Violations
    /// are reported before any session is touched.
    pub fn bind<F>(&mut self, name: &str, predicate: F) -> Result<(), ConfigError>
    where
        F: Fn(&mut Session, &[Value]) + Send + Sync + 'static,
    {
        validate_name(name)?;
        self.predicates.insert(name.to_string(), Arc::new(predicate));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<BoundPredicate> {
        self.predicates.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidBinding(
            "bound predicates need a name".to_string(),
        ));
    }
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if !head_ok || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::InvalidBinding(format!(
            "`{}` is not a valid predicate name",
            name
        )));
    }
    if name.ends_with("_is") {
        // Reserved for the dynamic attribute prober.
        return Err(ConfigError::InvalidBinding(format!(
            "`{}` ends with the reserved `_is` suffix",
            name
        )));
    }
    if is_route(name) {
        return Err(ConfigError::InvalidBinding(format!(
            "`{}` shadows a built-in predicate",
            name
        )));
    }
    Ok(())
}

/// The process-wide default registry. Persists for the lifetime of the
/// process; there is no teardown.
pub(crate) fn global() -> &'static RwLock<Registry> {
    static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(Registry::new()))
}

/// Bind a predicate into the default registry, making it available to all
/// future sessions that do not carry their own registry.
pub fn register<F>(name: &str, predicate: F) -> Result<(), ConfigError>
where
    F: Fn(&mut Session, &[Value]) + Send + Sync + 'static,
{
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);
    guard.bind(name, predicate)
}

pub(crate) fn lookup_global(name: &str) -> Option<BoundPredicate> {
    let guard = global().read().unwrap_or_else(PoisonError::into_inner);
    guard.lookup(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Session, _: &[Value]) {}

    #[test]
    fn test_bind_and_lookup() {
        let mut registry = Registry::new();
        registry.bind("is_length_five", noop).unwrap();
        assert!(registry.lookup("is_length_five").is_some());
        assert!(registry.lookup("is_length_six").is_none());
    }

    #[test]
    fn test_names_lists_bound_predicates() {
        let mut registry = Registry::new();
        registry.bind("is_length_five", noop).unwrap();
        registry.bind("is_sorted", noop).unwrap();
        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["is_length_five", "is_sorted"]);
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut registry = Registry::new();
        let err = registry.bind("", noop).unwrap_err();
        assert!(err.to_string().contains("need a name"));
    }

    #[test]
    fn test_rejects_non_identifier_name() {
        let mut registry = Registry::new();
        assert!(registry.bind("not a name", noop).is_err());
        assert!(registry.bind("1starts_with_digit", noop).is_err());
    }

    #[test]
    fn test_rejects_reserved_suffix() {
        let mut registry = Registry::new();
        let err = registry.bind("foo_is", noop).unwrap_err();
        assert!(err.to_string().contains("_is"));
    }

    #[test]
    fn test_rejects_builtin_shadowing() {
        let mut registry = Registry::new();
        let err = registry.bind("is_equal_to", noop).unwrap_err();
        assert!(err.to_string().contains("shadows a built-in"));
    }
}
