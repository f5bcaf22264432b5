//! # affirm
//!
//! A fluent assertion library: wrap a value, chain predicates, get readable
//! failure messages. Failures can be raised immediately (hard mode) or
//! batched inside a soft scope and raised together.
//!
//! ## Quick Start
//!
//! ```rust
//! use affirm::assert_that;
//!
//! assert_that("hello world")
//!     .starts_with("hello")
//!     .ends_with("world");
//!
//! assert_that(5).is_between(4, 6).is_positive();
//! ```
//!
//! ## Soft scopes
//!
//! ```rust
//! use affirm::assert_that;
//!
//! let mut session = assert_that(1);
//! let outcome = session.softly(|s| {
//!     s.is_equal_to(2); // recorded, chain continues
//!     s.is_equal_to(3); // recorded as well
//! });
//! assert_eq!(outcome.unwrap_err().failures.len(), 2);
//! ```
//!
//! ## Dynamic attribute assertions
//!
//! Any unresolved method name ending in `_is` probes the wrapped value's
//! shape and compares the named attribute or key:
//!
//! ```rust
//! use affirm::assert_that;
//! use serde_json::json;
//!
//! assert_that(json!({"foo": 10})).call("foo_is", &[10.into()]);
//! ```
//!
//! ## User-defined predicates
//!
//! ```rust
//! use affirm::{assert_that, Registry};
//!
//! let mut registry = Registry::new();
//! registry
//!     .bind("is_length_five", |s, _args| {
//!         match s.actual().len() {
//!             Some(5) => {}
//!             _ => {
//!                 let reason = format!("{} was not length 5", s.actual());
//!                 s.error(reason);
//!             }
//!         }
//!     })
//!     .unwrap();
//!
//! assert_that(vec![1, 2, 3, 4, 5])
//!     .with_registry(registry)
//!     .call("is_length_five", &[]);
//! ```

pub mod errors;
pub mod registry;
pub mod session;
pub mod util;
pub mod value;

mod dispatch;
mod dynamic;
mod handlers;
mod reason;

// Core types
pub use errors::{ConfigError, SoftFailure};
pub use session::{assert_shared, assert_that, Mode, Session};
pub use value::{Callable, Kind, Record, Value};

// Registration
pub use registry::{register, BoundPredicate, Registry};

// Utilities
pub use util::{is_iterable, to_iterable};
