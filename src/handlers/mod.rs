//! Per-domain predicate implementations.
//!
//! Each handler is bound to one value for a single dispatch call and only
//! exists once the dispatcher has verified the subject's type against the
//! handler's accepted kinds. The handlers themselves return raw failure
//! reasons; formatting and soft/hard routing happen in the session.

mod numeric;
mod object;
mod regex;
mod strings;

pub(crate) use numeric::{Num, NumericHandler};
pub(crate) use object::ObjectHandler;
pub(crate) use regex::RegexHandler;
pub(crate) use strings::StringHandler;
