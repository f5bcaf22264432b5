//! String predicates.

/// Handler for textual subjects. The dispatcher only constructs this for
/// `Value::Str`.
pub(crate) struct StringHandler<'a> {
    actual: &'a str,
}

impl<'a> StringHandler<'a> {
    pub fn new(actual: &'a str) -> Self {
        Self { actual }
    }

    pub fn ends_with(&self, suffix: &str) -> Result<(), String> {
        if self.actual.ends_with(suffix) {
            Ok(())
        } else {
            Err(format!(
                "\"{}\" did not end with: \"{}\"",
                self.actual, suffix
            ))
        }
    }

    pub fn starts_with(&self, prefix: &str) -> Result<(), String> {
        if self.actual.starts_with(prefix) {
            Ok(())
        } else {
            Err(format!(
                "\"{}\" did not start with: \"{}\"",
                self.actual, prefix
            ))
        }
    }

    /// At least one character, all alphabetic. The empty string fails.
    pub fn is_alpha(&self) -> Result<(), String> {
        if !self.actual.is_empty() && self.actual.chars().all(char::is_alphabetic) {
            Ok(())
        } else {
            Err(format!("\"{}\" was not alphabetic", self.actual))
        }
    }

    /// At least one character, all numeric. The empty string fails.
    pub fn is_digit(&self) -> Result<(), String> {
        if !self.actual.is_empty() && self.actual.chars().all(char::is_numeric) {
            Ok(())
        } else {
            Err(format!("\"{}\" was not made up of digits", self.actual))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_with() {
        assert!(StringHandler::new("hello world").ends_with("world").is_ok());
        let reason = StringHandler::new("hello world")
            .ends_with("mars")
            .unwrap_err();
        assert!(reason.contains("hello world"));
        assert!(reason.contains("mars"));
    }

    #[test]
    fn test_starts_with() {
        assert!(StringHandler::new("hello").starts_with("he").is_ok());
        assert!(StringHandler::new("hello").starts_with("lo").is_err());
    }

    #[test]
    fn test_empty_string_edge_cases() {
        assert!(StringHandler::new("").is_alpha().is_err());
        assert!(StringHandler::new("").is_digit().is_err());
        // Every string ends and starts with the empty suffix/prefix.
        assert!(StringHandler::new("").ends_with("").is_ok());
        assert!(StringHandler::new("abc").starts_with("").is_ok());
    }

    #[test]
    fn test_is_alpha() {
        assert!(StringHandler::new("abc").is_alpha().is_ok());
        assert!(StringHandler::new("abc1").is_alpha().is_err());
        assert!(StringHandler::new("a b").is_alpha().is_err());
    }

    #[test]
    fn test_is_digit() {
        assert!(StringHandler::new("0123").is_digit().is_ok());
        assert!(StringHandler::new("12a").is_digit().is_err());
    }
}
