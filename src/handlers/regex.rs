//! Regular expression predicates.
//!
//! Patterns are compiled by the session before dispatch, so an invalid
//! pattern surfaces as a configuration error and never reaches the handler.

use regex::Regex;

/// Handler for regex checks against textual subjects.
pub(crate) struct RegexHandler<'a> {
    actual: &'a str,
}

impl<'a> RegexHandler<'a> {
    pub fn new(actual: &'a str) -> Self {
        Self { actual }
    }

    /// Anchored-at-start partial match.
    pub fn matches(&self, re: &Regex, pattern: &str) -> Result<(), String> {
        // The leftmost match starts at 0 iff any match does.
        let matched = re.find(self.actual).map_or(false, |m| m.start() == 0);
        if matched {
            Ok(())
        } else {
            Err(format!(
                "{} did not match the beginning of: \"{}\"",
                pattern, self.actual
            ))
        }
    }

    /// First match anywhere in the subject.
    pub fn searches(&self, re: &Regex, pattern: &str) -> Result<(), String> {
        if re.is_match(self.actual) {
            Ok(())
        } else {
            Err(format!("{} was not found in: \"{}\"", pattern, self.actual))
        }
    }

    /// Entire-subject match. `re` is the pattern wrapped in `^(?:..)$`.
    pub fn matches_fully(&self, re: &Regex, pattern: &str) -> Result<(), String> {
        if re.is_match(self.actual) {
            Ok(())
        } else {
            Err(format!(
                "{} did not fully match: \"{}\"",
                pattern, self.actual
            ))
        }
    }

    /// Exact count of non-overlapping occurrences.
    pub fn finds(&self, re: &Regex, pattern: &str, count: usize) -> Result<(), String> {
        let found = re.find_iter(self.actual).count();
        if found == count {
            Ok(())
        } else {
            Err(format!(
                "expected {} occurrence(s) of {} in \"{}\" but found {}",
                count, pattern, self.actual, found
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_matches_anchors_at_start() {
        let handler = RegexHandler::new("abc123");
        assert!(handler.matches(&re(r"[a-z]+"), r"[a-z]+").is_ok());
        assert!(handler.matches(&re(r"\d+"), r"\d+").is_err());
    }

    #[test]
    fn test_searches_anywhere() {
        let handler = RegexHandler::new("abc123");
        assert!(handler.searches(&re(r"\d+"), r"\d+").is_ok());
        assert!(handler.searches(&re(r"xyz"), r"xyz").is_err());
    }

    #[test]
    fn test_matches_fully() {
        let handler = RegexHandler::new("abc123");
        assert!(handler
            .matches_fully(&re(r"^(?:[a-z]+\d+)$"), r"[a-z]+\d+")
            .is_ok());
        assert!(handler
            .matches_fully(&re(r"^(?:[a-z]+)$"), r"[a-z]+")
            .is_err());
    }

    #[test]
    fn test_finds_exact_count() {
        let handler = RegexHandler::new("a1 b2 c3");
        assert!(handler.finds(&re(r"\d"), r"\d", 3).is_ok());
        let reason = handler.finds(&re(r"\d"), r"\d", 2).unwrap_err();
        assert!(reason.contains("found 3"));
    }
}
