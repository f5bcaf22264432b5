//! Failure message shaping: category prefixes and description overrides.

/// The category/description pair attached to a session.
///
/// A description fully supersedes both the generated message and the
/// category. Last write wins for either knob; there is no stacking.
#[derive(Debug, Clone, Default)]
pub(crate) struct Reason {
    pub category: Option<String>,
    pub description: Option<String>,
}

impl Reason {
    pub fn format(&self, raw: &str) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }
        match &self.category {
            Some(category) => format!("[{}] {}", category, raw),
            None => raw.to_string(),
        }
    }
}
