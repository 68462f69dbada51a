use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One word-list source as produced by the corpus tooling: a JSON object
/// mapping category names to arrays of candidate words or phrases.
///
/// ```json
/// { "adjectives": ["old", "grim"], "people": ["wizard", "chef"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordSource {
    pub categories: BTreeMap<String, Vec<String>>,
}

impl WordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a source from JSON text. Anything other than an object of
    /// string arrays is rejected.
    pub fn parse_json(input: &str) -> Result<WordSource, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Builder-style helper for assembling sources in code.
    pub fn with(mut self, category: &str, words: &[&str]) -> Self {
        self.categories
            .entry(category.to_string())
            .or_default()
            .extend(words.iter().map(|w| w.to_string()));
        self
    }
}
