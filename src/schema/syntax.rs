use serde::{Deserialize, Serialize};

/// Punctuation tokens that bind to the preceding word.
pub const ATTACHED_PUNCTUATION: &[&str] = &[",", "!", "?", ":", ";", "."];

/// The possessive clitic, also bound to the preceding word.
pub const POSSESSIVE_CLITIC: &str = "'s";

/// Reserved characters of the template language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSyntax {
    /// Marks a plain category reference: `:person`.
    pub category_sigil: char,
    /// Marks a no-repeat category reference: `@person`.
    pub unique_sigil: char,
    /// Follows the category sigil to capitalize the result: `:!person`.
    pub capitalize: char,
}

impl Default for TemplateSyntax {
    fn default() -> Self {
        Self {
            category_sigil: ':',
            unique_sigil: '@',
            capitalize: '!',
        }
    }
}

impl TemplateSyntax {
    /// Returns a description of the first problem found, if any.
    pub fn check(&self) -> Option<String> {
        let chars = [self.category_sigil, self.unique_sigil, self.capitalize];
        if let Some(c) = chars.iter().find(|c| c.is_whitespace()) {
            return Some(format!("reserved character {:?} is whitespace", c));
        }
        if self.category_sigil == self.unique_sigil {
            return Some(format!(
                "category and unique sigils are both {:?}",
                self.category_sigil
            ));
        }
        if self.capitalize == self.category_sigil || self.capitalize == self.unique_sigil {
            return Some(format!(
                "capitalize modifier {:?} collides with a sigil",
                self.capitalize
            ));
        }
        None
    }
}

/// Whether rendered tokens are separated by a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinMode {
    /// Space-delimited languages.
    #[default]
    Spaced,
    /// Languages without inter-word spaces, e.g. Japanese.
    Unspaced,
}

impl JoinMode {
    pub fn joiner(&self) -> &'static str {
        match self {
            Self::Spaced => " ",
            Self::Unspaced => "",
        }
    }
}

/// Whether `token` attaches to the preceding word without a joiner.
pub fn is_attached_literal(token: &str) -> bool {
    token == POSSESSIVE_CLITIC || ATTACHED_PUNCTUATION.contains(&token)
}
