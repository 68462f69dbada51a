use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Short names a template may use in place of a full category name.
///
/// An alias is consulted only when the literal key is not itself a category
/// in the pool, so a word list that really has a `person` category keeps
/// `:person` pointing at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: FxHashMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::from_pairs([
            ("jj", "adjectives"),
            ("person", "people"),
            ("loc", "locations"),
            ("event", "events"),
            ("item", "items"),
            ("name", "names"),
        ])
    }
}

impl AliasTable {
    /// A table with no aliases at all.
    pub fn empty() -> Self {
        Self {
            aliases: FxHashMap::default(),
        }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(short, canonical)| (short.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, short: &str) -> Option<&str> {
        self.aliases.get(short).map(String::as_str)
    }

    /// Add every alias from `other`; entries in `other` win on conflict.
    pub fn extend(&mut self, other: AliasTable) {
        self.aliases.extend(other.aliases);
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Map `key` to the category it names.
    ///
    /// `is_category` tells whether a name is already a known category; when
    /// it is, the key is returned untouched. Otherwise the alias is used if
    /// one exists, and the key itself is returned when none does.
    pub fn resolve<'a>(&'a self, key: &'a str, is_category: impl Fn(&str) -> bool) -> &'a str {
        if is_category(key) {
            return key;
        }
        self.get(key).unwrap_or(key)
    }
}
