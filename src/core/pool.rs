/// Word pool: merged categorized word lists and per-render working copies.

use log::{debug, info};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

use crate::schema::word_list::WordSource;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("malformed word list '{source_name}': {reason}")]
    MalformedSource { source_name: String, reason: String },
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("category '{0}' has no candidates left")]
    EmptyCategory(String),
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Categorized candidate words.
///
/// Each category holds a sorted, duplicate-free list. Keeping candidates
/// sorted makes a seeded pick independent of the order sources were merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    categories: FxHashMap<String, Vec<String>>,
}

impl WordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union every source per category. Sources need not share keys, and
    /// a category present in any source is present in the result even if
    /// all of its lists are empty.
    pub fn merge<I>(sources: I) -> WordPool
    where
        I: IntoIterator<Item = WordSource>,
    {
        let mut categories: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut count = 0usize;
        for source in sources {
            count += 1;
            for (name, words) in source.categories {
                categories.entry(name).or_default().extend(words);
            }
        }
        for words in categories.values_mut() {
            words.sort_unstable();
            words.dedup();
        }
        debug!(
            "merged {} word list(s) into {} categories",
            count,
            categories.len()
        );
        WordPool { categories }
    }

    /// Parse and merge JSON sources given as `(name, text)` pairs. The name
    /// only labels errors.
    pub fn from_json_sources<'a, I>(sources: I) -> Result<WordPool, PoolError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let parsed = sources
            .into_iter()
            .map(|(name, text)| {
                WordSource::parse_json(text).map_err(|e| PoolError::MalformedSource {
                    source_name: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::merge(parsed))
    }

    /// Load and merge JSON word-list files.
    pub fn load_json_files<P: AsRef<Path>>(paths: &[P]) -> Result<WordPool, PoolError> {
        let mut texts = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| PoolError::Io {
                path: path.display().to_string(),
                source,
            })?;
            info!("loaded word list {}", path.display());
            texts.push((path.display().to_string(), text));
        }
        Self::from_json_sources(texts.iter().map(|(n, t)| (n.as_str(), t.as_str())))
    }

    /// Load the files named in a comma-separated list, the form the
    /// command-line tools take. Empty entries are skipped.
    pub fn load_file_list(list: &str) -> Result<WordPool, PoolError> {
        let paths: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        Self::load_json_files(&paths)
    }

    /// An independent copy for one render. Removals on the copy never
    /// reach `self` or any other copy.
    pub fn working_copy(&self) -> WordPool {
        self.clone()
    }

    /// Category names, sorted.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Current candidates of a category, sorted.
    pub fn candidates(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Number of candidates currently left in a category.
    pub fn len(&self, category: &str) -> Option<usize> {
        self.categories.get(category).map(Vec::len)
    }

    /// True when the pool has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Pick one candidate uniformly from the category's current set.
    pub fn pick<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Result<String, PoolError> {
        let words = self
            .categories
            .get(category)
            .ok_or_else(|| PoolError::UnknownCategory(category.to_string()))?;
        if words.is_empty() {
            return Err(PoolError::EmptyCategory(category.to_string()));
        }
        Ok(words[rng.gen_range(0..words.len())].clone())
    }

    /// Remove `value` from this pool's category. Returns false when the
    /// category or value is absent.
    pub fn remove(&mut self, category: &str, value: &str) -> bool {
        let Some(words) = self.categories.get_mut(category) else {
            return false;
        };
        match words.binary_search_by(|w| w.as_str().cmp(value)) {
            Ok(idx) => {
                words.remove(idx);
                true
            }
            Err(_) => false,
        }
    }
}
