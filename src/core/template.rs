/// Template language: tokenization, token classification, and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::pool::{PoolError, WordPool};
use crate::schema::alias::AliasTable;
use crate::schema::syntax::{is_attached_literal, TemplateSyntax};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template token '{0}' names no category")]
    EmptyReference(String),
}

/// A reference to a word category inside a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category name as written, before alias resolution.
    pub key: String,
    /// Uppercase the first character of the picked word.
    pub capitalize: bool,
    /// Remove the picked word from the working pool for the rest of the
    /// render.
    pub unique: bool,
}

/// One classified template token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// Emitted as written.
    Literal(String),
    /// Punctuation or `'s`, emitted with no joiner before it.
    Attached(String),
    /// Replaced by a word from the pool.
    Category(CategoryRef),
}

impl Token {
    /// Classify a single whitespace-free token.
    ///
    /// - `'s` and `, ! ? : ; .` → `Attached`
    /// - `@key`, `@!key`, `@:key`, `@:!key` → unique `Category`
    /// - `:key`, `:!key` → `Category`
    /// - anything else → `Literal`
    pub fn classify(raw: &str, syntax: &TemplateSyntax) -> Result<Token, TemplateError> {
        if is_attached_literal(raw) {
            return Ok(Token::Attached(raw.to_string()));
        }

        let (unique, rest) = match raw.strip_prefix(syntax.unique_sigil) {
            Some(rest) => (true, rest.strip_prefix(syntax.category_sigil).unwrap_or(rest)),
            None => match raw.strip_prefix(syntax.category_sigil) {
                Some(rest) => (false, rest),
                None => return Ok(Token::Literal(raw.to_string())),
            },
        };

        let (capitalize, key) = match rest.strip_prefix(syntax.capitalize) {
            Some(key) => (true, key),
            None => (false, rest),
        };

        if key.is_empty() {
            return Err(TemplateError::EmptyReference(raw.to_string()));
        }

        Ok(Token::Category(CategoryRef {
            key: key.to_string(),
            capitalize,
            unique,
        }))
    }
}

/// A parsed template, a sequence of classified tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub tokens: Vec<Token>,
}

impl Template {
    /// Parse a whitespace-delimited template with the default syntax.
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        Self::parse_with(input, &TemplateSyntax::default())
    }

    pub fn parse_with(input: &str, syntax: &TemplateSyntax) -> Result<Template, TemplateError> {
        let tokens = input
            .split_whitespace()
            .map(|raw| Token::classify(raw, syntax))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Template { tokens })
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn category_refs(&self) -> impl Iterator<Item = &CategoryRef> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Category(r) => Some(r),
            _ => None,
        })
    }

    /// Keys (as written) of every category reference that resolves to
    /// nothing in `pool`, in template order, without duplicates.
    pub fn validate(&self, pool: &WordPool, aliases: &AliasTable) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for r in self.category_refs() {
            let category = aliases.resolve(&r.key, |k| pool.contains(k));
            if !pool.contains(category) && !missing.contains(&r.key) {
                missing.push(r.key.clone());
            }
        }
        missing
    }

    /// Fail with the first reference that resolves to no category.
    pub fn require_categories(
        &self,
        pool: &WordPool,
        aliases: &AliasTable,
    ) -> Result<(), PoolError> {
        match self.validate(pool, aliases).into_iter().next() {
            Some(key) => Err(PoolError::UnknownCategory(key)),
            None => Ok(()),
        }
    }

    /// Number of unique references per resolved category. A render fails
    /// once a category is asked for more unique picks than it has words.
    pub fn unique_demand(&self, pool: &WordPool, aliases: &AliasTable) -> Vec<(String, usize)> {
        let mut demand: Vec<(String, usize)> = Vec::new();
        for r in self.category_refs().filter(|r| r.unique) {
            let category = aliases.resolve(&r.key, |k| pool.contains(k));
            match demand.iter_mut().find(|(c, _)| c == category) {
                Some((_, n)) => *n += 1,
                None => demand.push((category.to_string(), 1)),
            }
        }
        demand
    }
}
