/// Built-in template shapes for characters and events.

use std::str::FromStr;

use crate::core::template::{CategoryRef, Template, Token};

/// A fixed template shape, sized by how many adjectives and nouns to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `<adjectives…> <person…>`, e.g. "grim old wizard".
    Character,
    /// `<adjectives…> <event…> in the <adjectives…> <location…>`,
    /// e.g. "grim siege in the old tower".
    Event,
}

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Event => "event",
        }
    }

    /// Build the template. References go through the default alias names
    /// (`jj`, `person`, `event`, `loc`) so they also match word lists that
    /// use those names directly.
    pub fn template(&self, adjectives: usize, nouns: usize) -> Template {
        let mut tokens = Vec::new();
        match self {
            Self::Character => {
                push_refs(&mut tokens, "jj", adjectives);
                push_refs(&mut tokens, "person", nouns);
            }
            Self::Event => {
                push_refs(&mut tokens, "jj", adjectives);
                push_refs(&mut tokens, "event", nouns);
                tokens.push(Token::Literal("in".to_string()));
                tokens.push(Token::Literal("the".to_string()));
                push_refs(&mut tokens, "jj", adjectives);
                push_refs(&mut tokens, "loc", nouns);
            }
        }
        Template { tokens }
    }
}

fn push_refs(tokens: &mut Vec<Token>, key: &str, count: usize) {
    tokens.extend((0..count).map(|_| {
        Token::Category(CategoryRef {
            key: key.to_string(),
            capitalize: false,
            unique: false,
        })
    }));
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" | "char" => Ok(Self::Character),
            "event" => Ok(Self::Event),
            other => Err(format!("unknown preset '{}' (expected character or event)", other)),
        }
    }
}
