/// Renderer configuration: aliases, reserved characters and the joiner.

use log::debug;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::schema::alias::AliasTable;
use crate::schema::syntax::{JoinMode, TemplateSyntax};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Everything about rendering that is not the template or the words.
///
/// In RON, every field is optional:
///
/// ```ron
/// (
///     aliases: { "abs": "abstraction" },
///     syntax: (category_sigil: ':', unique_sigil: '@', capitalize: '!'),
///     joiner: Unspaced,
/// )
/// ```
///
/// Aliases given in a file are added to the built-in table rather than
/// replacing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RendererConfig {
    pub aliases: AliasTable,
    pub syntax: TemplateSyntax,
    pub joiner: JoinMode,
}

#[derive(Debug, Deserialize)]
struct RonConfig {
    #[serde(default = "AliasTable::empty")]
    aliases: AliasTable,
    #[serde(default)]
    syntax: TemplateSyntax,
    #[serde(default)]
    joiner: JoinMode,
}

impl RendererConfig {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<RendererConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse_ron(&contents)?;
        debug!(
            "loaded renderer config {} ({} aliases)",
            path.display(),
            config.aliases.len()
        );
        Ok(config)
    }

    /// Parse a configuration from a RON string.
    pub fn parse_ron(input: &str) -> Result<RendererConfig, ConfigError> {
        let raw: RonConfig = ron::from_str(input)?;
        let mut aliases = AliasTable::default();
        aliases.extend(raw.aliases);
        let config = RendererConfig {
            aliases,
            syntax: raw.syntax,
            joiner: raw.joiner,
        };
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        match self.syntax.check() {
            Some(problem) => Err(ConfigError::InvalidSyntax(problem)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = RendererConfig::parse_ron("()").unwrap();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn file_aliases_extend_builtin_table() {
        let config = RendererConfig::parse_ron(
            r#"(aliases: { "abs": "abstraction", "jj": "traits" })"#,
        )
        .unwrap();
        assert_eq!(config.aliases.get("abs"), Some("abstraction"));
        assert_eq!(config.aliases.get("jj"), Some("traits"));
        assert_eq!(config.aliases.get("person"), Some("people"));
    }

    #[test]
    fn syntax_and_joiner_override() {
        let config = RendererConfig::parse_ron(
            "(syntax: (category_sigil: '$', unique_sigil: '%', capitalize: '^'), joiner: Unspaced)",
        )
        .unwrap();
        assert_eq!(config.syntax.category_sigil, '$');
        assert_eq!(config.syntax.unique_sigil, '%');
        assert_eq!(config.syntax.capitalize, '^');
        assert_eq!(config.joiner, JoinMode::Unspaced);
    }

    #[test]
    fn colliding_sigils_rejected() {
        let err = RendererConfig::parse_ron(
            "(syntax: (category_sigil: ':', unique_sigil: ':', capitalize: '!'))",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax(_)));
    }

    #[test]
    fn invalid_ron_rejected() {
        assert!(matches!(
            RendererConfig::parse_ron("(joiner: Sideways)"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn load_fixture() {
        let path = std::path::PathBuf::from("tests/fixtures/renderer.ron");
        let config = RendererConfig::load_from_ron(&path).unwrap();
        assert_eq!(config.aliases.get("abs"), Some("abstraction"));
        assert_eq!(config.joiner, JoinMode::Spaced);
    }
}
