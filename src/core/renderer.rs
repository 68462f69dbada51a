/// Template renderer: resolves category references against a per-render
/// working copy of the word pool and assembles the output line.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::core::config::{ConfigError, RendererConfig};
use crate::core::pool::{PoolError, WordPool};
use crate::core::template::{CategoryRef, Template, TemplateError, Token};
use crate::schema::alias::AliasTable;
use crate::schema::syntax::{JoinMode, TemplateSyntax};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("word pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Seed offset between consecutive renders of one batch.
const RENDER_SEED_STRIDE: u64 = 7919;

/// A resolved token, ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Preceded by the joiner unless it opens the line.
    Word(String),
    /// Never preceded by the joiner.
    Attached(String),
}

/// Join resolved tokens. The joiner goes between words only, never at the
/// start of the line and never before an attached token.
pub fn assemble(joiner: &str, pieces: &[Rendered]) -> String {
    let mut out = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        match piece {
            Rendered::Attached(text) => out.push_str(text),
            Rendered::Word(text) => {
                if i > 0 {
                    out.push_str(joiner);
                }
                out.push_str(text);
            }
        }
    }
    out
}

/// Uppercase the first character, leaving the rest as it is.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders templates against word pools. Built via
/// `TemplateRenderer::builder()`.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    aliases: AliasTable,
    syntax: TemplateSyntax,
    joiner: String,
}

/// Builder for constructing a `TemplateRenderer`.
pub struct TemplateRendererBuilder {
    config_path: Option<String>,
    /// Directly provided config (for use without files).
    config: Option<RendererConfig>,
    extra_aliases: Option<AliasTable>,
    join_mode: Option<JoinMode>,
    joiner: Option<String>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::from_config(RendererConfig::default())
    }
}

impl TemplateRenderer {
    pub fn builder() -> TemplateRendererBuilder {
        TemplateRendererBuilder {
            config_path: None,
            config: None,
            extra_aliases: None,
            join_mode: None,
            joiner: None,
        }
    }

    pub fn from_config(config: RendererConfig) -> Self {
        Self {
            aliases: config.aliases,
            syntax: config.syntax,
            joiner: config.joiner.joiner().to_string(),
        }
    }

    pub fn joiner(&self) -> &str {
        &self.joiner
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Parse a template using this renderer's reserved characters.
    pub fn parse(&self, input: &str) -> Result<Template, RenderError> {
        Ok(Template::parse_with(input, &self.syntax)?)
    }

    /// Render one line.
    ///
    /// Works against a private copy of `pool`: unique references remove
    /// their pick from the copy, so they never repeat within this line but
    /// have no effect on `pool` or on any other render.
    pub fn render_sentence<R: Rng + ?Sized>(
        &self,
        template: &Template,
        pool: &WordPool,
        rng: &mut R,
    ) -> Result<String, RenderError> {
        let mut working = pool.working_copy();
        let mut pieces = Vec::with_capacity(template.tokens.len());
        for token in &template.tokens {
            let piece = match token {
                Token::Attached(text) => Rendered::Attached(text.clone()),
                Token::Literal(text) => Rendered::Word(text.clone()),
                Token::Category(r) => Rendered::Word(self.resolve(r, &mut working, rng)?),
            };
            pieces.push(piece);
        }
        Ok(assemble(&self.joiner, &pieces))
    }

    /// Render `count` independent lines, in order.
    ///
    /// Each render gets its own working copy and its own generator seeded
    /// from `seed` and the render's index, so the output for a given seed
    /// does not depend on how rayon schedules the work.
    pub fn render_many(
        &self,
        template: &Template,
        pool: &WordPool,
        count: usize,
        seed: u64,
    ) -> Result<Vec<String>, RenderError> {
        debug!(
            "rendering {} line(s) of {} token(s), seed {}",
            count,
            template.tokens.len(),
            seed
        );
        (0..count)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(
                    seed.wrapping_add((i as u64).wrapping_mul(RENDER_SEED_STRIDE)),
                );
                self.render_sentence(template, pool, &mut rng)
            })
            .collect()
    }

    fn resolve<R: Rng + ?Sized>(
        &self,
        r: &CategoryRef,
        working: &mut WordPool,
        rng: &mut R,
    ) -> Result<String, RenderError> {
        let category = self.aliases.resolve(&r.key, |k| working.contains(k));
        if !working.contains(category) {
            // Report the key as written, not the alias target.
            return Err(PoolError::UnknownCategory(r.key.clone()).into());
        }
        let word = working.pick(category, rng)?;
        if r.unique {
            // The word was just picked from this copy, so it is present.
            working.remove(category, &word);
        }
        Ok(if r.capitalize {
            capitalize_first(&word)
        } else {
            word
        })
    }
}

impl TemplateRendererBuilder {
    pub fn config_file(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    /// Provide a config directly (for use without files).
    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Aliases added on top of whatever the config defines.
    pub fn aliases(mut self, aliases: AliasTable) -> Self {
        self.extra_aliases = Some(aliases);
        self
    }

    pub fn join_mode(mut self, mode: JoinMode) -> Self {
        self.join_mode = Some(mode);
        self
    }

    /// An arbitrary joiner string. Takes precedence over `join_mode`.
    pub fn joiner(mut self, joiner: &str) -> Self {
        self.joiner = Some(joiner.to_string());
        self
    }

    pub fn build(self) -> Result<TemplateRenderer, RenderError> {
        let mut config = match self.config_path {
            Some(ref path) => RendererConfig::load_from_ron(Path::new(path))?,
            None => self.config.unwrap_or_default(),
        };
        if let Some(aliases) = self.extra_aliases {
            config.aliases.extend(aliases);
        }
        if let Some(mode) = self.join_mode {
            config.joiner = mode;
        }
        config.check()?;

        let mut renderer = TemplateRenderer::from_config(config);
        if let Some(joiner) = self.joiner {
            renderer.joiner = joiner;
        }
        Ok(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::word_list::WordSource;

    fn pool() -> WordPool {
        WordPool::merge([WordSource::new()
            .with("adjectives", &["old"])
            .with("people", &["wizard"])])
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn assemble_suppresses_joiner_before_attached() {
        let pieces = vec![
            Rendered::Word("hello".to_string()),
            Rendered::Attached(",".to_string()),
            Rendered::Word("world".to_string()),
        ];
        assert_eq!(assemble(" ", &pieces), "hello, world");
        assert_eq!(assemble("", &pieces), "hello,world");
    }

    #[test]
    fn assemble_no_leading_joiner() {
        assert_eq!(assemble(" ", &[Rendered::Word("solo".to_string())]), "solo");
        assert_eq!(assemble(" ", &[Rendered::Attached(".".to_string())]), ".");
        assert_eq!(assemble(" ", &[]), "");
    }

    #[test]
    fn capitalize_first_only() {
        assert_eq!(capitalize_first("chef"), "Chef");
        assert_eq!(capitalize_first("mcGregor"), "McGregor");
        assert_eq!(capitalize_first("old HOUSE"), "Old HOUSE");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn punctuation_attaches() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse("hello , world").unwrap();
        assert_eq!(
            renderer.render_sentence(&t, &pool(), &mut rng()).unwrap(),
            "hello, world"
        );
    }

    #[test]
    fn possessive_attaches() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse("the :person 's staff .").unwrap();
        assert_eq!(
            renderer.render_sentence(&t, &pool(), &mut rng()).unwrap(),
            "the wizard's staff."
        );
    }

    #[test]
    fn capitalized_alias_reference() {
        let renderer = TemplateRenderer::default();
        let pool = WordPool::merge([WordSource::new().with("people", &["chef"])]);
        let t = renderer.parse(":!person").unwrap();
        assert_eq!(renderer.render_sentence(&t, &pool, &mut rng()).unwrap(), "Chef");
    }

    #[test]
    fn old_wizard() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse(":!jj :person").unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                renderer.render_sentence(&t, &pool(), &mut rng).unwrap(),
                "Old wizard"
            );
        }
    }

    #[test]
    fn unspaced_join() {
        let renderer = TemplateRenderer::builder()
            .join_mode(JoinMode::Unspaced)
            .build()
            .unwrap();
        let pool = WordPool::merge([WordSource::new()
            .with("adjectives", &["big"])
            .with("people", &["cat"])]);
        let t = renderer.parse(":jj :person").unwrap();
        assert_eq!(renderer.render_sentence(&t, &pool, &mut rng()).unwrap(), "bigcat");
    }

    #[test]
    fn unknown_category_reports_key() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse(":nonexistent").unwrap();
        let err = renderer.render_sentence(&t, &pool(), &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Pool(PoolError::UnknownCategory(ref k)) if k == "nonexistent"
        ));
    }

    #[test]
    fn alias_target_missing_is_unknown() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse(":loc").unwrap();
        assert!(matches!(
            renderer.render_sentence(&t, &pool(), &mut rng()),
            Err(RenderError::Pool(PoolError::UnknownCategory(_)))
        ));
    }

    #[test]
    fn literal_category_shadows_alias() {
        let renderer = TemplateRenderer::default();
        let pool = WordPool::merge([WordSource::new()
            .with("person", &["tagged"])
            .with("people", &["aliased"])]);
        let t = renderer.parse(":person").unwrap();
        assert_eq!(renderer.render_sentence(&t, &pool, &mut rng()).unwrap(), "tagged");
    }

    #[test]
    fn unique_exhaustion_errors() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse("@person @person").unwrap();
        let err = renderer.render_sentence(&t, &pool(), &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Pool(PoolError::EmptyCategory(ref c)) if c == "people"
        ));
    }

    #[test]
    fn plain_references_may_repeat() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse(":person :person").unwrap();
        assert_eq!(
            renderer.render_sentence(&t, &pool(), &mut rng()).unwrap(),
            "wizard wizard"
        );
    }

    #[test]
    fn unique_never_repeats_within_render() {
        let renderer = TemplateRenderer::default();
        let pool = WordPool::merge([WordSource::new().with("people", &["a", "b", "c"])]);
        let t = renderer.parse("@person @person @person").unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let line = renderer.render_sentence(&t, &pool, &mut rng).unwrap();
            let mut words: Vec<&str> = line.split(' ').collect();
            words.sort_unstable();
            assert_eq!(words, vec!["a", "b", "c"]);
        }
        assert_eq!(pool.len("people"), Some(3));
    }

    #[test]
    fn unique_does_not_leak_across_renders() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse("@person").unwrap();
        let lines = renderer.render_many(&t, &pool(), 4, 9).unwrap();
        assert_eq!(lines, vec!["wizard"; 4]);
    }

    #[test]
    fn render_many_is_deterministic() {
        let renderer = TemplateRenderer::default();
        let pool = WordPool::merge([WordSource::new()
            .with("adjectives", &["old", "grim", "tall", "pale"])
            .with("people", &["chef", "wizard", "knight"])]);
        let t = renderer.parse(":!jj @jj :person").unwrap();
        let a = renderer.render_many(&t, &pool, 16, 1234).unwrap();
        let b = renderer.render_many(&t, &pool, 16, 1234).unwrap();
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn render_many_matches_sequential_renders() {
        let renderer = TemplateRenderer::default();
        let pool = WordPool::merge([WordSource::new().with("people", &["chef", "wizard", "knight"])]);
        let t = renderer.parse(":person").unwrap();
        let parallel = renderer.render_many(&t, &pool, 8, 5).unwrap();
        let sequential: Vec<String> = (0..8u64)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(5 + i * RENDER_SEED_STRIDE);
                renderer.render_sentence(&t, &pool, &mut rng).unwrap()
            })
            .collect();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn render_zero_lines() {
        let renderer = TemplateRenderer::default();
        let t = renderer.parse(":person").unwrap();
        assert!(renderer.render_many(&t, &pool(), 0, 1).unwrap().is_empty());
    }

    #[test]
    fn builder_custom_joiner_and_aliases() {
        let renderer = TemplateRenderer::builder()
            .aliases(AliasTable::from_pairs([("who", "people")]))
            .joiner("-")
            .build()
            .unwrap();
        assert_eq!(renderer.joiner(), "-");
        let t = renderer.parse(":jj :who").unwrap();
        assert_eq!(renderer.render_sentence(&t, &pool(), &mut rng()).unwrap(), "old-wizard");
    }

    #[test]
    fn builder_rejects_bad_syntax() {
        let mut config = RendererConfig::default();
        config.syntax.unique_sigil = config.syntax.category_sigil;
        assert!(matches!(
            TemplateRenderer::builder().with_config(config).build(),
            Err(RenderError::Config(ConfigError::InvalidSyntax(_)))
        ));
    }

    #[test]
    fn builder_from_config_file() {
        let renderer = TemplateRenderer::builder()
            .config_file("tests/fixtures/renderer.ron")
            .build()
            .unwrap();
        assert_eq!(renderer.aliases().get("abs"), Some("abstraction"));
        assert_eq!(renderer.joiner(), " ");
    }
}
