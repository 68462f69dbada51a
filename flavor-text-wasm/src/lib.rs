//! WASM bindings for flavor-text: powers the interactive web demo.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use flavor_text::core::export::to_abulafia;
use flavor_text::core::pool::WordPool;
use flavor_text::core::presets::Preset;
use flavor_text::core::renderer::TemplateRenderer;
use flavor_text::schema::syntax::JoinMode;

// ---------------------------------------------------------------------------
// Embedded word lists: compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const FANTASY: &str = include_str!("../../word_lists/fantasy.json");
    pub const JAPANESE: &str = include_str!("../../word_lists/japanese.json");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CategoryInfo {
    name: String,
    size: usize,
}

// ---------------------------------------------------------------------------
// FlavorDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct FlavorDemo {
    renderer: TemplateRenderer,
    pool: WordPool,
    rng: StdRng,
}

#[wasm_bindgen]
impl FlavorDemo {
    /// Create a demo over one of the built-in word lists.
    #[wasm_bindgen(constructor)]
    pub fn new(word_list: &str, seed: u64) -> Result<FlavorDemo, JsError> {
        let (source, mode) = match word_list {
            "fantasy" => (data::FANTASY, JoinMode::Spaced),
            "japanese" => (data::JAPANESE, JoinMode::Unspaced),
            _ => return Err(JsError::new(&format!("Unknown word list: {word_list}"))),
        };
        Self::build(&[(word_list, source)], mode, seed)
    }

    /// Create a demo from caller-supplied word lists: a JSON array of
    /// category → words objects, merged together.
    pub fn from_json(sources_json: &str, unspaced: bool, seed: u64) -> Result<FlavorDemo, JsError> {
        let sources: Vec<serde_json::Value> = serde_json::from_str(sources_json)
            .map_err(|e| JsError::new(&format!("Invalid word list JSON: {e}")))?;
        let texts: Vec<(String, String)> = sources
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("source {i}"), v.to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = texts.iter().map(|(n, t)| (n.as_str(), t.as_str())).collect();
        let mode = if unspaced {
            JoinMode::Unspaced
        } else {
            JoinMode::Spaced
        };
        Self::build(&refs, mode, seed)
    }

    /// Render one line of a template.
    pub fn render(&mut self, template: &str) -> Result<String, JsError> {
        let template = self
            .renderer
            .parse(template)
            .map_err(|e| JsError::new(&format!("Template error: {e}")))?;
        self.renderer
            .render_sentence(&template, &self.pool, &mut self.rng)
            .map_err(|e| JsError::new(&format!("Render error: {e}")))
    }

    /// Render several lines. Returns a JSON array of strings.
    pub fn render_lines(&mut self, template: &str, count: usize) -> Result<String, JsError> {
        let template = self
            .renderer
            .parse(template)
            .map_err(|e| JsError::new(&format!("Template error: {e}")))?;
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            let line = self
                .renderer
                .render_sentence(&template, &self.pool, &mut self.rng)
                .map_err(|e| JsError::new(&format!("Render error: {e}")))?;
            lines.push(line);
        }
        serde_json::to_string(&lines)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Render a built-in preset ("character" or "event").
    pub fn render_preset(
        &mut self,
        preset: &str,
        adjectives: usize,
        nouns: usize,
    ) -> Result<String, JsError> {
        let preset: Preset = preset.parse().map_err(|e: String| JsError::new(&e))?;
        let template = preset.template(adjectives, nouns);
        self.renderer
            .render_sentence(&template, &self.pool, &mut self.rng)
            .map_err(|e| JsError::new(&format!("Render error: {e}")))
    }

    /// Return a JSON array of `{name, size}` for every category.
    pub fn categories(&self) -> Result<String, JsError> {
        let info: Vec<CategoryInfo> = self
            .pool
            .categories()
            .into_iter()
            .map(|name| CategoryInfo {
                name: name.to_string(),
                size: self.pool.len(name).unwrap_or(0),
            })
            .collect();
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of available built-in word lists.
    pub fn available_word_lists() -> String {
        serde_json::to_string(&["fantasy", "japanese"]).unwrap_or_else(|_| "[]".to_string())
    }

    /// The loaded word lists as Abulafia tables.
    pub fn abulafia(&self) -> String {
        to_abulafia(&self.pool)
    }

    /// Reseed the generator.
    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl FlavorDemo {
    fn build(sources: &[(&str, &str)], mode: JoinMode, seed: u64) -> Result<FlavorDemo, JsError> {
        let pool = WordPool::from_json_sources(sources.iter().copied())
            .map_err(|e| JsError::new(&format!("Word list error: {e}")))?;
        let renderer = TemplateRenderer::builder()
            .join_mode(mode)
            .build()
            .map_err(|e| JsError::new(&format!("Renderer build error: {e}")))?;
        Ok(FlavorDemo {
            renderer,
            pool,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}
