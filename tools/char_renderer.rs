/// Character Renderer: renders a template against word lists.
///
/// Usage: char_renderer <files> [<template>] [--number N] [--unspaced]
///                      [--preset character|event] [--seed N] [--config <file.ron>]
///
/// Template keywords begin with a colon (`:jj`, `:person`, `:loc`, `:event`,
/// `:item`, `:name`, or any category in the word lists). `:!` capitalizes
/// the word; `@` instead of `:` keeps the word from repeating within a line.
use clap::Parser;
use flavor_text::core::pool::WordPool;
use flavor_text::core::presets::Preset;
use flavor_text::core::renderer::TemplateRenderer;
use flavor_text::schema::syntax::JoinMode;
use log::info;
use std::io::{self, Write};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "char_renderer", version, about = "Render flavor text from word lists")]
struct Args {
    /// Word-list JSON files, comma separated.
    files: String,

    /// Template to render. Required unless --preset is given.
    template: Option<String>,

    /// How many times to render the template.
    #[arg(short, long, default_value_t = 1)]
    number: usize,

    /// Join words without spaces, for languages that do not use them.
    #[arg(short, long)]
    unspaced: bool,

    /// Use a built-in template: character or event.
    #[arg(short, long, conflicts_with = "template")]
    preset: Option<Preset>,

    /// Adjectives per noun group when using a preset.
    #[arg(short, long, default_value_t = 3)]
    adjectives: usize,

    /// Nouns per noun group when using a preset.
    #[arg(long, default_value_t = 1)]
    nouns: usize,

    /// Seed for reproducible output. Random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Renderer configuration (aliases, sigils, joiner) in RON.
    #[arg(short, long)]
    config: Option<String>,

    /// Only check the template against the word lists.
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let pool = WordPool::load_file_list(&args.files)?;
    info!("word pool has {} categories", pool.categories().len());

    let mut builder = TemplateRenderer::builder();
    if let Some(ref path) = args.config {
        builder = builder.config_file(path);
    }
    if args.unspaced {
        builder = builder.join_mode(JoinMode::Unspaced);
    }
    let renderer = builder.build()?;

    let template = match (&args.preset, &args.template) {
        (Some(preset), _) => {
            info!("using preset {}", preset.name());
            preset.template(args.adjectives, args.nouns)
        }
        (None, Some(text)) => renderer.parse(text)?,
        (None, None) => return Err("a template or --preset is required".into()),
    };

    template.require_categories(&pool, renderer.aliases())?;
    if args.check {
        println!("Template OK ({} tokens)", template.tokens.len());
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);

    let lines = renderer.render_many(&template, &pool, args.number, seed)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
