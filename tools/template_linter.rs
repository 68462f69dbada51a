/// Template Linter: checks templates against word lists before rendering.
///
/// Usage: template_linter <files> <template>... [--config <file.ron>]
///
/// Reports category references that resolve to nothing (errors), unique
/// references that ask for more words than a category holds (errors), and
/// categories referenced but empty (warnings).
use clap::Parser;
use flavor_text::core::pool::WordPool;
use flavor_text::core::renderer::TemplateRenderer;
use flavor_text::core::template::Template;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "template_linter", version, about = "Check templates against word lists")]
struct Args {
    /// Word-list JSON files, comma separated.
    files: String,

    /// Templates to check.
    #[arg(required = true)]
    templates: Vec<String>,

    /// Renderer configuration (aliases, sigils) in RON.
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let pool = match WordPool::load_file_list(&args.files) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("ERROR: Failed to load word lists: {}", e);
            process::exit(1);
        }
    };

    let mut builder = TemplateRenderer::builder();
    if let Some(ref path) = args.config {
        builder = builder.config_file(path);
    }
    let renderer = match builder.build() {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("Loaded {} categories", pool.categories().len());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for text in &args.templates {
        match renderer.parse(text) {
            Ok(template) => lint_template(text, &template, &pool, &renderer, &mut errors, &mut warnings),
            Err(e) => errors.push(format!("'{}': {}", text, e)),
        }
    }

    println!("\n=== Template Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn lint_template(
    text: &str,
    template: &Template,
    pool: &WordPool,
    renderer: &TemplateRenderer,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let aliases = renderer.aliases();

    for key in template.validate(pool, aliases) {
        errors.push(format!("'{}' references unknown category '{}'", text, key));
    }

    for (category, wanted) in template.unique_demand(pool, aliases) {
        if let Some(available) = pool.len(&category) {
            if wanted > available {
                errors.push(format!(
                    "'{}' makes {} unique picks from '{}', which has only {} words",
                    text, wanted, category, available
                ));
            }
        }
    }

    for r in template.category_refs() {
        let category = aliases.resolve(&r.key, |k| pool.contains(k));
        if pool.len(category) == Some(0) {
            let warning = format!("'{}' references empty category '{}'", text, category);
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
    }
}
