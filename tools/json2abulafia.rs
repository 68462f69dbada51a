/// json2abulafia: converts word-list JSON into Abulafia random tables.
///
/// Usage: json2abulafia [<file.json>...]
///
/// Reads standard input when no files are given. Multiple files are merged.
use clap::Parser;
use flavor_text::core::export::to_abulafia;
use flavor_text::core::pool::WordPool;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "json2abulafia", version, about = "Convert word lists to Abulafia tables")]
struct Args {
    /// Word-list JSON files. Standard input when omitted.
    files: Vec<PathBuf>,
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
    let pool = if args.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        WordPool::from_json_sources([("<stdin>", input.as_str())])?
    } else {
        WordPool::load_json_files(&args.files)?
    };

    io::stdout().write_all(to_abulafia(&pool).as_bytes())?;
    Ok(())
}
