//! CLI tool for exporting deck specifications to PPTX files.

use anyhow::{Context, Result};
use clap::Parser;
use deckpress_core::PresentationSpec;
use deckpress_media::HttpFetcher;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Export declarative deck specifications (JSON) to PPTX packages.
#[derive(Parser, Debug)]
#[command(name = "deckpress")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input deck specification file(s) (JSON)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let fetcher = HttpFetcher::new();

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &fetcher) {
            Ok(output_path) => {
                if args.verbose {
                    eprintln!("Written to: {}", output_path.display());
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Convert a single specification file and write the package.
fn process_file(input_path: &Path, args: &Args, fetcher: &HttpFetcher) -> Result<PathBuf> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let spec: PresentationSpec = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid deck specification in {}", input_path.display()))?;

    log::debug!(
        "Exporting {} slides as {}",
        spec.slides.len(),
        spec.filename
    );

    let bytes = deckpress_pptx::assemble(&spec, fetcher)
        .with_context(|| format!("Failed to export {}", input_path.display()))?;

    let output_path = get_output_path(input_path, args.output.as_ref())?;
    write_output(&output_path, &bytes)?;

    Ok(output_path)
}

/// Determine the output path for a converted specification.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("deck");

    let output_filename = format!("{}.pptx", stem);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write package bytes to a file.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(bytes)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
