//! untoc CLI - document outline inference tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use untoc::{extract_outline_with_options, ExtractOptions, Outline, SpanDocument};

#[derive(Parser)]
#[command(name = "untoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer a document outline from span dump JSON", long_about = None)]
struct Cli {
    /// Input span dump (JSON file, or a directory of them)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer the outline of one span dump or a directory of them
    Outline {
        /// Input span dump (JSON file, or a directory of them)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (single input) or directory (batch); stdout if not specified
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Disable parallel page processing
        #[arg(long)]
        sequential: bool,

        /// Worker pool size cap (0 = auto)
        #[arg(long, default_value = "0")]
        workers: usize,

        /// Page count above which the sampled fast path is used upfront
        #[arg(long, default_value = "50")]
        fast_threshold: usize,

        /// Soft deadline in milliseconds before remaining pages fall back
        /// to the fast path
        #[arg(long, default_value = "8000")]
        soft_deadline_ms: u64,
    },

    /// Show span dump statistics and the inferred title
    Info {
        /// Input span dump JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
            sequential,
            workers,
            fast_threshold,
            soft_deadline_ms,
        }) => {
            let options = build_options(sequential, workers, fast_threshold, soft_deadline_ms);
            cmd_outline(&input, output.as_deref(), compact, &options)
        }
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: infer the outline if input is provided
            if let Some(input) = cli.input {
                let options = ExtractOptions::default();
                cmd_outline(&input, cli.output.as_deref(), false, &options)
            } else {
                println!("{}", "Usage: untoc <INPUT> [OUTPUT]".yellow());
                println!("       untoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(
    sequential: bool,
    workers: usize,
    fast_threshold: usize,
    soft_deadline_ms: u64,
) -> ExtractOptions {
    let mut options = ExtractOptions::new()
        .with_max_workers(workers)
        .with_fast_page_threshold(fast_threshold)
        .with_soft_deadline(Duration::from_millis(soft_deadline_ms));
    if sequential {
        options = options.sequential();
    }
    options
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if input.is_dir() {
        return cmd_outline_batch(input, output, compact, options);
    }

    let outline = process_file(input, options)?;
    let json = outline.to_json(!compact)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_outline_batch(
    input_dir: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    if entries.is_empty() {
        return Err(format!("no .json span dumps in {}", input_dir.display()).into());
    }

    let mut failures = 0usize;
    for path in &entries {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let target = output_dir.join(format!("{stem}.outline.json"));
        match process_file(path, options) {
            Ok(outline) => {
                fs::write(&target, outline.to_json(!compact)?)?;
                println!(
                    "{} {} ({} headings)",
                    "Processed".green(),
                    path.display(),
                    outline.outline.len()
                );
            }
            Err(e) => {
                // One bad dump never aborts the batch.
                eprintln!("{} {}: {}", "Skipped".yellow(), path.display(), e);
                failures += 1;
            }
        }
    }

    println!(
        "\n{} {} of {} files",
        "Done!".green().bold(),
        entries.len() - failures,
        entries.len()
    );

    Ok(())
}

/// Decode one span dump and infer its outline.
///
/// When no title can be inferred from the content, the input file stem
/// stands in for it.
fn process_file(
    input: &Path,
    options: &ExtractOptions,
) -> Result<Outline, Box<dyn std::error::Error>> {
    let file = fs::File::open(input)?;
    let doc = SpanDocument::from_json_reader(std::io::BufReader::new(file))?;

    let mut outline = extract_outline_with_options(&doc, options.clone());
    if outline.title == "Untitled" {
        if let Some(stem) = input.file_stem() {
            outline.title = stem.to_string_lossy().into_owned();
        }
    }
    Ok(outline)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::File::open(input)?;
    let doc = SpanDocument::from_json_reader(std::io::BufReader::new(file))?;
    let outline = extract_outline_with_options(&doc, ExtractOptions::default());

    println!("{}", "Span Dump Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Spans".bold(), doc.all_spans().count());
    println!("{}: {}", "Title".bold(), outline.title);
    println!("{}: {}", "Headings".bold(), outline.outline.len());

    let mut by_level: Vec<(String, usize)> = Vec::new();
    for entry in &outline.outline {
        let name = entry.level.as_str().to_string();
        match by_level.iter_mut().find(|(n, _)| *n == name) {
            Some((_, count)) => *count += 1,
            None => by_level.push((name, 1)),
        }
    }
    for (name, count) in by_level {
        println!("  {} {}: {}", "├─".dimmed(), name, count);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline inference tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/untoc".dimmed());
    println!("License: MIT");
}
