//! cembed - Generate C headers that embed binary files
//!
//! Each source file becomes a `const unsigned char` array literal inside an
//! include-guarded header, ready to be compiled into a C or C++ program.

use anyhow::{Context, Result};
use cembed_core::{EmbedConfig, Embedder};
use clap::{Args, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// Generate C headers that embed binary files as byte arrays
#[derive(Parser, Debug)]
#[command(name = "cembed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sort directory entries by name instead of filesystem order
    #[arg(long)]
    sorted: bool,

    /// Number of bytes per array line
    #[arg(long, default_value_t = cembed_core::embed::DEFAULT_BYTES_PER_LINE)]
    bytes_per_line: usize,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
struct InputMode {
    /// Generate an embed header for each file
    #[arg(short, long, num_args = 1..)]
    file: Vec<PathBuf>,

    /// Generate an embed header for every file of each directory
    #[arg(short, long, num_args = 1..)]
    directory: Vec<PathBuf>,

    /// Generate one combined embed header per directory
    #[arg(short, long, num_args = 1..)]
    combine: Vec<PathBuf>,
}

/// Counts of what a run produced
#[derive(Debug, Default)]
struct RunStats {
    generated: usize,
    failed: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let config = EmbedConfig::new()
        .bytes_per_line(cli.bytes_per_line)
        .sorted(cli.sorted);
    let embedder = Embedder::with_config(config).context("Invalid configuration")?;

    let stats = run(&embedder, &cli.input);

    info!(
        "Summary: {} header(s) generated, {} failure(s)",
        stats.generated, stats.failed
    );

    Ok(())
}

/// Processes every requested path, continuing past failures
fn run(embedder: &Embedder, input: &InputMode) -> RunStats {
    let mut stats = RunStats::default();

    for file in &input.file {
        embed_file(embedder, file, &mut stats);
    }
    for directory in &input.directory {
        embed_directory(embedder, directory, &mut stats);
    }
    for directory in &input.combine {
        embed_combine(embedder, directory, &mut stats);
    }

    stats
}

fn embed_file(embedder: &Embedder, path: &Path, stats: &mut RunStats) {
    debug!("Embedding file: {}", path.display());
    match embedder.embed_file(path) {
        Ok(output) => {
            println!("Generated {}", output.display());
            stats.generated += 1;
        }
        Err(e) => {
            error!("{}", e);
            stats.failed += 1;
        }
    }
}

fn embed_directory(embedder: &Embedder, directory: &Path, stats: &mut RunStats) {
    debug!("Embedding directory: {}", directory.display());
    match embedder.embed_directory(directory) {
        Ok(report) => {
            for output in &report.generated {
                println!("Generated {}", output.display());
            }
            for (path, e) in &report.failures {
                error!("Skipped {}: {}", path.display(), e);
            }
            stats.generated += report.generated.len();
            stats.failed += report.failures.len();
        }
        Err(e) => {
            error!("{}", e);
            stats.failed += 1;
        }
    }
}

fn embed_combine(embedder: &Embedder, directory: &Path, stats: &mut RunStats) {
    debug!("Combining directory: {}", directory.display());
    match embedder.embed_combine(directory) {
        Ok(report) => {
            println!("Generated {}", report.output.display());
            stats.generated += 1;
        }
        Err(e) => {
            error!("{}", e);
            stats.failed += 1;
        }
    }
}
