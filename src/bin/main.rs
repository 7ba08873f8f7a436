use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

/// Computes per-station min/mean/max temperatures from a `station;temperature` file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the input measurements file.
    input: PathBuf,

    /// Path the report is written to.
    output: PathBuf,

    /// Accepted for compatibility with the original tool's CLI; has no
    /// effect beyond an extra timing line on stderr.
    profile: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let begin = Instant::now();

    let workers = onebrc_core::run(&cli.input, &cli.output)
        .with_context(|| format!("failed to process {}", cli.input.display()))?;

    eprintln!("split across {workers} worker(s), took {:?}", begin.elapsed());
    if cli.profile.is_some() {
        eprintln!("profile flag accepted, no profiler wired up");
    }

    Ok(())
}
