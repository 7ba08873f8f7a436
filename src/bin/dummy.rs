//! Single-threaded, allocation-naive reference implementation, ported from
//! `create/dummy.go`. Used only as a trusted baseline the parallel pipeline
//! is differentially tested against (`tests/cli.rs`) — not itself part of
//! the challenge's performance target.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
struct Cli {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Clone, Copy)]
struct Info {
    min: f64,
    max: f64,
    acc: f64,
    count: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let input = File::open(&cli.input).with_context(|| format!("failed to open {}", cli.input.display()))?;
    let mut results: BTreeMap<String, Info> = BTreeMap::new();

    for line in BufReader::new(input).lines() {
        let line = line.context("failed to read input line")?;
        let Some((name, temp_str)) = line.split_once(';') else { continue };
        let temp: f64 = temp_str.parse().with_context(|| format!("malformed temperature for {name}"))?;

        results
            .entry(name.to_string())
            .and_modify(|info| {
                info.min = info.min.min(temp);
                info.max = info.max.max(temp);
                info.acc += temp;
                info.count += 1;
            })
            .or_insert(Info { min: temp, max: temp, acc: temp, count: 1 });
    }

    let output = File::create(&cli.output).with_context(|| format!("failed to create {}", cli.output.display()))?;
    let mut out = BufWriter::new(output);

    writeln!(out, "{{")?;
    for (index, (name, info)) in results.iter().enumerate() {
        if index > 0 {
            writeln!(out, ",")?;
        }
        write!(out, "\t{name}={:.1}/{:.1}/{:.1}", info.min, info.acc / info.count as f64, info.max)?;
    }
    if !results.is_empty() {
        writeln!(out)?;
    }
    writeln!(out, "}}")?;

    Ok(())
}
