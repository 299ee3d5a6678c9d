//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::cmp::Ordering;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;

use crate::chunks::normalize_chunk_names;
use crate::error::{Result, WavechunkError};
use crate::merge::{concat_wavs, plan_merges};
use crate::revision::{ParseMode, Revision};
use crate::split::{split_wav, SplitConfig};
use crate::timecode::Timecode;

/// Split a recording into chunk files at silence boundaries.
pub fn split(
    input: &Path,
    threshold: f64,
    min_secs: f64,
    max_secs: f64,
    print_levels: bool,
) -> Result<()> {
    info!("Splitting: {}", input.display());

    let config = SplitConfig {
        threshold,
        min_chunk_secs: min_secs,
        max_chunk_secs: max_secs,
        ..SplitConfig::default()
    };
    let outcome = split_wav(input, &config)?;

    if print_levels {
        let rendered: Vec<String> = outcome
            .block_levels
            .iter()
            .map(|l| format!("{:.0}", l * 1000.0))
            .collect();
        println!("{}", rendered.join(" "));
    }

    for chunk in &outcome.chunks {
        println!("{} ({})", chunk.path.display(), chunk.duration);
    }
    println!("{} chunks written", outcome.chunks.len());

    Ok(())
}

/// Concatenate WAV files; the last path is the output.
pub fn merge(files: &[PathBuf]) -> Result<()> {
    let (output, inputs) = files.split_last().ok_or_else(|| {
        WavechunkError::invalid_input("usage: merge a1.wav a2.wav ... out.wav")
    })?;

    info!("Merging {} files into {}", inputs.len(), output.display());

    let total = concat_wavs(inputs, output)?;
    println!("{} is {:.2} seconds", output.display(), total.as_seconds());

    Ok(())
}

/// Plan chunk merges from a duration inventory.
pub fn plan(durations: &[String], window_secs: f64, json: bool) -> Result<()> {
    let stamps = if durations.is_empty() {
        read_stamps_from_stdin()?
    } else {
        durations.to_vec()
    };

    let parsed: Vec<Timecode> = stamps
        .iter()
        .map(|s| Timecode::parse(s))
        .collect::<Result<_>>()?;

    let window = Timecode::from_seconds(window_secs)?;
    let merge_plan = plan_merges(&parsed, window);

    if json {
        println!("{}", serde_json::to_string_pretty(&merge_plan)?);
        return Ok(());
    }

    for (i, set) in merge_plan.sets.iter().enumerate() {
        let members: Vec<String> = set.durations.iter().map(Timecode::to_string).collect();
        println!("set {}: {} [{}]", i, set.total, members.join(", "));
    }

    Ok(())
}

fn read_stamps_from_stdin() -> Result<Vec<String>> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Rename old-style chunk files in a directory.
pub fn rename_chunks(dir: &Path, prefix: Option<&str>, dry_run: bool) -> Result<()> {
    info!("Normalizing chunk names in: {}", dir.display());

    let renames = normalize_chunk_names(dir, prefix, dry_run)?;

    for rename in &renames {
        println!("{} -> {}", rename.from.display(), rename.to.display());
    }
    if dry_run {
        println!("{} renames planned (dry run)", renames.len());
    } else {
        println!("{} files renamed", renames.len());
    }

    Ok(())
}

/// Compare two dotted version numbers and print `<`, `=`, or `>`.
pub fn compare(a: &str, b: &str, strict: bool) -> Result<()> {
    let mode = if strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let left = Revision::parse_with(a, mode)?;
    let right = Revision::parse_with(b, mode)?;

    let symbol = match left.compare(&right) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    println!("{left} {symbol} {right}");

    Ok(())
}
