//! Chunk file name normalization
//!
//! Older splitter runs produced `name.wav.chunk3` files; the rest of the
//! tooling expects `name.chunk3.wav`. This module finds the old-style
//! names in a directory and rewrites them.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use walkdir::WalkDir;

use crate::error::{Result, WavechunkError};

/// One rename, performed or planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Rename `<stem>.wav.chunk<N>` files in `dir` to `<stem>.chunk<N>.wav`.
///
/// Only the directory itself is scanned, not subdirectories. With
/// `prefix` set, only file names starting with it are considered. In
/// dry-run mode the renames are returned without touching anything.
pub fn normalize_chunk_names(
    dir: &Path,
    prefix: Option<&str>,
    dry_run: bool,
) -> Result<Vec<Rename>> {
    if !dir.is_dir() {
        return Err(WavechunkError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut renames = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| WavechunkError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some(prefix) = prefix {
            if !name.starts_with(prefix) {
                continue;
            }
        }
        let Some(new_name) = normalized_name(name) else {
            continue;
        };

        let rename = Rename {
            from: entry.path().to_path_buf(),
            to: dir.join(new_name),
        };
        info!("{} -> {}", rename.from.display(), rename.to.display());

        if !dry_run {
            fs::rename(&rename.from, &rename.to)?;
        }
        renames.push(rename);
    }

    Ok(renames)
}

/// `talk.wav.chunk3` becomes `talk.chunk3.wav`; anything else is left
/// alone.
fn normalized_name(name: &str) -> Option<String> {
    let (stem, chunk) = name.split_once(".wav.chunk")?;
    if chunk.is_empty() || !chunk.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{stem}.chunk{chunk}.wav"))
}
