//! Input resolution
//!
//! Expands source patterns into existing files. Missing literal paths and
//! patterns without matches are warned about and skipped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::Result;

/// Resolve patterns into a de-duplicated file list, in pattern order
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        for path in expand(pattern)? {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob(pattern) {
        let path = Path::new(pattern);
        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }
        warn!("Source file \"{}\" not found.", pattern);
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => warn!("Cannot read {}: {}", e.path().display(), e.error()),
        }
    }

    if matches.is_empty() {
        warn!("Pattern \"{}\" matched no files.", pattern);
    }

    Ok(matches)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
