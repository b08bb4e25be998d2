//! Merging and de-duplication of compose file references.

use crate::paths::absolutize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Build the list of files to render.
///
/// `COMPOSE_FILE` entries come first, then `-f` flags, each made absolute
/// against `cwd`. Duplicates keep only their last occurrence.
pub fn composite_file_list(env_files: &[PathBuf], flag_files: &[PathBuf], cwd: &Path) -> Vec<PathBuf> {
    let merged = env_files
        .iter()
        .chain(flag_files)
        .map(|file| absolutize(cwd, file))
        .collect();
    dedupe_last_wins(merged)
}

/// Drop every occurrence of a path except the last, keeping survivor order.
pub fn dedupe_last_wins(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut survivors: Vec<PathBuf> = files
        .into_iter()
        .rev()
        .filter(|file| seen.insert(file.clone()))
        .collect();
    survivors.reverse();
    survivors
}
