// src/filesystem/mod.rs
pub mod dir;
pub mod file;

pub use dir::{DirectoryModel, DirectoryState};
pub use file::FileEntry;

use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Directories before files, then case-insensitive name order.
pub fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

/// Turns user input into a filesystem path. A leading `~` is the home
/// directory; anything relative is taken from the working directory.
pub fn resolve_candidate(candidate: &str) -> PathBuf {
    let expanded = match candidate.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => {
            match dirs::home_dir() {
                Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
                None => PathBuf::from(candidate),
            }
        }
        _ => PathBuf::from(candidate),
    };

    if expanded.as_os_str().is_empty() {
        return expanded;
    }
    std::path::absolute(&expanded).unwrap_or(expanded)
}

/// Drops `.` and folds `..` into its parent without touching the
/// filesystem, so symlinked directories are not resolved.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Reads the direct, non-hidden children of `dir` in display order.
///
/// Fails only when `dir` itself cannot be read. Children that cannot be
/// inspected are skipped.
pub fn list_directory(dir: &Path) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(Error::ReadDir { path: dir.to_path_buf(), source: err });
            }
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        if let Some(file_entry) = FileEntry::from_walk_entry(&entry) {
            if file_entry.is_hidden { continue; }
            entries.push(file_entry);
        }
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}
