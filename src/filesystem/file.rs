// src/filesystem/file.rs
use std::fs::{self, Metadata};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One child of a listed directory. A snapshot: it is not refreshed if the
/// file changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub is_hidden: bool,
}

impl FileEntry {
    pub fn from_walk_entry(entry: &walkdir::DirEntry) -> Option<Self> {
        let path = entry.path();
        // Follow links so a link to a directory lists as one; a dangling
        // link falls back to its own metadata and shows as a file.
        let metadata = fs::metadata(path)
            .or_else(|_| fs::symlink_metadata(path))
            .ok()?;
        let name = entry.file_name().to_string_lossy().to_string();
        let is_hidden = is_hidden(&name, &metadata);
        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        Some(FileEntry {
            name,
            path: path.to_path_buf(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified,
            is_hidden,
        })
    }
}

pub fn is_hidden(name: &str, metadata: &Metadata) -> bool {
    name.starts_with('.') || has_hidden_attribute(metadata)
}

#[cfg(windows)]
fn has_hidden_attribute(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn has_hidden_attribute(_metadata: &Metadata) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    fn walk_one(dir: &std::path::Path) -> FileEntry {
        let entry = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .next()
            .unwrap()
            .unwrap();
        FileEntry::from_walk_entry(&entry).unwrap()
    }

    #[test]
    fn test_file_entry_from_walk_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "hello").unwrap();

        let entry = walk_one(tmp.path());
        assert_eq!(entry.name, "notes.txt");
        assert!(!entry.is_dir);
        assert!(!entry.is_hidden);
        assert_eq!(entry.size, 5);
        assert!(entry.modified.is_some());
        assert_eq!(entry.path, tmp.path().join("notes.txt"));
    }

    #[test]
    fn test_dot_prefix_is_hidden() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".cache")).unwrap();

        let entry = walk_one(tmp.path());
        assert!(entry.is_dir);
        assert!(entry.is_hidden);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_directory() {
        let tmp = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        std::os::unix::fs::symlink(target.path(), tmp.path().join("link")).unwrap();

        let entry = walk_one(tmp.path());
        assert!(entry.is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_file() {
        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("broken")).unwrap();

        let entry = walk_one(tmp.path());
        assert_eq!(entry.name, "broken");
        assert!(!entry.is_dir);
    }
}
