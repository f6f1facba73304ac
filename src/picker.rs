// src/picker.rs
// Folder chooser shown over the listing. Only directories are offered.
use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::filesystem::{list_directory, resolve_candidate, FileEntry};

#[derive(Debug, Clone)]
pub struct DirectoryPicker {
    pub current: PathBuf,
    pub dirs: Vec<FileEntry>,
    pub selected: usize,
}

impl DirectoryPicker {
    /// Starts at `initial` when it is a directory, else at the working
    /// directory.
    pub fn open(initial: &str) -> Self {
        let resolved = resolve_candidate(initial);
        let start = if resolved.is_dir() {
            resolved
        } else {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        };

        let mut picker = DirectoryPicker { current: start.clone(), dirs: Vec::new(), selected: 0 };
        if let Err(err) = picker.load(start) {
            debug!(error = %err, "picker could not list start directory");
        }
        picker
    }

    fn load(&mut self, dir: PathBuf) -> Result<()> {
        let dirs = list_directory(&dir)?
            .into_iter()
            .filter(|e| e.is_dir)
            .collect();
        self.current = dir;
        self.dirs = dirs;
        self.selected = 0;
        Ok(())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.dirs.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn highlighted(&self) -> Option<&FileEntry> {
        self.dirs.get(self.selected)
    }

    pub fn descend(&mut self) -> Result<()> {
        match self.highlighted().map(|e| e.path.clone()) {
            Some(path) => self.load(path),
            None => Ok(()),
        }
    }

    /// Moves to the parent and highlights the directory we came from.
    pub fn ascend(&mut self) -> Result<()> {
        let Some(parent) = self.current.parent().map(PathBuf::from) else {
            return Ok(());
        };
        let came_from = self.current.clone();
        self.load(parent)?;
        if let Some(index) = self.dirs.iter().position(|e| e.path == came_from) {
            self.selected = index;
        }
        Ok(())
    }

    /// The highlighted directory, or the one being browsed when it has no
    /// sub-directories.
    pub fn confirm(&self) -> Option<String> {
        let path = match self.highlighted() {
            Some(entry) => &entry.path,
            None => &self.current,
        };
        Some(path.to_string_lossy().to_string())
    }

    pub fn confirm_current(&self) -> Option<String> {
        Some(self.current.to_string_lossy().to_string())
    }
}
