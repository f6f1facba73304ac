// src/filesystem/dir.rs
use std::fmt;

use tracing::debug;

use super::{list_directory, normalize_lexically, resolve_candidate, FileEntry};
use crate::error::{Error, Result};

/// What the shell renders: the path as the user typed it and the listing
/// taken from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    pub path: String,
    pub entries: Vec<FileEntry>,
    /// Bumped on every successful change.
    pub revision: u64,
}

type Subscriber = Box<dyn FnMut(&DirectoryState)>;

#[derive(Default)]
pub struct DirectoryModel {
    state: DirectoryState,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for DirectoryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryModel")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl DirectoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn path(&self) -> &str {
        &self.state.path
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.state.entries
    }

    /// Registers a callback run after every successful directory change.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&DirectoryState) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Switches to `candidate` if it names a readable directory. Anything
    /// else leaves the current state untouched.
    pub fn change_directory(&mut self, candidate: &str) {
        if let Err(err) = self.try_change_directory(candidate) {
            debug!(candidate, error = %err, "directory change ignored");
        }
    }

    /// Like [`change_directory`](Self::change_directory) but reports why a
    /// change was declined.
    pub fn try_change_directory(&mut self, candidate: &str) -> Result<()> {
        let resolved = resolve_candidate(candidate);
        if !resolved.is_dir() {
            return Err(Error::InvalidDirectory { path: candidate.to_string() });
        }

        let entries = list_directory(&resolved)?;
        debug!(path = %resolved.display(), count = entries.len(), "listed directory");

        self.state.path = candidate.to_string();
        self.state.entries = entries;
        self.state.revision += 1;
        self.notify();
        Ok(())
    }

    pub fn navigate_up(&mut self) -> Result<()> {
        if self.state.path.is_empty() {
            return Err(Error::InvalidDirectory { path: String::new() });
        }
        // `..` in the typed path must not count as a level; symlinks stay put.
        let current = normalize_lexically(&resolve_candidate(&self.state.path));
        match current.parent() {
            Some(parent) => {
                let parent = parent.to_string_lossy().to_string();
                self.try_change_directory(&parent)
            }
            None => Err(Error::InvalidDirectory { path: self.state.path.clone() }),
        }
    }

    /// Changes into the entry at `index` when it is a directory.
    pub fn enter(&mut self, index: usize) -> Result<()> {
        let target = match self.state.entries.get(index) {
            Some(entry) if entry.is_dir => entry.path.to_string_lossy().to_string(),
            Some(entry) => return Err(Error::InvalidDirectory { path: entry.name.clone() }),
            None => return Err(Error::InvalidDirectory { path: format!("#{}", index) }),
        };
        self.try_change_directory(&target)
    }

    fn notify(&mut self) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn sample_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("README.md"), "# readme").unwrap();
        fs::write(tmp.path().join("main.go"), "package main").unwrap();
        tmp
    }

    fn path_str(tmp: &TempDir) -> String {
        tmp.path().to_string_lossy().to_string()
    }

    fn listed(model: &DirectoryModel) -> Vec<String> {
        model.entries().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_new_model_is_empty() {
        let model = DirectoryModel::new();
        assert_eq!(model.path(), "");
        assert!(model.entries().is_empty());
        assert_eq!(model.state().revision, 0);
    }

    #[test]
    fn test_change_directory_lists_visible_children() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();

        model.change_directory(&path_str(&tmp));

        assert_eq!(model.path(), path_str(&tmp));
        assert_eq!(listed(&model), vec!["src", "main.go", "README.md"]);
        assert_eq!(model.state().revision, 1);
    }

    #[test]
    fn test_path_keeps_literal_input() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();
        let literal = format!("{}/src/..", path_str(&tmp));

        model.change_directory(&literal);

        assert_eq!(model.path(), literal);
        assert_eq!(listed(&model), vec!["src", "main.go", "README.md"]);
    }

    #[test]
    fn test_invalid_candidates_leave_state_unchanged() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();
        model.change_directory(&path_str(&tmp));
        let before = model.state().clone();

        model.change_directory(&format!("{}/missing", path_str(&tmp)));
        assert_eq!(model.state(), &before);

        model.change_directory(&format!("{}/README.md", path_str(&tmp)));
        assert_eq!(model.state(), &before);

        model.change_directory("");
        assert_eq!(model.state(), &before);
    }

    #[test]
    fn test_try_change_directory_reports_invalid_path() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();
        let file = format!("{}/main.go", path_str(&tmp));

        let err = model.try_change_directory(&file).unwrap_err();
        assert!(matches!(err, Error::InvalidDirectory { ref path } if *path == file));
        assert_eq!(model.path(), "");
    }

    #[test]
    fn test_change_directory_is_idempotent() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();

        model.change_directory(&path_str(&tmp));
        let first = model.entries().to_vec();
        model.change_directory(&path_str(&tmp));

        assert_eq!(model.entries(), first.as_slice());
    }

    #[test]
    fn test_subscribers_see_successful_changes_only() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        model.subscribe(move |state| sink.borrow_mut().push(state.entries.len()));

        model.change_directory(&path_str(&tmp));
        model.change_directory("/definitely/not/here");

        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_enter_and_navigate_up() {
        let tmp = sample_tree();
        fs::write(tmp.path().join("src").join("lib.rs"), "").unwrap();
        let mut model = DirectoryModel::new();
        model.change_directory(&path_str(&tmp));

        model.enter(0).unwrap();
        assert_eq!(listed(&model), vec!["lib.rs"]);

        model.navigate_up().unwrap();
        assert_eq!(listed(&model), vec!["src", "main.go", "README.md"]);
    }

    #[test]
    fn test_navigate_up_folds_dot_dot_in_typed_path() {
        let tmp = sample_tree();
        fs::create_dir(tmp.path().join("src").join("nested")).unwrap();
        let mut model = DirectoryModel::new();
        model.change_directory(&format!("{}/src/nested/..", path_str(&tmp)));
        assert_eq!(listed(&model), vec!["nested"]);

        model.navigate_up().unwrap();
        assert_eq!(model.path(), path_str(&tmp));
    }

    #[cfg(unix)]
    #[test]
    fn test_navigate_up_from_symlinked_directory_returns_to_link_parent() {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("work");
        let real = tmp.path().join("real");
        fs::create_dir(&work).unwrap();
        fs::create_dir_all(real.join("target")).unwrap();
        std::os::unix::fs::symlink(&real, work.join("link")).unwrap();

        let mut model = DirectoryModel::new();
        model.change_directory(&work.to_string_lossy());
        assert_eq!(listed(&model), vec!["link"]);

        model.enter(0).unwrap();
        assert_eq!(listed(&model), vec!["target"]);

        model.navigate_up().unwrap();
        assert_eq!(model.path(), work.to_string_lossy());
        assert_eq!(listed(&model), vec!["link"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_leaves_state_unchanged() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = sample_tree();
        let locked = tmp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut model = DirectoryModel::new();
        model.change_directory(&path_str(&tmp));
        let before = model.state().clone();

        let err = model.try_change_directory(&locked.to_string_lossy()).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(err, Error::ReadDir { .. }));
        assert_eq!(model.state(), &before);
    }

    #[test]
    fn test_enter_file_is_rejected() {
        let tmp = sample_tree();
        let mut model = DirectoryModel::new();
        model.change_directory(&path_str(&tmp));
        let before = model.state().clone();

        assert!(model.enter(1).is_err());
        assert!(model.enter(42).is_err());
        assert_eq!(model.state(), &before);
    }

    #[test]
    fn test_navigate_up_from_empty_model_fails() {
        let mut model = DirectoryModel::new();
        assert!(model.navigate_up().is_err());
    }
}
