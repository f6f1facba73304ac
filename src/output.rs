// src/output.rs
// One-shot listing for `--list`, without the terminal UI.
use colored::Colorize;
use serde::Serialize;

use crate::error::Result;
use crate::filesystem::{DirectoryState, FileEntry};

#[derive(Serialize)]
struct Listing<'a> {
    path: &'a str,
    entries: &'a [FileEntry],
}

pub fn render_text(state: &DirectoryState, color: bool) -> String {
    let mut out = String::new();
    for entry in &state.entries {
        let line = match (entry.is_dir, color) {
            (true, true) => format!("{}/", entry.name).blue().bold().to_string(),
            (true, false) => format!("{}/", entry.name),
            (false, _) => entry.name.clone(),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_json(state: &DirectoryState) -> Result<String> {
    let listing = Listing { path: &state.path, entries: &state.entries };
    Ok(serde_json::to_string_pretty(&listing)?)
}
