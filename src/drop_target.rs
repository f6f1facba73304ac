// src/drop_target.rs
// Terminals report a file dragged onto the window as a bracketed paste of
// its path, quoted or shell-escaped depending on the emulator.
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::filesystem::{normalize_lexically, DirectoryModel};

pub fn decode_dropped_text(text: &str) -> Option<PathBuf> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;

    let unquoted = strip_quotes(line);
    let (raw, is_uri) = match unquoted.strip_prefix("file://") {
        Some(rest) => (rest, true),
        None => (unquoted, false),
    };

    let decoded = if is_uri {
        percent_decode(raw)
    } else if cfg!(windows) || unquoted.len() != line.len() {
        raw.to_string()
    } else {
        unescape_shell(raw)
    };

    if decoded.is_empty() {
        None
    } else {
        Some(PathBuf::from(decoded))
    }
}

/// A dropped directory is used as-is, a dropped file stands for its parent.
pub fn directory_for_drop(path: &Path) -> Option<PathBuf> {
    // A bare file name has an empty parent; anchor it first.
    let path = std::path::absolute(path).ok()?;
    let path = normalize_lexically(&path);
    if path.is_dir() {
        Some(path)
    } else if path.exists() {
        path.parent().map(Path::to_path_buf)
    } else {
        None
    }
}

pub fn on_file_dropped(model: &mut DirectoryModel, text: &str) -> Result<()> {
    let invalid = || Error::InvalidDirectory { path: text.trim().to_string() };
    let dropped = decode_dropped_text(text).ok_or_else(invalid)?;
    let dir = directory_for_drop(&dropped).ok_or_else(invalid)?;
    debug!(dropped = %dropped.display(), dir = %dir.display(), "drop received");
    model.try_change_directory(&dir.to_string_lossy())
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn unescape_shell(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(ch);
    }
    out
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}
