// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "filelist";
const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "FILELIST_CONFIG_PATH";
const DEFAULT_DIR_ICON: &str = "📁";
const DEFAULT_FILE_ICON: &str = "📄";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    start_dir: Option<String>,
    dir_icon: Option<String>,
    file_icon: Option<String>,
    report_invalid_paths: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory listed at startup. Empty means the working directory.
    pub start_dir: String,
    pub dir_icon: String,
    pub file_icon: String,
    /// Show why a path was rejected instead of ignoring it silently.
    pub report_invalid_paths: bool,
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_dir: String::new(),
            dir_icon: DEFAULT_DIR_ICON.to_string(),
            file_icon: DEFAULT_FILE_ICON.to_string(),
            report_invalid_paths: false,
            config_path: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub start_dir: Option<String>,
    pub report_invalid_paths: Option<bool>,
}

pub fn load(config_path_override: Option<PathBuf>, overrides: Overrides) -> Result<Config> {
    let (config_path, required) = match config_path_override {
        Some(path) => (Some(path), true),
        None => match config_path_from_env()? {
            Some(path) => (Some(path), true),
            None => (default_config_path(), false),
        },
    };

    let file_config = match config_path.as_deref() {
        Some(path) => read_config_file(path, required)?,
        None => FileConfig::default(),
    };

    let defaults = Config::default();
    Ok(Config {
        start_dir: overrides
            .start_dir
            .or(file_config.start_dir)
            .unwrap_or(defaults.start_dir),
        dir_icon: file_config.dir_icon.unwrap_or(defaults.dir_icon),
        file_icon: file_config.file_icon.unwrap_or(defaults.file_icon),
        report_invalid_paths: overrides
            .report_invalid_paths
            .or(file_config.report_invalid_paths)
            .unwrap_or(defaults.report_invalid_paths),
        config_path,
    })
}

fn read_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() {
        if required {
            return Err(Error::Config(format!("config file not found at {}", path.display())));
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}

fn config_path_from_env() -> Result<Option<PathBuf>> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) if value.is_empty() => {
            Err(Error::Config(format!("{} is set but empty", CONFIG_ENV_VAR)))
        }
        Some(value) => Ok(Some(PathBuf::from(value))),
        None => Ok(None),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
