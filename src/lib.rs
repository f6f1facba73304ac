pub mod app;
pub mod config;
pub mod drop_target;
pub mod editor;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod output;
pub mod picker;
pub mod tui;
pub mod ui;
pub mod utils;

pub use error::{Error, Result};
pub use filesystem::{DirectoryModel, DirectoryState, FileEntry};
