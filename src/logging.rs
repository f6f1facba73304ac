// src/logging.rs
use std::env;
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Registry};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const FILTER_ENV_VAR: &str = "FILELIST_LOG";
const FILE_ENV_VAR: &str = "FILELIST_LOG_FILE";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// The terminal belongs to the UI; only a log file may be written.
    Tui,
    Stderr,
}

pub fn init(target: Target, verbose: bool) {
    let registry = Registry::default().with(build_filter(verbose));
    let file = build_file_writer();

    match (target, file) {
        (_, Some((writer, guard))) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(writer);
            let _ = registry.with(file_layer).try_init();
            let _ = FILE_GUARD.set(guard);
        }
        (Target::Stderr, None) => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr);
            let _ = registry.with(stderr_layer).try_init();
        }
        (Target::Tui, None) => {}
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    match env::var(FILTER_ENV_VAR) {
        Ok(value) => EnvFilter::new(value),
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("info"),
    }
}

fn build_file_writer() -> Option<(NonBlocking, WorkerGuard)> {
    let file_path = env::var(FILE_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())?;

    let path = Path::new(&file_path);
    let file_name = path.file_name()?.to_string_lossy().to_string();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let appender = tracing_appender::rolling::never(dir, file_name);
    Some(tracing_appender::non_blocking(appender))
}
