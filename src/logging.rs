//! Diagnostic logging set-up.
//!
//! The TUI owns stdout, so in that mode logs go to a file; headless modes log
//! to stderr.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `<data_local_dir>/smart-screen-cli/smart-screen.log`, falling back to the
/// working directory when no data dir is known.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("smart-screen-cli"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smart-screen.log")
}

/// `RUST_LOG` wins; otherwise `default`.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

/// Install the global subscriber. Stderr logging defaults to `warn` so it
/// does not drown headless output; the log file gets `info`.
pub fn init(target: LogTarget) -> Result<()> {
    let res = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter("warn"))
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter("info"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    res.map_err(|e| anyhow::anyhow!("initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_path_names_the_app() {
        let p = default_log_path();
        assert_eq!(p.file_name().unwrap(), "smart-screen.log");
        assert_eq!(p.parent().unwrap().file_name().unwrap(), "smart-screen-cli");
    }

    #[test]
    fn log_file_parent_is_created() {
        let dir = std::env::temp_dir().join(format!("smart-screen-log-{}", std::process::id()));
        let path = dir.join("logs").join("app.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
