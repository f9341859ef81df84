use crate::model::ScreeningRecord;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

use super::state::UiState;

// Clipboard worker channel, started on first copy
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// `smart-screen-<timestamp>-<resume stem>.json`, safe for common filesystems.
fn export_file_name(record: &ScreeningRecord) -> String {
    let stem = Path::new(&record.resume_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");
    let stem: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(32)
        .collect();
    format!(
        "smart-screen-{}-{}.json",
        record.timestamp_utc.replace(':', "-").replace('T', "_"),
        stem
    )
}

fn export_record_to(dir: &Path, record: &ScreeningRecord) -> Result<PathBuf> {
    let path = dir.join(export_file_name(record));
    crate::orchestrator::export_json(&path, record)?;
    Ok(path)
}

/// Export the current screening to the working directory.
/// Returns the absolute path of the exported file.
pub fn export_result_json(state: &UiState) -> Result<PathBuf> {
    let record = state
        .session
        .record(&state.base_url)
        .ok_or_else(|| anyhow::anyhow!("no completed screening to export"))?;
    let current_dir = std::env::current_dir().context("get current directory")?;
    export_record_to(&current_dir, &record)
}

fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    // X11/Wayland managers read lazily; keep the owner alive a while
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Queue text for the clipboard worker. Returns without waiting for the copy.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}
