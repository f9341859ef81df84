//! Post-screening processing.
//!
//! Handles exports after a screening completes.

use crate::model::ScreeningRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Result of post-screening processing, ready for presentation layers.
pub(crate) struct ProcessedScreening {
    pub record: ScreeningRecord,
    pub export_messages: Vec<String>,
}

/// Write a record as pretty JSON, creating parent directories as needed.
pub(crate) fn export_json(path: &Path, record: &ScreeningRecord) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let body = serde_json::to_vec_pretty(record).context("serialize screening record")?;
    std::fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Process a completed screening: run the configured export, if any.
pub(crate) fn process_screening(
    export_path: Option<&Path>,
    record: ScreeningRecord,
) -> ProcessedScreening {
    let mut export_messages = Vec::new();
    if let Some(path) = export_path {
        match export_json(path, &record) {
            Ok(()) => export_messages.push(format!("Exported JSON: {}", path.display())),
            Err(e) => export_messages.push(format!("Export JSON failed: {e:#}")),
        }
    }
    ProcessedScreening {
        record,
        export_messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{sample_result, sample_role};

    fn record() -> ScreeningRecord {
        ScreeningRecord::new(
            "http://127.0.0.1:8000",
            "resume.pdf",
            &sample_role("Backend Engineer"),
            &sample_result("Interview Scheduled"),
        )
    }

    #[test]
    fn exports_record_when_path_given() {
        let dir = std::env::temp_dir().join(format!("smart-screen-export-{}", std::process::id()));
        let path = dir.join("nested").join("screening.json");

        let processed = process_screening(Some(&path), record());
        assert_eq!(processed.export_messages.len(), 1);
        assert!(processed.export_messages[0].starts_with("Exported JSON"));

        let back: ScreeningRecord =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.role.role, "Backend Engineer");
        assert_eq!(back.verdict, crate::model::Verdict::Recommended);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn no_export_without_path() {
        let processed = process_screening(None, record());
        assert!(processed.export_messages.is_empty());
        assert_eq!(processed.record.resume_name, "resume.pdf");
    }
}
