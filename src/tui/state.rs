use crate::model::ResumeFile;
use crate::orchestrator::Session;
use ratatui::{
    style::Color,
    style::Style,
    text::{Line, Span},
};
use std::path::Path;
use std::time::Instant;

pub struct UiState {
    pub tab: usize,
    pub info: String,
    pub session: Session,
    pub base_url: String,
    pub export_path: Option<std::path::PathBuf>,

    // Resume path input
    pub path_input: String,
    pub path_editing: bool,
    // --resume, selected once the first role arrives
    pub preselect: Option<std::path::PathBuf>,

    pub last_exported_path: Option<String>,
    // Drives the spinner animation
    pub started: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            info: String::new(),
            session: Session::default(),
            base_url: String::new(),
            export_path: None,
            path_input: String::new(),
            path_editing: false,
            preselect: None,
            last_exported_path: None,
            started: Instant::now(),
        }
    }
}

impl UiState {
    /// Load a resume from disk and select it. Rejections leave the previous
    /// selection in place.
    pub fn load_resume(&mut self, path: &Path) {
        match ResumeFile::load(path) {
            Ok(file) => {
                self.info = format!("Selected: {} ({} KB)", file.name, file.contents.len() / 1024);
                self.session.select_resume(file);
            }
            Err(e) => {
                self.info = format!("Resume rejected: {e:#}");
            }
        }
    }

    pub fn spinner(&self) -> &'static str {
        const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        FRAMES[(self.started.elapsed().as_millis() / 100) as usize % FRAMES.len()]
    }
}

pub fn push_wrapped_status_kv(
    out: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    status_area_width: u16,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    // Account for borders (2 chars on each side)
    let usable_width = status_area_width.saturating_sub(4).max(1);
    let label_text = format!("{label}:");
    let label_width = label_text.chars().count() as u16;

    let value_chars: Vec<char> = value.chars().collect();
    let mut remaining = value_chars.as_slice();
    let mut first = true;

    while !remaining.is_empty() {
        let line_width = if first {
            usable_width.saturating_sub(label_width + 1).max(1)
        } else {
            usable_width.saturating_sub(2).max(1)
        };

        let chars_to_take = remaining.len().min(line_width as usize);
        let (line_chars, rest) = remaining.split_at(chars_to_take);
        let line_text: String = line_chars.iter().collect();

        if first {
            out.push(Line::from(vec![
                Span::styled(label_text.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(line_text),
            ]));
            first = false;
        } else {
            out.push(Line::from(vec![Span::raw("  "), Span::raw(line_text)]));
        }

        remaining = rest;
    }
}
