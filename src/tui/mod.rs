mod export;
mod help;
mod state;

use crate::cli::Cli;
use crate::engine::client::ScreeningClient;
use crate::model::{InfoEvent, JobRole, ScreenEvent, Verdict};
use crate::orchestrator::session::{RolePhase, SubmissionPhase, ViewState};
use crate::orchestrator::{self, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use export::{copy_to_clipboard, export_result_json};
use help::draw_help;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::{push_wrapped_status_kv, UiState};
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    let cfg = crate::cli::build_config(&args);
    let client = Arc::new(ScreeningClient::new(&cfg).context("failed to build HTTP client")?);

    let (event_tx, event_rx) = mpsc::unbounded_channel::<ScreenEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let base_url = client.base_url().to_string();
    let ui_handle =
        std::thread::spawn(move || run_threaded(ui_args, base_url, event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, client, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub(crate) fn run_threaded(
    args: Cli,
    base_url: String,
    mut event_rx: UnboundedReceiver<ScreenEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState {
        base_url,
        export_path: args.export_json.clone(),
        preselect: args.resume.clone(),
        ..Default::default()
    };

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if handle_key(&mut state, k, &cmd_tx) {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Apply one key press. Returns `true` when the user asked to quit.
fn handle_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
        return true;
    }

    if state.path_editing {
        match k.code {
            KeyCode::Enter => {
                state.path_editing = false;
                let input = state.path_input.trim().to_string();
                if input.is_empty() {
                    state.info = "No path entered".into();
                } else {
                    state.load_resume(std::path::Path::new(&input));
                }
            }
            KeyCode::Esc => {
                state.path_editing = false;
                state.info = "Resume selection cancelled".into();
            }
            KeyCode::Backspace => {
                state.path_input.pop();
            }
            KeyCode::Char(c) => state.path_input.push(c),
            _ => {}
        }
        return false;
    }

    // The alert is modal: nothing but dismissal and quit gets through.
    if state.session.alert.is_some() {
        match k.code {
            KeyCode::Enter | KeyCode::Esc => state.session.dismiss_alert(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match k.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.session.can_regenerate() {
                let _ = cmd_tx.send(UiCommand::RegenerateRole);
            } else if state.session.submitting {
                state.info = InfoEvent::RegenerateRefused.to_message();
            } else {
                state.info = "A role is already being generated".into();
            }
        }
        KeyCode::Char('f') => {
            if state.tab == 0 && !state.session.submitting {
                state.path_editing = true;
                state.path_input.clear();
                state.info = "Type a PDF path, Enter to load, Esc to cancel".into();
            }
        }
        KeyCode::Enter | KeyCode::Char('s') => {
            if state.tab == 0 {
                if state.session.can_submit() {
                    if let Some(resume) = state.session.resume.clone() {
                        let _ = cmd_tx.send(UiCommand::Submit(resume));
                    }
                } else if state.session.submitting {
                    state.info = "A screening is already running".into();
                } else if state.session.role.is_none() {
                    state.info = "No job role loaded (press g)".into();
                } else {
                    state.info = "Choose a resume first (press f)".into();
                }
            }
        }
        KeyCode::Char('e') => match export_result_json(state) {
            Ok(p) => {
                state.last_exported_path = Some(p.to_string_lossy().to_string());
                state.info = format!("Exported JSON: {} (press 'y' to copy path)", p.display());
            }
            Err(e) => {
                state.info = format!("JSON export failed: {e:#}");
            }
        },
        KeyCode::Char('y') => {
            if let Some(ref path) = state.last_exported_path {
                match copy_to_clipboard(path) {
                    Ok(_) => {
                        let display_path = if path.chars().count() > 60 {
                            let head: String = path.chars().take(57).collect();
                            format!("{head}...")
                        } else {
                            path.clone()
                        };
                        state.info = format!("✓ Copied to clipboard: {}", display_path);
                    }
                    Err(e) => {
                        state.info = format!("Clipboard copy failed: {e:#}");
                    }
                }
            } else {
                state.info = "No exported file path to copy. Export a result first (e)".into();
            }
        }
        KeyCode::Tab => {
            state.tab = (state.tab + 1) % 2;
        }
        KeyCode::Char('?') => {
            state.tab = 1;
        }
        _ => {}
    }
    false
}

fn apply_event(state: &mut UiState, ev: ScreenEvent) {
    state.session.apply(&ev);
    match ev {
        ScreenEvent::RoleRequested => {
            state.info = "Generating job role…".into();
        }
        ScreenEvent::RoleReady { role } => {
            state.info = format!("Role ready: {}", role.role);
            if let Some(path) = state.preselect.take() {
                state.load_resume(&path);
            }
        }
        ScreenEvent::RoleFailed { .. } => {
            state.info = "No role loaded. Press g to try again".into();
        }
        ScreenEvent::SubmissionStarted { resume_name } => {
            state.info = format!("Uploading {resume_name}…");
        }
        ScreenEvent::ElapsedTick { .. } => {}
        ScreenEvent::SubmissionCompleted { result } => {
            state.info = format!("Verdict: {}", result.verdict().label());
            if let Some(record) = state.session.record(&state.base_url) {
                let processed =
                    orchestrator::process_screening(state.export_path.as_deref(), record);
                if !processed.export_messages.is_empty() {
                    state.info = processed.export_messages.join("; ");
                }
            }
        }
        ScreenEvent::SubmissionFailed { .. } => {
            state.info = "Analysis failed".into();
        }
        ScreenEvent::Info(info) => {
            state.info = info.to_message();
        }
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![Line::from("Screen"), Line::from("Help")])
        .select(state.tab)
        .block(Block::default().borders(Borders::ALL).title("smart-screen"))
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_screen(chunks[1], f, state),
        _ => draw_help(chunks[1], f),
    }

    if let Some(alert) = state.session.alert.as_deref() {
        draw_alert(area, f, alert);
    }
}

fn draw_screen(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)].as_ref())
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(main[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .split(cols[1]);

    draw_role(cols[0], f, state);
    draw_portal(right[0], f, state);
    draw_result(right[1], f, state);
    draw_status(main[1], f, state);
}

fn section_title(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn role_lines(role: &JobRole) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            role.role.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(role.experience_level.clone(), Style::default().fg(Color::Yellow)),
            Span::raw("  ·  "),
            Span::styled("Remote / Hybrid", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        section_title("Required Tech Stack"),
        Line::from(role.skills.join("  ·  ")),
        Line::from(""),
        section_title("Key Missions"),
    ];
    for r in &role.responsibilities {
        lines.push(Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::raw(r.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(section_title("Qualifications"));
    for q in &role.qualifications {
        lines.push(Line::from(format!("• {q}")));
    }
    lines
}

fn draw_role(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let skeleton = Style::default().fg(Color::DarkGray);
    let lines = match (state.session.role_phase(), state.session.role.as_ref()) {
        (RolePhase::Generating, _) => vec![
            Line::from(format!("{} Generating role…", state.spinner())),
            Line::from(""),
            Line::from(Span::styled("░░░░░░░░░░░░░░░░░░", skeleton)),
            Line::from(Span::styled("░░░░░░░░░░░░", skeleton)),
            Line::from(Span::styled("░░░░░░░░░░░░░░░", skeleton)),
        ],
        (RolePhase::Ready, Some(role)) => role_lines(role),
        _ => vec![Line::from(Span::styled(
            "No role loaded. Press g to generate one.",
            Style::default().fg(Color::Gray),
        ))],
    };

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Target Position"))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn draw_portal(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let session = &state.session;
    let file_line = if state.path_editing {
        Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::Gray)),
            Span::raw(state.path_input.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else if let Some(resume) = session.resume.as_ref() {
        Line::from(vec![
            Span::styled("File: ", Style::default().fg(Color::Gray)),
            Span::raw(resume.name.clone()),
        ])
    } else {
        Line::from(Span::styled(
            "Upload resume: press f (PDF only, max 5 MB)",
            Style::default().fg(Color::Gray),
        ))
    };

    let button = if session.submission_phase() == SubmissionPhase::Pending {
        Span::styled(
            format!("[ {} Processing ({}s) ]", state.spinner(), session.elapsed_secs),
            Style::default().fg(Color::Yellow),
        )
    } else if session.can_submit() {
        Span::styled(
            "[ Start Alignment Analysis ]",
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    } else {
        Span::styled(
            "[ Start Alignment Analysis ]",
            Style::default().fg(Color::DarkGray),
        )
    };

    let p = Paragraph::new(vec![file_line, Line::from(""), Line::from(button)])
        .block(Block::default().borders(Borders::ALL).title("Candidate Portal"))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn draw_result(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let session = &state.session;
    match session.view() {
        ViewState::Uploading { elapsed_secs } => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} AI Analysis in Progress", state.spinner()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Evaluating skill matrices & experience context..."),
                Line::from(Span::styled(
                    format!("{elapsed_secs}s elapsed"),
                    Style::default().fg(Color::Gray),
                )),
            ])
            .block(Block::default().borders(Borders::ALL).title("Result"))
            .wrap(Wrap { trim: true });
            f.render_widget(p, area);
        }
        ViewState::Result(verdict) => {
            let Some(result) = session.result.as_ref() else {
                return;
            };
            let color = match verdict {
                Verdict::Recommended => Color::Green,
                Verdict::NotSelected => Color::Red,
            };
            let match_color = if result.is_skill_match() {
                Color::Green
            } else {
                Color::Red
            };
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    verdict.label(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled("Screened for: ", Style::default().fg(Color::Gray)),
                    Span::raw(result.screened_for_role.clone()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Experience: ", Style::default().fg(Color::Gray)),
                    Span::raw(result.experience_level.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Skill Match: ", Style::default().fg(Color::Gray)),
                    Span::styled(result.skill_match.clone(), Style::default().fg(match_color)),
                ]),
                Line::from(""),
                section_title("AI Reasoning"),
                Line::from(verdict.reasoning()),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title("Result"),
            )
            .wrap(Wrap { trim: true });
            f.render_widget(p, area);
        }
        ViewState::Idle | ViewState::Generating | ViewState::Ready => {
            let p = Paragraph::new(Line::from(Span::styled(
                "Select a resume and start the analysis to see a verdict.",
                Style::default().fg(Color::Gray),
            )))
            .block(Block::default().borders(Borders::ALL).title("Result"))
            .wrap(Wrap { trim: true });
            f.render_widget(p, area);
        }
    }
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut lines = Vec::new();
    push_wrapped_status_kv(&mut lines, "Backend", &state.base_url, area.width);
    push_wrapped_status_kv(&mut lines, "Info", &state.info, area.width);
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Status (g role · f file · Enter submit · ? help)"),
    );
    f.render_widget(p, area);
}

/// A rect of `percent_x` width and `height` rows centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_alert(area: Rect, f: &mut ratatui::Frame, message: &str) {
    let popup = centered_rect(60, 7, area);
    f.render_widget(Clear, popup);
    let p = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(p, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{sample_result, sample_role};
    use crate::model::{ResumeFile, INTERVIEW_SCHEDULED};
    use bytes::Bytes;
    use ratatui::backend::TestBackend;

    fn key(c: KeyCode) -> KeyEvent {
        KeyEvent::new(c, KeyModifiers::NONE)
    }

    fn render(state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f.area(), f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn ready_state() -> UiState {
        let mut state = UiState::default();
        apply_event(
            &mut state,
            ScreenEvent::RoleReady {
                role: sample_role("Backend Engineer"),
            },
        );
        state
            .session
            .select_resume(ResumeFile::from_parts("cv.pdf", Bytes::from_static(b"%PDF")).unwrap());
        state
    }

    #[test]
    fn renders_role_and_verdict() {
        let mut state = ready_state();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionStarted {
                resume_name: "cv.pdf".into(),
            },
        );
        apply_event(
            &mut state,
            ScreenEvent::SubmissionCompleted {
                result: Box::new(sample_result(INTERVIEW_SCHEDULED)),
            },
        );
        let screen = render(&state);
        assert!(screen.contains("Backend Engineer"));
        assert!(screen.contains("Required Tech Stack"));
        assert!(screen.contains("RECOMMENDED"));
        assert!(screen.contains("AI Reasoning"));
        assert_eq!(state.info, "Verdict: RECOMMENDED");
    }

    /// Foreground colour of the cell `offset` columns from where `text`
    /// first appears.
    fn fg_at(buf: &ratatui::buffer::Buffer, text: &str, offset: isize) -> Option<Color> {
        let width = buf.area.width as usize;
        let needle: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        for row in buf.content().chunks(width) {
            for start in 1..=row.len().saturating_sub(needle.len()) {
                let hit = row[start..start + needle.len()]
                    .iter()
                    .zip(&needle)
                    .all(|(cell, want)| cell.symbol() == want);
                if hit {
                    let idx = start.checked_add_signed(offset)?;
                    return row.get(idx).map(|cell| cell.fg);
                }
            }
        }
        None
    }

    fn finished_with(decision: &str, skill_match: &str) -> ratatui::buffer::Buffer {
        let mut state = ready_state();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionStarted {
                resume_name: "cv.pdf".into(),
            },
        );
        let mut result = sample_result(decision);
        result.skill_match = skill_match.into();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionCompleted {
                result: Box::new(result),
            },
        );
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f.area(), f, &state)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn verdict_colours_follow_decision() {
        let buf = finished_with(INTERVIEW_SCHEDULED, "Match");
        assert_eq!(fg_at(&buf, "RECOMMENDED", 0), Some(Color::Green));
        // The cell before the title is the block's top-left corner.
        assert_eq!(fg_at(&buf, "Result", -1), Some(Color::Green));
        assert_eq!(fg_at(&buf, "Skill Match: Match", 13), Some(Color::Green));

        let buf = finished_with("Application Rejected", "Mismatch");
        let screen: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!screen.contains("RECOMMENDED"));
        assert_eq!(fg_at(&buf, "NOT SELECTED", 0), Some(Color::Red));
        assert_eq!(fg_at(&buf, "Result", -1), Some(Color::Red));
        assert_eq!(fg_at(&buf, "Skill Match: Mismatch", 13), Some(Color::Red));
    }

    #[test]
    fn renders_elapsed_counter_while_processing() {
        let mut state = ready_state();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionStarted {
                resume_name: "cv.pdf".into(),
            },
        );
        apply_event(&mut state, ScreenEvent::ElapsedTick { secs: 12 });
        let screen = render(&state);
        assert!(screen.contains("Processing (12s)"));
        assert!(screen.contains("AI Analysis in Progress"));
    }

    #[test]
    fn failure_shows_modal_alert() {
        let mut state = ready_state();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionStarted {
                resume_name: "cv.pdf".into(),
            },
        );
        apply_event(
            &mut state,
            ScreenEvent::SubmissionFailed {
                message: "backend returned 500".into(),
            },
        );
        let screen = render(&state);
        assert!(screen.contains("Analysis failed."));
        assert!(screen.contains("Press Enter to dismiss"));
    }

    #[test]
    fn alert_blocks_other_keys_until_dismissed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = ready_state();
        state.session.alert = Some("Analysis failed. boom".into());

        assert!(!handle_key(&mut state, key(KeyCode::Char('g')), &tx));
        assert!(rx.try_recv().is_err());

        assert!(!handle_key(&mut state, key(KeyCode::Enter), &tx));
        assert!(state.session.alert.is_none());
        assert!(rx.try_recv().is_err());

        handle_key(&mut state, key(KeyCode::Char('g')), &tx);
        assert!(matches!(rx.try_recv(), Ok(UiCommand::RegenerateRole)));
    }

    #[test]
    fn enter_submits_only_when_ready() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = UiState::default();
        handle_key(&mut state, key(KeyCode::Enter), &tx);
        assert!(rx.try_recv().is_err());
        assert!(state.info.contains("No job role"));

        let mut state = ready_state();
        handle_key(&mut state, key(KeyCode::Enter), &tx);
        match rx.try_recv() {
            Ok(UiCommand::Submit(r)) => assert_eq!(r.name, "cv.pdf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn regenerate_refused_while_submitting() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut state = ready_state();
        apply_event(
            &mut state,
            ScreenEvent::SubmissionStarted {
                resume_name: "cv.pdf".into(),
            },
        );
        handle_key(&mut state, key(KeyCode::Char('g')), &tx);
        assert!(rx.try_recv().is_err());
        assert!(state.info.contains("screening is in progress"));
    }

    #[test]
    fn path_input_captures_keys_and_quit_letters() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut state = ready_state();
        handle_key(&mut state, key(KeyCode::Char('f')), &tx);
        assert!(state.path_editing);
        for c in "q.txt".chars() {
            assert!(!handle_key(&mut state, key(KeyCode::Char(c)), &tx));
        }
        assert_eq!(state.path_input, "q.txt");
        handle_key(&mut state, key(KeyCode::Esc), &tx);
        assert!(!state.path_editing);
        assert!(handle_key(&mut state, key(KeyCode::Char('q')), &tx));
    }

    #[test]
    fn role_request_clears_selected_file() {
        let mut state = ready_state();
        apply_event(&mut state, ScreenEvent::RoleRequested);
        assert!(state.session.resume.is_none());
        assert!(render(&state).contains("Generating role"));
    }
}
