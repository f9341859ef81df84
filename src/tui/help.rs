use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(action),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("g", 11, "Generate a new role"),
        key_line("f", 11, "Choose resume (type a path, Enter to load, Esc to cancel)"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("s", Style::default().fg(Color::Magenta)),
            Span::raw("   Start alignment analysis"),
        ]),
        key_line("e", 11, "Export result as JSON"),
        key_line("y", 11, "Copy exported path to clipboard"),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Notes:"),
        Line::from("  Results appear no earlier than the configured minimum wait (default 60s)."),
        Line::from("  A new role cannot be generated while a screening is running."),
        Line::from("  Only PDF resumes up to 5 MB are accepted."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
