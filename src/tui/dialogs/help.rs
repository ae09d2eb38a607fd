use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use calboard::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60;
    let help_height = 24.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().fg(app.theme.help_section))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("calboard Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Navigate events (or week if no events)"),
        Line::from("  t        - Jump to today"),
        Line::from("  g/G      - First/last day of month"),
        Line::from("  { / }    - Previous/next month"),
        Line::from("  [ / ]    - Previous/next period of current view"),
        Line::from(""),
        section("Views:"),
        Line::from("  m/w/d/A  - Month/Week/Day/Agenda view"),
        Line::from("  r        - Reload events from the server"),
        Line::from(""),
        section("Events:"),
        Line::from("  a        - Add new event"),
        Line::from("  E/Enter  - Edit selected event"),
        Line::from("  x        - Export selected event (.ics)"),
        Line::from("  X        - Export all events in view (.ics)"),
        Line::from(""),
        section("Event form:"),
        Line::from("  Tab      - Next field (Shift-Tab previous)"),
        Line::from("  Space    - Toggle attendee in picker"),
        Line::from("  Enter    - Save"),
        Line::from("  Ctrl-E   - Export the event being edited"),
        Line::from("  Esc      - Close without saving"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q       - Quit"),
        Line::from("  :w       - Reload events (:refresh)"),
        Line::from("  :goto    - Jump to date (:goto 2025-12-25)"),
        Line::from("  :new     - Create event (:new [Meeting title])"),
        Line::from("  :view    - Switch view (:view agenda)"),
        Line::from("  :export  - Export selected event (:export all)"),
        Line::from("  :theme   - Change theme (:theme gruvbox)"),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
