use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use calboard::{app::AppState, ui::day_view};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = day_view::calculate_layout(app);
    let selected_id = app.get_selected_event().map(|e| e.id.clone());

    let title_style = if layout.is_today {
        Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(layout.date.format("%A, %B %d, %Y").to_string(), title_style)),
        Line::from(""),
    ];

    for entry in &layout.all_day {
        lines.push(Line::from(vec![
            Span::styled("all day ", Style::default().fg(app.theme.all_day)),
            Span::raw(&entry.title),
        ]));
    }

    for hour_block in &layout.hours {
        let mut hour_line = vec![Span::styled(
            format!("{:02}:00 ", hour_block.hour),
            Style::default().fg(app.theme.inactive_day),
        )];

        for (i, event) in hour_block.events.iter().enumerate() {
            if i > 0 {
                hour_line.push(Span::raw(" | "));
            }

            let style = if selected_id.as_deref() == Some(event.event_id.as_str()) {
                Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
            } else {
                Style::default().fg(app.theme.event_indicator)
            };

            hour_line.push(Span::styled(
                format!(":{:02} {} ({}m)", event.start_minute, event.title, event.duration_minutes),
                style,
            ));

            if let Some(location) = &event.location {
                hour_line.push(Span::styled(format!(" @ {}", location), Style::default().fg(app.theme.inactive_day)));
            }
        }

        lines.push(Line::from(hour_line));
    }

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
