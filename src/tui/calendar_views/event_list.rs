use chrono::Local;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use calboard::app::{AppState, ViewType};

/// Side panel: events of the selected day, plus details of the highlighted
/// one.
pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let events = app.get_events_for_date(app.selected_date);
    let title = format!("Events on {}", app.selected_date.format("%B %d, %Y"));

    let mut lines = vec![
        Line::from(Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(Span::styled("No events", Style::default().fg(app.theme.inactive_day))));
    }

    let selected_id = app.get_selected_event().map(|e| e.id.clone());
    for event in &events {
        let is_selected = app.view != ViewType::Agenda && selected_id.as_deref() == Some(event.id.as_str());
        let style = if is_selected {
            Style::default()
                .bg(app.theme.selected_bg)
                .fg(app.theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let time = if event.is_all_day() {
            "all day".to_string()
        } else {
            event.start.with_timezone(&Local).format("%H:%M").to_string()
        };

        lines.push(Line::from(vec![
            Span::raw(if is_selected { ">" } else { " " }),
            Span::styled(time, style.fg(app.theme.event_indicator)),
            Span::raw(" "),
            Span::styled(event.title.as_str(), style),
        ]));
    }

    if let Some(event) = app.get_selected_event() {
        let label = Style::default().fg(app.theme.form_label);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            event.title.as_str(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("When: ", label),
            Span::raw(format!(
                "{} - {}",
                event.start.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                event.end.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )),
        ]));
        if !event.location.is_empty() {
            lines.push(Line::from(vec![Span::styled("Where: ", label), Span::raw(event.location.as_str())]));
        }
        lines.push(Line::from(vec![
            Span::styled("Organizer: ", label),
            Span::raw(format!("{} <{}>", event.organizer.name, event.organizer.email)),
        ]));
        for attendee in &event.attendees {
            lines.push(Line::from(format!("  - {} <{}>", attendee.name, attendee.email)));
        }
        if !event.description.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(event.description.as_str()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("E", Style::default().fg(app.theme.success)),
            Span::raw(" = Edit | "),
            Span::styled("x", Style::default().fg(app.theme.help_title)),
            Span::raw(" = Export"),
        ]));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
