use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use calboard::{app::AppState, ui::agenda_view};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = agenda_view::calculate_layout(app);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Agenda {}", app.selected_date.format("%B %Y")),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if layout.days.is_empty() {
        lines.push(Line::from(Span::styled(
            "No events in this period",
            Style::default().fg(app.theme.inactive_day),
        )));
    }

    for day in &layout.days {
        let date_style = if day.is_today {
            Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.weekday_header).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(day.date.format("%a %b %d").to_string(), date_style)));

        for entry in &day.entries {
            let style = if entry.is_selected {
                Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::raw("  "),
                Span::styled(format!("{:<12}", entry.time_range), style.fg(app.theme.event_indicator)),
                Span::styled(entry.title.clone(), style),
            ];
            if !entry.location.is_empty() {
                spans.push(Span::styled(
                    format!(" @ {}", entry.location),
                    Style::default().fg(app.theme.inactive_day),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
    }

    let scroll = selected_line(&layout).saturating_sub(area.height.saturating_sub(4) as usize);
    let content = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}

/// Line offset of the selected entry inside the rendered agenda.
fn selected_line(layout: &agenda_view::AgendaLayout) -> usize {
    let mut line = 2;
    for day in &layout.days {
        line += 1;
        for entry in &day.entries {
            if entry.is_selected {
                return line;
            }
            line += 1;
        }
        line += 1;
    }
    0
}
