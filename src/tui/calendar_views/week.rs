use chrono::Datelike;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use calboard::{app::AppState, ui::week_view};

const COLUMN_WIDTH: usize = 12;

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = week_view::calculate_layout(app);

    let week_range = match layout.days.last() {
        Some(last_day) => format!(
            "{} - {}",
            layout.week_start.format("%b %d"),
            last_day.date.format("%b %d, %Y")
        ),
        None => layout.week_start.format("%b %d, %Y").to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            week_range,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let header: Vec<Span> = layout
        .days
        .iter()
        .map(|day| {
            let text = format!("{:<width$}", format!("{} {}", day.date.format("%a"), day.date.day()), width = COLUMN_WIDTH);
            let style = if day.is_selected {
                Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
            } else if day.is_today {
                Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.weekday_header)
            };
            Span::styled(text, style)
        })
        .collect();
    lines.push(Line::from(header));

    // Events stack per column; row N shows the Nth event of each day.
    let rows = layout.days.iter().map(|d| d.events.len()).max().unwrap_or(0);
    for row in 0..rows {
        let spans: Vec<Span> = layout
            .days
            .iter()
            .map(|day| match day.events.get(row) {
                Some(block) => {
                    let label: String = format!("{} {}", block.time_label(), block.title)
                        .chars()
                        .take(COLUMN_WIDTH - 1)
                        .collect();
                    let color = if block.all_day { app.theme.all_day } else { app.theme.event_indicator };
                    Span::styled(format!("{:<width$}", label, width = COLUMN_WIDTH), Style::default().fg(color))
                }
                None => Span::raw(" ".repeat(COLUMN_WIDTH)),
            })
            .collect();
        lines.push(Line::from(spans));
    }

    if rows == 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No events this week",
            Style::default().fg(app.theme.inactive_day),
        )));
    }

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
