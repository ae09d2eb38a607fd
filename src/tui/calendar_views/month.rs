use chrono::{Datelike, NaiveDate};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use calboard::{app::AppState, ui::month_view};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app);

    let month_name = NaiveDate::from_ymd_opt(layout.year, layout.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", layout.year, layout.month));

    let header: Vec<Span> = layout
        .weekdays
        .iter()
        .map(|wd| Span::styled(format!(" {:<4}", wd.to_string()), Style::default().fg(app.theme.weekday_header)))
        .collect();

    let mut lines = vec![
        Line::from(Span::styled(
            month_name,
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(header),
    ];

    for week in &layout.weeks {
        let day_spans: Vec<Span> = week
            .days
            .iter()
            .map(|cell| {
                let marker = match cell.event_count {
                    0 => ' ',
                    1..=9 => char::from_digit(cell.event_count as u32, 10).unwrap_or('+'),
                    _ => '+',
                };
                let text = format!(" {:>2}{}  ", cell.date.day(), marker);

                let mut style = Style::default();
                if !cell.is_current_month {
                    style = style.fg(app.theme.inactive_day);
                } else if cell.is_selected {
                    style = style
                        .bg(app.theme.selected_bg)
                        .fg(app.theme.selected_fg)
                        .add_modifier(Modifier::BOLD);
                } else if cell.is_today {
                    style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
                } else if cell.has_events() {
                    style = style.fg(app.theme.event_indicator);
                }

                Span::styled(text, style)
            })
            .collect();

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(app.theme.help_title)),
        Span::raw(" = Navigate | "),
        Span::styled("a", Style::default().fg(app.theme.success)),
        Span::raw(" = Add event | "),
        Span::styled("Enter", Style::default().fg(app.theme.success)),
        Span::raw(" = Open | "),
        Span::styled("m/w/d/A", Style::default().fg(app.theme.help_title)),
        Span::raw(" = Views"),
    ]));

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
