use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use calboard::app::{AppState, Mode, SyncStatus, ViewType};

use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let title_text = format!(
        "calboard - {} View - {:?} Mode - {}",
        app.view.label(),
        app.mode,
        app.window
    );

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    match app.view {
        ViewType::Month => calendar_views::month::render(f, app, content_chunks[0]),
        ViewType::Week => calendar_views::week::render(f, app, content_chunks[0]),
        ViewType::Day => calendar_views::day::render(f, app, content_chunks[0]),
        ViewType::Agenda => calendar_views::agenda::render(f, app, content_chunks[0]),
    }

    calendar_views::event_list::render(f, app, content_chunks[1]);

    f.render_widget(status_bar(app), main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.event_form.is_some() {
        dialogs::event_form::render(f, app);
    }
}

fn status_bar(app: &AppState) -> Paragraph<'_> {
    if matches!(app.mode, Mode::Command) {
        return Paragraph::new(app.command_buffer.as_str())
            .style(Style::default().fg(app.theme.command_mode))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
    }

    let sync_color = match app.sync_status {
        SyncStatus::Synced => app.theme.success,
        SyncStatus::Syncing => app.theme.syncing,
        SyncStatus::Error { .. } => app.theme.error,
    };

    let mut spans = vec![
        Span::raw(format!("Events: {} | ", app.get_events_in_window().len())),
        Span::styled(app.sync_status.to_string(), Style::default().fg(sync_color)),
    ];
    if let Some(notice) = &app.notice {
        spans.push(Span::raw(" | "));
        spans.push(Span::raw(notice.as_str()));
    }
    spans.push(Span::raw(" | 'q' quit, '?' help"));

    Paragraph::new(Line::from(spans))
        .style(Style::default().fg(app.theme.status_bar))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}
