use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use calboard::{
    app::AppState,
    editor::{EventForm, FormField},
};

const VISIBLE_ATTENDEES: usize = 8;

fn field_line<'a>(app: &AppState, form: &EventForm, field: FormField, value: &'a str, hint: &'a str) -> Line<'a> {
    let active = form.active_field == field;
    let label_style = if active {
        Style::default().fg(app.theme.selected_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.form_label)
    };

    let mut spans = vec![
        Span::styled(format!("{:<17}", format!("{}:", field.label())), label_style),
        Span::raw(value),
    ];
    if active {
        spans.push(Span::styled("_", Style::default().fg(app.theme.selected_bg)));
        if !hint.is_empty() {
            spans.push(Span::styled(format!("  {}", hint), Style::default().fg(app.theme.inactive_day)));
        }
    }
    Line::from(spans)
}

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.event_form else {
        return;
    };

    let area = f.size();
    let form_width = 76.min(area.width);
    let form_height = (26 + VISIBLE_ATTENDEES as u16).min(area.height);
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let mut lines = vec![
        field_line(app, form, FormField::Title, &form.title, ""),
        field_line(app, form, FormField::Location, &form.location, "optional"),
        field_line(app, form, FormField::Description, &form.description, "optional"),
        field_line(app, form, FormField::Start, &form.start, "YYYY-MM-DDTHH:MM"),
        field_line(app, form, FormField::End, &form.end, "YYYY-MM-DDTHH:MM"),
        field_line(app, form, FormField::OrganizerName, &form.organizer_name, ""),
        field_line(app, form, FormField::OrganizerEmail, &form.organizer_email, ""),
        Line::from(""),
    ];

    let picker_active = form.active_field == FormField::Attendees;
    lines.push(Line::from(vec![
        Span::styled(
            format!("Attendees ({} selected)", form.attendee_ids.len()),
            if picker_active {
                Style::default().fg(app.theme.selected_bg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.form_label)
            },
        ),
        Span::styled(
            if picker_active { "  j/k = Move, Space = Toggle" } else { "" },
            Style::default().fg(app.theme.inactive_day),
        ),
    ]));

    if app.users.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Directory unavailable",
            Style::default().fg(app.theme.inactive_day),
        )));
    }

    let first = form
        .attendee_cursor
        .saturating_sub(VISIBLE_ATTENDEES - 1)
        .min(app.users.len().saturating_sub(VISIBLE_ATTENDEES));
    for (idx, user) in app.users.iter().enumerate().skip(first).take(VISIBLE_ATTENDEES) {
        let checkbox = if form.is_attendee_selected(user) { "[x]" } else { "[ ]" };
        let style = if picker_active && idx == form.attendee_cursor {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {} {}", checkbox, user.label()), style)));
    }

    lines.push(Line::from(""));
    if form.save_in_progress {
        lines.push(Line::from(Span::styled("Saving…", Style::default().fg(app.theme.syncing))));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.as_str(), Style::default().fg(app.theme.error))));
    } else {
        lines.push(Line::from(""));
    }

    let mut footer = vec![
        Span::styled("Tab", Style::default().fg(app.theme.help_title)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(app.theme.success)),
        Span::raw(" = Save | "),
    ];
    if form.is_editing() {
        footer.push(Span::styled("Ctrl-E", Style::default().fg(app.theme.help_title)));
        footer.push(Span::raw(" = Export | "));
    }
    footer.push(Span::styled("Esc", Style::default().fg(app.theme.error)));
    footer.push(Span::raw(" = Close"));
    lines.push(Line::from(footer));

    let form_paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", form.heading()),
                    Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
