use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use calboard::{
    app::local_date,
    calendar::{DateWindow, Event as CalendarEvent},
    storage::config::Config,
    sync::sync_engine::SyncEngine,
    ui::agenda_view::time_range,
};

pub const USAGE: &str = "Usage: calboard [--agenda [YYYY/MM/DD]] [--export-all [YYYY/MM/DD]] [--help]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Tui,
    Agenda(NaiveDate),
    ExportAll(NaiveDate),
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliMode, String> {
    let mut mode = CliMode::Tui;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" | "--export-all" => {
                let date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => Local::now().date_naive(),
                };
                mode = if arg == "--agenda" {
                    CliMode::Agenda(date)
                } else {
                    CliMode::ExportAll(date)
                };
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(mode)
}

pub async fn run_agenda_mode(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let (sync_engine, _outcomes) = SyncEngine::from_config(config)?;
    let window = DateWindow::month_of(date);

    let events = sync_engine
        .fetch_window(window)
        .await
        .with_context(|| format!("Failed to fetch events for {}", window))?;

    let agenda = format_agenda_text(window, &events);
    display_with_pager(&agenda)
}

pub async fn run_export_mode(config: &Config, date: NaiveDate) -> anyhow::Result<()> {
    let (sync_engine, _outcomes) = SyncEngine::from_config(config)?;
    let window = DateWindow::month_of(date);

    let path = sync_engine
        .export_window(window)
        .await
        .with_context(|| format!("Failed to export {}", window))?;

    println!("{}", path.display());
    Ok(())
}

fn format_agenda_text(window: DateWindow, events: &[CalendarEvent]) -> String {
    let mut events: Vec<&CalendarEvent> = events.iter().collect();
    events.sort_by_key(|event| event.start);

    let mut lines = vec![format!("Agenda {}", window.start.format("%B %Y")), String::new()];

    if events.is_empty() {
        lines.push("No events scheduled.".to_string());
    }

    let mut current_day = None;
    for event in events {
        let day = local_date(&event.start);
        if current_day != Some(day) {
            if current_day.is_some() {
                lines.push(String::new());
            }
            lines.push(day.format("%A, %B %d").to_string());
            current_day = Some(day);
        }
        lines.push(format!("  - {}", build_agenda_line(event)));
    }

    lines.join("\n")
}

fn build_agenda_line(event: &CalendarEvent) -> String {
    let mut line = format!("{:<13} {}", time_range(event), event.title);
    if !event.location.is_empty() {
        line.push_str(&format!(" @ {}", event.location));
    }
    if !event.attendees.is_empty() {
        line.push_str(&format!(" ({} attendees)", event.attendees.len()));
    }
    line
}

fn display_with_pager(text: &str) -> anyhow::Result<()> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes()).context("Failed to write to pager")?;
            }
            let _ = child.wait();
        }
        Err(e) => {
            tracing::warn!("Pager '{}' unavailable: {}", cmd, e);
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn no_arguments_start_tui() {
        assert_eq!(parse_args(args(&[])), Ok(CliMode::Tui));
    }

    #[test]
    fn agenda_takes_optional_date() {
        assert_eq!(parse_args(args(&["--agenda", "2025/03/04"])), Ok(CliMode::Agenda(date(2025, 3, 4))));
        assert_eq!(
            parse_args(args(&["--agenda"])),
            Ok(CliMode::Agenda(Local::now().date_naive()))
        );
    }

    #[test]
    fn export_all_takes_optional_date() {
        assert_eq!(
            parse_args(args(&["--export-all", "2025/12/01"])),
            Ok(CliMode::ExportAll(date(2025, 12, 1)))
        );
    }

    #[test]
    fn invalid_date_and_unknown_flag_are_errors() {
        assert!(parse_args(args(&["--agenda", "tomorrow"])).is_err());
        assert!(parse_args(args(&["--sample"])).is_err());
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse_args(args(&["--agenda", "--help"])), Ok(CliMode::Help));
    }

    #[test]
    fn agenda_text_groups_by_day() {
        use calboard::calendar::{Event, Organizer};
        use chrono::TimeZone;

        let start = Local
            .from_local_datetime(&date(2025, 1, 6).and_hms_opt(9, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&chrono::Utc);
        let event = Event {
            id: "e1".to_string(),
            title: "Standup".to_string(),
            start,
            end: start + chrono::Duration::minutes(15),
            all_day: None,
            resource: None,
            location: "Room 1".to_string(),
            description: String::new(),
            organizer: Organizer::default(),
            attendees: vec![],
        };

        let text = format_agenda_text(DateWindow::month_of(date(2025, 1, 6)), &[event]);

        assert!(text.starts_with("Agenda January 2025"));
        assert!(text.contains("Monday, January 06"));
        assert!(text.contains("09:00-09:15"));
        assert!(text.contains("Standup @ Room 1"));
    }

    #[test]
    fn empty_agenda_says_so() {
        let text = format_agenda_text(DateWindow::month_of(date(2025, 1, 6)), &[]);
        assert!(text.ends_with("No events scheduled."));
    }
}
