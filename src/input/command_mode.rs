use chrono::NaiveDate;

use crate::app::{AppState, Mode, ViewType};
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Refresh,
    Goto(NaiveDate),
    NewEvent(Option<String>),
    View(ViewType),
    Export,
    ExportAll,
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Command::Error("Empty command".to_string());
    };

    match *name {
        "q" | "quit" => Command::Quit,
        "w" | "write" | "refresh" => Command::Refresh,
        "help" => Command::Help,
        "goto" => match parts.get(1) {
            None => Command::Error("goto requires a date argument".to_string()),
            Some(arg) => NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map(Command::Goto)
                .unwrap_or_else(|_| Command::Error(format!("Invalid date format: {}", arg))),
        },
        "new" => {
            if parts.len() < 2 {
                Command::NewEvent(None)
            } else {
                Command::NewEvent(Some(parts[1..].join(" ")))
            }
        }
        "view" => match parts.get(1) {
            None => Command::Error("view requires month, week, day or agenda".to_string()),
            Some(arg) => arg.parse().map(Command::View).unwrap_or_else(Command::Error),
        },
        "export" => match parts.get(1) {
            None => Command::Export,
            Some(&"all") => Command::ExportAll,
            Some(other) => Command::Error(format!("Unknown export target: {}", other)),
        },
        "theme" => match parts.get(1) {
            None => Command::Error("theme requires a theme name".to_string()),
            Some(arg) => Command::Theme(arg.to_string()),
        },
        _ => Command::Error(format!("Unknown command: {}", name)),
    }
}

/// Applies a parsed command. Returns `true` when the app should exit.
pub fn execute(command: Command, state: &mut AppState) -> bool {
    state.mode = Mode::Normal;
    state.command_buffer.clear();

    match command {
        Command::Quit => return true,
        Command::Refresh => state.request_events(),
        Command::Goto(date) => state.navigate_to(date),
        Command::NewEvent(title) => state.open_new_event_form(title),
        Command::View(view) => state.set_view(view),
        Command::Export => state.export_selected_event(),
        Command::ExportAll => state.export_visible_range(),
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => {
                tracing::info!("Switched theme to {}", theme.name);
                state.theme = theme;
            }
            None => {
                state.notice = Some(format!(
                    "Unknown theme '{}'. Available: {}",
                    name,
                    Theme::available_themes().join(", ")
                ));
            }
        },
        Command::Help => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        Command::Error(message) => {
            tracing::warn!("Command error: {}", message);
            state.notice = Some(message);
        }
    }

    false
}
