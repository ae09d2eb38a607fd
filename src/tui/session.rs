use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use calboard::{
    app::{AppState, Mode, SyncOutcome},
    input::{command_mode, insert_mode, normal_mode},
    storage::config::Config,
    sync::sync_engine::SyncEngine,
    ui::theme::Theme,
};

use crate::tui::presentation::ui;

const INPUT_POLL: Duration = Duration::from_millis(100);

pub async fn run_tui(config: Config) -> Result<(), io::Error> {
    let (mut sync_engine, mut outcomes) =
        SyncEngine::from_config(&config).map_err(|e| io::Error::other(e.to_string()))?;

    let mut app = AppState::new()
        .with_theme(Theme::get_by_name(&config.ui.theme))
        .with_week_start(config.week_start())
        .with_view(config.default_view());
    app.start();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut sync_engine, &mut outcomes).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI loop failed: {}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

/// One iteration: apply finished work, start queued work, draw, then wait
/// briefly for a key so results keep flowing while the user is idle.
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    sync_engine: &mut SyncEngine,
    outcomes: &mut UnboundedReceiver<SyncOutcome>,
) -> io::Result<()> {
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply(outcome);
        }

        for effect in app.take_effects() {
            sync_engine.dispatch(effect);
        }

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(INPUT_POLL)? {
            tokio::task::yield_now().await;
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(key, app)
        {
            tracing::info!("Quit requested");
            return Ok(());
        }
    }
}

/// Routes a key press by mode. Returns `true` when the app should exit.
fn handle_key(key: KeyEvent, app: &mut AppState) -> bool {
    match app.mode {
        Mode::Normal => {
            if app.show_help {
                handle_help_keys(key.code, app);
                return false;
            }
            match key.code {
                KeyCode::Char('q') => return true,
                _ => {
                    app.notice = None;
                    normal_mode::handle_key(key.code, app);
                }
            }
        }
        Mode::Command => return handle_command_mode(key.code, app),
        Mode::Insert => insert_mode::handle_key(key, app),
    }
    false
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_command_mode(code: KeyCode, app: &mut AppState) -> bool {
    match code {
        KeyCode::Enter => {
            let command = command_mode::parse_command(&app.command_buffer);
            tracing::info!("Running command {:?}", command);
            command_mode::execute(command, app)
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.command_buffer.clear();
            false
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            false
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            false
        }
        _ => false,
    }
}
