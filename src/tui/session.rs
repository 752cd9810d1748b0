use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use studio_deadlines::{
    app::{AppState, Mode, SyncStatus},
    calendar::DeadlineCalendar,
    input::{command_mode, normal_mode},
    storage::config::Config,
    sync::deadline_loader::{DeadlineLoader, LoadHandle},
    ui::theme::Theme,
};
use crate::tui::presentation::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_tui(config: &Config, loader: Arc<DeadlineLoader>) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let profile = loader.profile();
    let calendar = DeadlineCalendar::new(profile.grouping, profile.dedup);
    let mut app = AppState::new(calendar)
        .with_theme(Theme::get_by_name(&config.ui.theme))
        .with_title(profile.title());

    let res = run_app(&mut terminal, &mut app, &loader).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    loader: &Arc<DeadlineLoader>,
) -> io::Result<()> {
    // Replacing or dropping the handle aborts loads still in flight.
    let mut pending = Some(start_load(app, loader));

    loop {
        apply_finished_loads(app, &mut pending);
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                    } else if key.code == KeyCode::Char('q') {
                        return Ok(());
                    } else if let Some(action) = normal_mode::handle_key(key.code, app) {
                        match action {
                            normal_mode::Action::Refresh => {
                                pending = Some(start_load(app, loader));
                            }
                            normal_mode::Action::RequestMeeting => {
                                if meeting_date_available(app, loader) {
                                    app.message = Some(format!(
                                        "✅ {} is available, :meet <message> to request it",
                                        app.selected_date
                                    ));
                                }
                            }
                        }
                    }
                }
                Mode::Command => {
                    if handle_command_mode(key.code, app, loader, &mut pending).await? {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn start_load(app: &mut AppState, loader: &Arc<DeadlineLoader>) -> LoadHandle {
    tracing::info!("Loading deadlines for {}", loader.profile().role);
    app.sync_status = SyncStatus::Syncing;
    loader.spawn()
}

fn apply_finished_loads(app: &mut AppState, pending: &mut Option<LoadHandle>) {
    let Some(handle) = pending.as_mut() else {
        return;
    };

    for update in handle.drain() {
        app.apply_update(update);
    }

    if handle.is_complete() {
        if app.sync_status == SyncStatus::Syncing {
            app.sync_status = SyncStatus::Synced;
        }
        *pending = None;
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

async fn handle_command_mode(
    code: KeyCode,
    app: &mut AppState,
    loader: &Arc<DeadlineLoader>,
    pending: &mut Option<LoadHandle>,
) -> io::Result<bool> {
    match code {
        KeyCode::Enter => {
            let cmd = command_mode::parse_command(&app.command_buffer);
            app.command_buffer.clear();
            app.mode = Mode::Normal;

            match cmd {
                command_mode::Command::Quit => return Ok(true),
                command_mode::Command::Refresh => {
                    *pending = Some(start_load(app, loader));
                }
                command_mode::Command::Goto(date) => {
                    app.select_date(date);
                }
                command_mode::Command::Help => {
                    app.show_help = !app.show_help;
                }
                command_mode::Command::Theme(theme_name) => {
                    let available = Theme::available_themes();
                    if available.contains(&theme_name.to_lowercase().as_str()) {
                        app.theme = Theme::get_by_name(&theme_name);
                    } else {
                        app.message = Some(format!(
                            "Unknown theme '{}', try one of: {}",
                            theme_name,
                            available.join(", ")
                        ));
                    }
                }
                command_mode::Command::Meet(message) => {
                    if request_meeting(app, loader, message).await {
                        *pending = Some(start_load(app, loader));
                    }
                }
                command_mode::Command::Error(e) => {
                    app.message = Some(e);
                }
            }
            Ok(false)
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            Ok(false)
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            Ok(false)
        }
        _ => Ok(false)
    }
}

fn meeting_date_available(app: &mut AppState, loader: &DeadlineLoader) -> bool {
    if !loader.profile().include_meetings {
        app.message = Some("Meetings are not part of this dashboard".to_string());
        return false;
    }
    app.check_meeting_request(Local::now().date_naive()).is_ok()
}

/// Returns true when the request was accepted and meetings need reloading.
async fn request_meeting(app: &mut AppState, loader: &DeadlineLoader, message: Option<String>) -> bool {
    if !meeting_date_available(app, loader) {
        return false;
    }

    let date = app.selected_date;
    let message = message.unwrap_or_else(|| format!("Meeting on {}", date));

    match loader.request_meeting(date, &message).await {
        Ok(()) => {
            app.message = Some(format!("📨 Meeting requested for {}", date));
            true
        }
        Err(e) => {
            tracing::error!("Meeting request for {} failed: {}", date, e);
            app.message = Some(format!("❌ Meeting request failed: {}", e));
            false
        }
    }
}
