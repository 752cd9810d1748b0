use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use studio_deadlines::app::{AppState, Mode, SyncStatus};
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
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    let title = Paragraph::new(app.title.as_str())
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::month::render(f, app, content_chunks[0]);
    calendar_views::deadline_list::render(f, app, content_chunks[1]);

    let in_command_mode = matches!(app.mode, Mode::Command);

    let status_text = if in_command_mode {
        app.command_buffer.to_string()
    } else {
        // List titles are truncated, so the full title of the highlighted one goes here.
        let selected = app
            .get_selected_event()
            .map(|event| format!("{} | ", event.label()))
            .unwrap_or_default();
        format!("{}Deadlines: {} | {} | Press 'q' to quit, '?' for help",
            selected, app.calendar.len(), sync_label(&app.sync_status))
    };

    let status_color = match (&app.sync_status, in_command_mode) {
        (_, true) => app.theme.command_mode,
        (SyncStatus::Error(_), false) => app.theme.error,
        _ => app.theme.status_bar,
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if in_command_mode { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }
}

fn sync_label(status: &SyncStatus) -> String {
    match status {
        SyncStatus::Synced => "Synced".to_string(),
        SyncStatus::Syncing => "Loading…".to_string(),
        SyncStatus::Error(e) => format!("Error: {}", e),
    }
}
