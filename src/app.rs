use chrono::{Local, NaiveDate};

use crate::calendar::{
    check_meeting_request, CalendarEvent, DeadlineCalendar, EventsForDate, MeetingRequestError,
};
use crate::sync::deadline_loader::SourceUpdate;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error(String),
}

pub struct AppState {
    pub mode: Mode,
    pub title: String,
    pub selected_date: NaiveDate,
    pub calendar: DeadlineCalendar,
    pub selection: EventsForDate,
    pub selected_event_index: usize,
    pub sync_status: SyncStatus,
    pub command_buffer: String,
    pub message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
}

impl AppState {
    pub fn new(calendar: DeadlineCalendar) -> Self {
        let selected_date = Local::now().date_naive();
        let selection = calendar.select_date(selected_date);
        Self {
            mode: Mode::Normal,
            title: String::from("Deadlines"),
            selected_date,
            calendar,
            selection,
            selected_event_index: 0,
            sync_status: SyncStatus::Synced,
            command_buffer: String::new(),
            message: None,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.message = None;
        self.refresh_selection();
        self.reset_event_selection();
    }

    pub fn refresh_selection(&mut self) {
        self.selection = self.calendar.select_date(self.selected_date);
        let count = self.selection.len();
        if self.selected_event_index >= count {
            self.selected_event_index = count.saturating_sub(1);
        }
    }

    pub fn apply_update(&mut self, update: SourceUpdate) {
        if let Err(e) = &update.result {
            self.sync_status = SyncStatus::Error(format!("{} failed: {}", update.kind.heading(), e));
        }
        self.calendar.apply_update(update);
        self.refresh_selection();
    }

    pub fn events_for_selected_date(&self) -> Vec<&CalendarEvent> {
        self.selection.iter().collect()
    }

    pub fn get_selected_event(&self) -> Option<&CalendarEvent> {
        self.selection.iter().nth(self.selected_event_index)
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.selection.len();
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }

    /// Checks the selected day for a meeting request and records the
    /// outcome as the status message.
    pub fn check_meeting_request(&mut self, today: NaiveDate) -> Result<(), MeetingRequestError> {
        let result = check_meeting_request(&self.calendar, self.selected_date, today);
        self.message = Some(match &result {
            Ok(()) => format!("✅ {} is available", self.selected_date),
            Err(e) => format!("❌ {}", e),
        });
        result
    }
}
