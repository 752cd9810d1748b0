pub mod calendar;
pub mod dashboard;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod app;

pub use calendar::{CalendarEvent, DeadlineCalendar, EventKind, EventsForDate, truncate_words};
pub use app::{AppState, Mode, SyncStatus};
pub use dashboard::{DashboardProfile, Role};
