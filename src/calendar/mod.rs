pub mod event;
pub mod summary;
pub mod deadlines;
pub mod view_model;
pub mod availability;
pub mod text;

pub use event::{CalendarEvent, EventKind};
pub use summary::{MeetingStatus, MeetingSummary, ProjectStage, ProjectSummary, TaskSummary};
pub use view_model::{DeadlineCalendar, DedupKey, EventsForDate, Grouping};
pub use availability::{check_meeting_request, MeetingRequestError};
pub use text::truncate_words;
