//! Mapping from remote summaries to calendar events.
//!
//! Records whose date cannot be read are dropped rather than coerced, so a
//! bad record shrinks the calendar instead of landing on a wrong day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::calendar::event::{CalendarEvent, EventKind};
use crate::calendar::summary::{MeetingStatus, MeetingSummary, ProjectSummary, TaskSummary};

pub const PROJECT_DEADLINE_COLOR: &str = "#3f7dd7";
pub const TASK_COMPLETED_COLOR: &str = "#6ad36e";
pub const TASK_OPEN_COLOR: &str = "#ffc107";
pub const MEETING_PENDING_COLOR: &str = "#ffc107";
pub const MEETING_ACCEPTED_COLOR: &str = "#28a745";
pub const MEETING_REJECTED_COLOR: &str = "#dc3545";

/// Reads the calendar date of an ISO date or datetime.
///
/// Offsets are honoured and the result is the UTC calendar date; naive
/// datetimes are taken to be UTC already.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn project_event(project: &ProjectSummary) -> Option<CalendarEvent> {
    let Some(date) = parse_calendar_date(&project.end_date) else {
        tracing::warn!("Dropping project {}: unreadable end date {:?}", project.id, project.end_date);
        return None;
    };

    Some(CalendarEvent::new(
        project.id.clone(),
        EventKind::Project,
        format!("{} Deadline", project.title),
        date,
        PROJECT_DEADLINE_COLOR,
    ).with_stage(project.stage()))
}

pub fn task_event(task: &TaskSummary) -> Option<CalendarEvent> {
    let Some(date) = parse_calendar_date(&task.due_date) else {
        tracing::warn!("Dropping task {}: unreadable due date {:?}", task.id, task.due_date);
        return None;
    };

    let color = if task.is_completed() { TASK_COMPLETED_COLOR } else { TASK_OPEN_COLOR };

    Some(CalendarEvent::new(
        task.id.clone(),
        EventKind::Task,
        format!("Task {} Deadline", task.title),
        date,
        color,
    ))
}

pub fn meeting_event(meeting: &MeetingSummary) -> Option<CalendarEvent> {
    let (title, color) = match meeting.meeting_status()? {
        MeetingStatus::Pending => ("Requested Meeting", MEETING_PENDING_COLOR),
        MeetingStatus::Accepted => ("Accepted Meeting", MEETING_ACCEPTED_COLOR),
        MeetingStatus::Rejected => ("Rejected Meeting", MEETING_REJECTED_COLOR),
    };

    let Some(date) = parse_calendar_date(&meeting.meeting_date) else {
        tracing::warn!("Dropping meeting {}: unreadable date {:?}", meeting.id, meeting.meeting_date);
        return None;
    };

    Some(CalendarEvent::new(meeting.id.clone(), EventKind::Meeting, title, date, color))
}

pub fn project_events<'a>(projects: impl IntoIterator<Item = &'a ProjectSummary>) -> Vec<CalendarEvent> {
    projects.into_iter().filter_map(project_event).collect()
}

pub fn task_events<'a>(tasks: impl IntoIterator<Item = &'a TaskSummary>) -> Vec<CalendarEvent> {
    tasks.into_iter().filter_map(task_event).collect()
}

/// Meetings are grouped pending, then accepted, then rejected.
pub fn meeting_events<'a>(meetings: impl IntoIterator<Item = &'a MeetingSummary>) -> Vec<CalendarEvent> {
    let mut events: Vec<(MeetingStatus, CalendarEvent)> = meetings
        .into_iter()
        .filter_map(|m| Some((m.meeting_status()?, meeting_event(m)?)))
        .collect();

    events.sort_by_key(|(status, _)| match status {
        MeetingStatus::Pending => 0,
        MeetingStatus::Accepted => 1,
        MeetingStatus::Rejected => 2,
    });

    events.into_iter().map(|(_, event)| event).collect()
}
