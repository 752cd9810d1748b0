use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::event::EventKind;
use crate::calendar::view_model::DeadlineCalendar;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeetingRequestError {
    #[error("Already booked {0}")]
    AlreadyBooked(NaiveDate),
    #[error("Cannot request {0}")]
    NotInFuture(NaiveDate),
}

/// A meeting can be requested for a day strictly after `today` that holds
/// no meeting yet. Deadlines do not block a day.
pub fn check_meeting_request(
    calendar: &DeadlineCalendar,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), MeetingRequestError> {
    if calendar.has_kind_on(EventKind::Meeting, date) {
        return Err(MeetingRequestError::AlreadyBooked(date));
    }

    if date <= today {
        return Err(MeetingRequestError::NotInFuture(date));
    }

    Ok(())
}
