use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::DeadlineCalendar;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub deadline_count: usize,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn has_deadlines(&self) -> bool {
        self.deadline_count > 0
    }
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// Matches the length of the day's deadline list, so colliding ids count once.
fn deadline_count(calendar: &DeadlineCalendar, day: NaiveDate) -> usize {
    if calendar.has_events_on(day) {
        calendar.select_date(day).len()
    } else {
        0
    }
}

/// Monday-first grid covering the month of `selected`, padded with days of
/// the neighbouring months.
pub fn calculate_layout(calendar: &DeadlineCalendar, selected: NaiveDate, today: NaiveDate) -> MonthLayout {
    let year = selected.year();
    let month = selected.month();

    let Some(first) = first_of_month(selected) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };
    let lead = first.weekday().num_days_from_monday() as u64;
    let Some(mut day) = first.checked_sub_days(Days::new(lead)) else {
        return MonthLayout { year, month, weeks: Vec::new() };
    };

    let mut weeks = Vec::new();
    loop {
        let mut days = Vec::with_capacity(7);
        for _ in 0..7 {
            days.push(DayCell {
                date: day,
                is_selected: day == selected,
                is_today: day == today,
                deadline_count: deadline_count(calendar, day),
                is_current_month: day.month() == month && day.year() == year,
            });
            let Some(next) = day.succ_opt() else {
                weeks.push(Week { days });
                return MonthLayout { year, month, weeks };
            };
            day = next;
        }
        weeks.push(Week { days });

        if day.month() != month || day.year() != year {
            break;
        }
    }

    MonthLayout { year, month, weeks }
}
