use chrono::{Datelike, Days, Months};
use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

/// Keys whose effect needs the network; the session performs them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Refresh,
    RequestMeeting,
}

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => shift_days(state, -1),
        KeyCode::Char('l') | KeyCode::Right => shift_days(state, 1),
        KeyCode::Char('j') | KeyCode::Down => {
            if state.selection.is_empty() {
                shift_days(state, 7);
            } else {
                state.move_event_selection_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if state.selection.is_empty() {
                shift_days(state, -7);
            } else {
                state.move_event_selection_up();
            }
        }
        KeyCode::Char('J') => shift_days(state, 7),
        KeyCode::Char('K') => shift_days(state, -7),
        KeyCode::Char('t') => state.select_date(chrono::Local::now().date_naive()),
        KeyCode::Char('g') => move_to_start_of_month(state),
        KeyCode::Char('G') => move_to_end_of_month(state),
        KeyCode::Char('{') => shift_months(state, false),
        KeyCode::Char('}') => shift_months(state, true),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('r') => return Some(Action::Refresh),
        KeyCode::Char('m') => return Some(Action::RequestMeeting),
        _ => {}
    }
    None
}

fn shift_days(state: &mut AppState, days: i64) {
    let magnitude = Days::new(days.unsigned_abs());
    let target = if days < 0 {
        state.selected_date.checked_sub_days(magnitude)
    } else {
        state.selected_date.checked_add_days(magnitude)
    };
    if let Some(date) = target {
        state.select_date(date);
    }
}

fn shift_months(state: &mut AppState, forward: bool) {
    let target = if forward {
        state.selected_date.checked_add_months(Months::new(1))
    } else {
        state.selected_date.checked_sub_months(Months::new(1))
    };
    if let Some(date) = target {
        state.select_date(date);
    }
}

fn move_to_start_of_month(state: &mut AppState) {
    if let Some(first) = state.selected_date.with_day(1) {
        state.select_date(first);
    }
}

fn move_to_end_of_month(state: &mut AppState) {
    let last = state.selected_date
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt());
    if let Some(last) = last {
        state.select_date(last);
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarEvent, DeadlineCalendar, DedupKey, EventKind, Grouping};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn app_on(day: NaiveDate) -> AppState {
        let mut app = AppState::new(DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId));
        app.select_date(day);
        app
    }

    #[test]
    fn h_key_moves_to_previous_day() {
        let mut app = app_on(date(2025, 1, 1));
        handle_key(KeyCode::Char('h'), &mut app);
        assert_eq!(app.selected_date, date(2024, 12, 31));
    }

    #[test]
    fn l_key_moves_to_next_day() {
        let mut app = app_on(date(2025, 1, 15));
        handle_key(KeyCode::Char('l'), &mut app);
        assert_eq!(app.selected_date, date(2025, 1, 16));
    }

    #[test]
    fn j_key_moves_down_one_week_when_no_events() {
        let mut app = app_on(date(2025, 1, 15));
        handle_key(KeyCode::Char('j'), &mut app);
        assert_eq!(app.selected_date, date(2025, 1, 22));
    }

    #[test]
    fn j_key_moves_event_selection_when_day_has_events() {
        let day = date(2025, 1, 15);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Task, vec![
            CalendarEvent::new("t1", EventKind::Task, "A", day, "#ffc107"),
            CalendarEvent::new("t2", EventKind::Task, "B", day, "#ffc107"),
        ]);
        let mut app = AppState::new(calendar);
        app.select_date(day);

        handle_key(KeyCode::Char('j'), &mut app);

        assert_eq!(app.selected_date, day);
        assert_eq!(app.selected_event_index, 1);
    }

    #[test]
    fn right_brace_clamps_to_shorter_month() {
        let mut app = app_on(date(2025, 1, 31));
        handle_key(KeyCode::Char('}'), &mut app);
        assert_eq!(app.selected_date, date(2025, 2, 28));
    }

    #[test]
    fn left_brace_crosses_year_boundary() {
        let mut app = app_on(date(2025, 1, 10));
        handle_key(KeyCode::Char('{'), &mut app);
        assert_eq!(app.selected_date, date(2024, 12, 10));
    }

    #[test]
    fn g_and_shift_g_jump_to_month_edges() {
        let mut app = app_on(date(2024, 2, 10));
        handle_key(KeyCode::Char('G'), &mut app);
        assert_eq!(app.selected_date, date(2024, 2, 29));

        handle_key(KeyCode::Char('g'), &mut app);
        assert_eq!(app.selected_date, date(2024, 2, 1));
    }

    #[test]
    fn network_keys_return_actions() {
        let mut app = app_on(date(2025, 1, 15));
        assert_eq!(handle_key(KeyCode::Char('r'), &mut app), Some(Action::Refresh));
        assert_eq!(handle_key(KeyCode::Char('m'), &mut app), Some(Action::RequestMeeting));
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut app = app_on(date(2025, 1, 15));
        handle_key(KeyCode::Char(':'), &mut app);
        assert_eq!(app.mode, Mode::Command);
        assert_eq!(app.command_buffer, ":");
    }
}
