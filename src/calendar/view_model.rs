use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::event::{CalendarEvent, EventKind};
use crate::sync::deadline_loader::SourceUpdate;

/// What two events must share to count as duplicates on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupKey {
    /// Bare remote id. A task and a project sharing an id collapse into
    /// whichever of the two was appended last.
    #[default]
    SourceId,
    /// `kind:id`, so different sources never shadow each other.
    KindScoped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    Merged,
    ByKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventsForDate {
    Merged(Vec<CalendarEvent>),
    ByKind(BTreeMap<EventKind, Vec<CalendarEvent>>),
}

impl EventsForDate {
    pub fn len(&self) -> usize {
        match self {
            EventsForDate::Merged(events) => events.len(),
            EventsForDate::ByKind(groups) => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Events in display order: as selected when merged, kind by kind otherwise.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &CalendarEvent> + '_> {
        match self {
            EventsForDate::Merged(events) => Box::new(events.iter()),
            EventsForDate::ByKind(groups) => Box::new(groups.values().flatten()),
        }
    }

    pub fn of_kind(&self, kind: EventKind) -> Vec<&CalendarEvent> {
        match self {
            EventsForDate::Merged(events) => events.iter().filter(|e| e.kind == kind).collect(),
            EventsForDate::ByKind(groups) => groups
                .get(&kind)
                .map(|events| events.iter().collect())
                .unwrap_or_default(),
        }
    }
}

/// Deadline events of one dashboard, derived from the latest result of
/// each source.
///
/// Sources are kept in arrival order. Re-applying a source replaces its
/// previous result and moves it to the back, so recomputing never
/// duplicates entries and the most recent arrival wins de-duplication.
#[derive(Debug, Clone)]
pub struct DeadlineCalendar {
    grouping: Grouping,
    dedup: DedupKey,
    sources: Vec<(EventKind, Vec<CalendarEvent>)>,
}

impl DeadlineCalendar {
    pub fn new(grouping: Grouping, dedup: DedupKey) -> Self {
        Self {
            grouping,
            dedup,
            sources: Vec::new(),
        }
    }

    pub fn apply(&mut self, kind: EventKind, events: Vec<CalendarEvent>) {
        self.sources.retain(|(k, _)| *k != kind);
        tracing::debug!("Applying {} {} events", events.len(), kind.as_str());
        self.sources.push((kind, events));
    }

    /// A failed source keeps whatever it had loaded before.
    pub fn apply_update(&mut self, update: SourceUpdate) {
        match update.result {
            Ok(events) => self.apply(update.kind, events),
            Err(e) => {
                tracing::warn!("Keeping previous {} events: {}", update.kind.as_str(), e);
            }
        }
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn is_loaded(&self, kind: EventKind) -> bool {
        self.sources.iter().any(|(k, _)| *k == kind)
    }

    pub fn events(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.sources.iter().flat_map(|(_, events)| events.iter())
    }

    pub fn len(&self) -> usize {
        self.sources.iter().map(|(_, events)| events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.events().any(|e| e.date == date)
    }

    pub fn has_kind_on(&self, kind: EventKind, date: NaiveDate) -> bool {
        self.events().any(|e| e.kind == kind && e.date == date)
    }

    pub fn select_date(&self, date: NaiveDate) -> EventsForDate {
        let selected = dedup_last_write_wins(self.events().filter(|e| e.date == date), self.dedup);

        match self.grouping {
            Grouping::Merged => EventsForDate::Merged(selected),
            Grouping::ByKind => {
                let mut groups: BTreeMap<EventKind, Vec<CalendarEvent>> = BTreeMap::new();
                for event in selected {
                    groups.entry(event.kind).or_default().push(event);
                }
                EventsForDate::ByKind(groups)
            }
        }
    }

    /// Selects by ISO date string; `None` if it is not a `YYYY-MM-DD` date.
    pub fn select_date_str(&self, date: &str) -> Option<EventsForDate> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .map(|d| self.select_date(d))
    }
}

/// Keeps one event per key: the value of the last duplicate at the
/// position of the first.
fn dedup_last_write_wins<'a>(
    events: impl Iterator<Item = &'a CalendarEvent>,
    key: DedupKey,
) -> Vec<CalendarEvent> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<CalendarEvent> = Vec::new();

    for event in events {
        let k = match key {
            DedupKey::SourceId => event.id.clone(),
            DedupKey::KindScoped => event.scoped_id(),
        };

        match positions.get(&k) {
            Some(&idx) => result[idx] = event.clone(),
            None => {
                positions.insert(k, result.len());
                result.push(event.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::deadlines::{project_events, task_events};
    use crate::calendar::summary::{ProjectSummary, TaskSummary};
    use crate::sync::deadline_loader::LoadError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event(id: &str, kind: EventKind, date: NaiveDate) -> CalendarEvent {
        CalendarEvent::new(id, kind, format!("{} Deadline", id), date, "#000000")
    }

    #[test]
    fn new_calendar_is_empty() {
        let calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);

        assert!(calendar.is_empty());
        assert!(calendar.select_date(date(2024, 3, 20)).is_empty());
    }

    #[test]
    fn merged_size_is_sum_of_sources() {
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Project, vec![
            event("p1", EventKind::Project, date(2024, 3, 20)),
            event("p2", EventKind::Project, date(2024, 3, 21)),
        ]);
        calendar.apply(EventKind::Task, vec![event("t1", EventKind::Task, date(2024, 3, 20))]);

        assert_eq!(calendar.len(), 3);
    }

    #[test]
    fn reapplying_a_source_replaces_it() {
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        let projects = vec![event("p1", EventKind::Project, date(2024, 3, 20))];

        calendar.apply(EventKind::Project, projects.clone());
        calendar.apply(EventKind::Project, projects);

        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn select_date_only_returns_matching_events() {
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Project, vec![
            event("p1", EventKind::Project, date(2024, 3, 20)),
            event("p2", EventKind::Project, date(2024, 3, 21)),
        ]);

        let selected = calendar.select_date(date(2024, 3, 20));

        let ids: Vec<&str> = selected.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[test]
    fn colliding_ids_resolve_to_later_appended_source() {
        let day = date(2024, 3, 20);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Project, vec![event("p1", EventKind::Project, day)]);
        calendar.apply(EventKind::Task, vec![event("p1", EventKind::Task, day)]);

        let selected = calendar.select_date(day);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected.iter().next().map(|e| e.kind), Some(EventKind::Task));
    }

    #[test]
    fn late_reapply_takes_precedence() {
        let day = date(2024, 3, 20);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Project, vec![event("x", EventKind::Project, day)]);
        calendar.apply(EventKind::Task, vec![event("x", EventKind::Task, day)]);
        calendar.apply(EventKind::Project, vec![event("x", EventKind::Project, day)]);

        let selected = calendar.select_date(day);

        assert_eq!(selected.of_kind(EventKind::Project).len(), 1);
        assert!(selected.of_kind(EventKind::Task).is_empty());
    }

    #[test]
    fn kind_scoped_key_keeps_both_sources() {
        let day = date(2024, 3, 20);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::KindScoped);
        calendar.apply(EventKind::Project, vec![event("p1", EventKind::Project, day)]);
        calendar.apply(EventKind::Task, vec![event("p1", EventKind::Task, day)]);

        assert_eq!(calendar.select_date(day).len(), 2);
    }

    #[test]
    fn duplicate_keeps_first_position_with_last_value() {
        let day = date(2024, 3, 20);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        let mut later = event("a", EventKind::Task, day);
        later.title = "replacement".to_string();
        calendar.apply(EventKind::Task, vec![
            event("a", EventKind::Task, day),
            event("b", EventKind::Task, day),
            later,
        ]);

        let EventsForDate::Merged(selected) = calendar.select_date(day) else {
            panic!("expected merged selection");
        };

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].title, "replacement");
        assert_eq!(selected[1].id, "b");
    }

    #[test]
    fn by_kind_grouping_partitions_after_dedup() {
        let day = date(2024, 3, 20);
        let mut calendar = DeadlineCalendar::new(Grouping::ByKind, DedupKey::SourceId);
        calendar.apply(EventKind::Project, vec![
            event("p1", EventKind::Project, day),
            event("shared", EventKind::Project, day),
        ]);
        calendar.apply(EventKind::Task, vec![
            event("t1", EventKind::Task, day),
            event("shared", EventKind::Task, day),
        ]);

        let selected = calendar.select_date(day);

        assert!(matches!(selected, EventsForDate::ByKind(_)));
        assert_eq!(selected.of_kind(EventKind::Project).len(), 1);
        assert_eq!(selected.of_kind(EventKind::Task).len(), 2);
    }

    #[test]
    fn failed_update_keeps_previous_events() {
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Task, vec![event("t1", EventKind::Task, date(2024, 3, 20))]);

        calendar.apply_update(SourceUpdate {
            kind: EventKind::Task,
            result: Err(LoadError::AllFailed(EventKind::Task)),
        });

        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn select_date_str_rejects_non_dates() {
        let calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);

        assert!(calendar.select_date_str("2024-03-20").is_some());
        assert!(calendar.select_date_str("20/03/2024").is_none());
    }

    #[test]
    fn has_events_on_matches_exact_day() {
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
        calendar.apply(EventKind::Task, vec![
            event("t1", EventKind::Task, date(2024, 3, 20)),
            event("t2", EventKind::Task, date(2024, 3, 22)),
        ]);

        assert!(calendar.has_events_on(date(2024, 3, 20)));
        assert!(!calendar.has_events_on(date(2024, 3, 21)));
    }

    proptest! {
        #[test]
        fn selection_never_contains_other_days(
            days in prop::collection::vec(1u32..=5, 0..30),
            pick in 1u32..=5,
        ) {
            let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::KindScoped);
            let events: Vec<CalendarEvent> = days
                .iter()
                .enumerate()
                .map(|(i, d)| event(&i.to_string(), EventKind::Task, date(2024, 3, *d)))
                .collect();
            let expected = days.iter().filter(|d| **d == pick).count();
            calendar.apply(EventKind::Task, events);

            let selected = calendar.select_date(date(2024, 3, pick));

            prop_assert!(selected.iter().all(|e| e.date == date(2024, 3, pick)));
            prop_assert_eq!(selected.len(), expected);
        }

        #[test]
        fn disjoint_sources_merge_to_their_sum(
            project_days in prop::collection::vec(1u32..=7, 0..20),
            task_days in prop::collection::vec(1u32..=7, 0..20),
        ) {
            let projects: Vec<ProjectSummary> = project_days
                .iter()
                .enumerate()
                .map(|(i, d)| ProjectSummary {
                    id: format!("p{}", i),
                    title: format!("Shoot {}", i),
                    end_date: format!("2024-03-{:02}", d),
                    state: 1,
                    status: "active".to_string(),
                })
                .collect();
            let tasks: Vec<TaskSummary> = task_days
                .iter()
                .enumerate()
                .map(|(i, d)| TaskSummary {
                    id: format!("t{}", i),
                    title: format!("Edit {}", i),
                    due_date: format!("2024-03-{:02}T12:00:00Z", d),
                    status: "Pending".to_string(),
                })
                .collect();

            let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);
            calendar.apply(EventKind::Project, project_events(&projects));
            calendar.apply(EventKind::Task, task_events(&tasks));

            prop_assert_eq!(calendar.len(), projects.len() + tasks.len());

            let selected_total: usize = (1u32..=7)
                .map(|d| calendar.select_date(date(2024, 3, d)).len())
                .sum();
            prop_assert_eq!(selected_total, projects.len() + tasks.len());
        }
    }
}
