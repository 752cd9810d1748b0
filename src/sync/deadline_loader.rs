use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::calendar::deadlines::{meeting_events, project_events, task_events};
use crate::calendar::{CalendarEvent, DeadlineCalendar, EventKind};
use crate::dashboard::DashboardProfile;
use crate::sync::session::Session;
use crate::sync::studio_api::{ApiError, StudioApi};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("every {} endpoint failed", .0.as_str())]
    AllFailed(EventKind),
    #[error("no {} source configured", .0.as_str())]
    NotConfigured(EventKind),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
}

/// Result of one source, delivered in completion order.
#[derive(Debug)]
pub struct SourceUpdate {
    pub kind: EventKind,
    pub result: Result<Vec<CalendarEvent>, LoadError>,
}

pub struct DeadlineLoader {
    api: Arc<dyn StudioApi>,
    session: Session,
    profile: DashboardProfile,
}

impl DeadlineLoader {
    pub fn new(api: Arc<dyn StudioApi>, session: Session, profile: DashboardProfile) -> Self {
        Self { api, session, profile }
    }

    pub fn profile(&self) -> &DashboardProfile {
        &self.profile
    }

    pub fn sources(&self) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        if !self.profile.project_endpoints.is_empty() {
            kinds.push(EventKind::Project);
        }
        if self.profile.task_endpoint.is_some() {
            kinds.push(EventKind::Task);
        }
        if self.profile.include_meetings {
            kinds.push(EventKind::Meeting);
        }
        kinds
    }

    /// Fetches every project endpoint at once. A failing endpoint only
    /// loses its own projects.
    pub async fn load_project_deadlines(&self) -> Result<Vec<CalendarEvent>, LoadError> {
        if self.profile.project_endpoints.is_empty() {
            return Err(LoadError::NotConfigured(EventKind::Project));
        }

        let fetches = self.profile.project_endpoints.iter().map(|endpoint| async move {
            (endpoint, self.api.fetch_projects(&self.session, endpoint).await)
        });

        let mut events = Vec::new();
        let mut succeeded = 0;

        for (endpoint, result) in join_all(fetches).await {
            match result {
                Ok(projects) => {
                    succeeded += 1;
                    events.extend(project_events(&projects));
                }
                Err(e) => {
                    tracing::warn!("Project deadlines from {} failed: {}", endpoint, e);
                }
            }
        }

        if succeeded == 0 {
            return Err(LoadError::AllFailed(EventKind::Project));
        }

        tracing::info!("Loaded {} project deadlines", events.len());
        Ok(events)
    }

    pub async fn load_task_deadlines(&self) -> Result<Vec<CalendarEvent>, LoadError> {
        let endpoint = self.profile.task_endpoint.as_deref()
            .ok_or(LoadError::NotConfigured(EventKind::Task))?;

        let tasks = self.api.fetch_tasks(&self.session, endpoint).await?;
        let events = task_events(&tasks);

        tracing::info!("Loaded {} of {} task deadlines", events.len(), tasks.len());
        Ok(events)
    }

    pub async fn load_meeting_events(&self) -> Result<Vec<CalendarEvent>, LoadError> {
        if !self.profile.include_meetings {
            return Err(LoadError::NotConfigured(EventKind::Meeting));
        }

        let meetings = self.api.fetch_meetings(&self.session).await?;
        let events = meeting_events(&meetings);

        tracing::info!("Loaded {} meetings", events.len());
        Ok(events)
    }

    pub async fn request_meeting(&self, date: NaiveDate, message: &str) -> Result<(), LoadError> {
        if !self.profile.include_meetings {
            return Err(LoadError::NotConfigured(EventKind::Meeting));
        }
        self.api.request_meeting(&self.session, date, message).await?;
        tracing::info!("Requested meeting on {}", date);
        Ok(())
    }

    pub async fn load(&self, kind: EventKind) -> Result<Vec<CalendarEvent>, LoadError> {
        match kind {
            EventKind::Project => self.load_project_deadlines().await,
            EventKind::Task => self.load_task_deadlines().await,
            EventKind::Meeting => self.load_meeting_events().await,
        }
    }

    /// Starts one task per configured source.
    pub fn spawn(self: &Arc<Self>) -> LoadHandle {
        let (tx, rx) = mpsc::unbounded_channel();

        let tasks = self.sources()
            .into_iter()
            .map(|kind| {
                let loader = Arc::clone(self);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = loader.load(kind).await;
                    if tx.send(SourceUpdate { kind, result }).is_err() {
                        tracing::debug!("Discarding {} result, view is gone", kind.as_str());
                    }
                })
            })
            .collect();

        LoadHandle {
            rx,
            tasks,
            complete: false,
        }
    }

    /// Loads every source and applies results as they arrive.
    pub async fn load_into(self: &Arc<Self>, calendar: &mut DeadlineCalendar) {
        let mut handle = self.spawn();
        while let Some(update) = handle.next().await {
            calendar.apply_update(update);
        }
    }
}

/// In-flight loads of one view. Dropping it aborts whatever has not
/// finished, so nothing lands after the view is torn down.
pub struct LoadHandle {
    rx: mpsc::UnboundedReceiver<SourceUpdate>,
    tasks: Vec<JoinHandle<()>>,
    complete: bool,
}

impl LoadHandle {
    /// Next finished source, or `None` once every source has reported.
    pub async fn next(&mut self) -> Option<SourceUpdate> {
        let update = self.rx.recv().await;
        if update.is_none() {
            self.complete = true;
        }
        update
    }

    /// Non-blocking variant for render loops.
    pub fn drain(&mut self) -> Vec<SourceUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(update) => updates.push(update),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.complete = true;
                    break;
                }
            }
        }
        updates
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn abort(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DedupKey, Grouping, MeetingSummary, ProjectSummary, TaskSummary};
    use crate::dashboard::Role;
    use crate::sync::studio_api::MockStudioApi;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn project(id: &str, end_date: &str) -> ProjectSummary {
        ProjectSummary {
            id: id.to_string(),
            title: format!("Project {}", id),
            end_date: end_date.to_string(),
            state: 1,
            status: "active".to_string(),
        }
    }

    fn task(id: &str, due_date: &str) -> TaskSummary {
        TaskSummary {
            id: id.to_string(),
            title: format!("Task {}", id),
            due_date: due_date.to_string(),
            status: "Pending".to_string(),
        }
    }

    fn loader(api: MockStudioApi, role: Role) -> Arc<DeadlineLoader> {
        Arc::new(DeadlineLoader::new(
            Arc::new(api),
            Session::new("token"),
            DashboardProfile::for_role(role),
        ))
    }

    #[tokio::test]
    async fn failing_finished_fetch_keeps_active_projects() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_projects()
            .times(2)
            .returning(|_, endpoint| {
                if endpoint == "/api/finished_projects" {
                    Err(ApiError::RequestError("Status 500: boom".to_string()))
                } else {
                    Ok(vec![project("a1", "2024-03-20"), project("a2", "2024-03-22")])
                }
            });

        let events = loader(api, Role::Photographer).load_project_deadlines().await.unwrap();

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn all_project_endpoints_failing_is_an_error() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_projects()
            .returning(|_, _| Err(ApiError::AuthenticationFailed));

        let result = loader(api, Role::Photographer).load_project_deadlines().await;

        assert!(matches!(result, Err(LoadError::AllFailed(EventKind::Project))));
    }

    #[tokio::test]
    async fn tasks_with_bad_due_dates_are_excluded() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_tasks()
            .times(1)
            .returning(|_, endpoint| {
                assert_eq!(endpoint, "/api/tasks/assigned");
                Ok(vec![task("t1", "2024-03-20T10:00:00Z"), task("t2", "tomorrow")])
            });

        let events = loader(api, Role::Photographer).load_task_deadlines().await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date(2024, 3, 20));
    }

    #[tokio::test]
    async fn photographer_does_not_load_meetings() {
        let api = MockStudioApi::new();

        let result = loader(api, Role::Photographer).load_meeting_events().await;

        assert!(matches!(result, Err(LoadError::NotConfigured(EventKind::Meeting))));
    }

    #[tokio::test]
    async fn manager_sources_include_meetings() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_meetings().returning(|_| {
            Ok(vec![MeetingSummary {
                id: "m1".to_string(),
                meeting_date: "2024-03-25".to_string(),
                status: "accepted".to_string(),
                message: None,
            }])
        });
        let loader = loader(api, Role::Manager);

        assert_eq!(loader.sources(), vec![EventKind::Project, EventKind::Task, EventKind::Meeting]);
        let events = loader.load_meeting_events().await.unwrap();
        assert_eq!(events[0].kind, EventKind::Meeting);
    }

    #[tokio::test]
    async fn load_into_merges_both_sources() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_projects()
            .returning(|_, endpoint| {
                if endpoint == "/api/my-active-projects" {
                    Ok(vec![project("p1", "2024-03-20")])
                } else {
                    Ok(vec![project("p2", "2024-03-21")])
                }
            });
        api.expect_fetch_tasks()
            .returning(|_, _| Ok(vec![task("t1", "2024-03-20T08:00:00Z")]));
        let loader = loader(api, Role::Photographer);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);

        loader.load_into(&mut calendar).await;

        assert_eq!(calendar.len(), 3);
        assert_eq!(calendar.select_date(date(2024, 3, 20)).len(), 2);
    }

    #[tokio::test]
    async fn failed_task_source_leaves_projects_visible() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_projects()
            .returning(|_, _| Ok(vec![project("p1", "2024-03-20")]));
        api.expect_fetch_tasks()
            .returning(|_, _| Err(ApiError::RateLimited));
        let loader = loader(api, Role::Photographer);
        let mut calendar = DeadlineCalendar::new(Grouping::Merged, DedupKey::SourceId);

        loader.load_into(&mut calendar).await;

        assert!(calendar.is_loaded(EventKind::Project));
        assert!(!calendar.is_loaded(EventKind::Task));
    }

    #[tokio::test]
    async fn handle_completes_after_all_sources_report() {
        let mut api = MockStudioApi::new();
        api.expect_fetch_projects().returning(|_, _| Ok(vec![]));
        api.expect_fetch_tasks().returning(|_, _| Ok(vec![]));
        let mut handle = loader(api, Role::Photographer).spawn();

        let mut kinds = Vec::new();
        while let Some(update) = handle.next().await {
            kinds.push(update.kind);
        }
        kinds.sort();

        assert!(handle.is_complete());
        assert_eq!(kinds, vec![EventKind::Project, EventKind::Task]);
    }

    #[tokio::test]
    async fn request_meeting_posts_for_manager() {
        let mut api = MockStudioApi::new();
        api.expect_request_meeting()
            .times(1)
            .returning(|_, date, message| {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
                assert_eq!(message, "Album review");
                Ok(())
            });
        let loader = loader(api, Role::Manager);

        loader.request_meeting(date(2024, 5, 2), "Album review").await.unwrap();
    }

    #[tokio::test]
    async fn request_meeting_needs_meeting_profile() {
        let api = MockStudioApi::new();
        let loader = loader(api, Role::Photographer);

        let err = loader.request_meeting(date(2024, 5, 2), "Hi").await.unwrap_err();

        assert!(matches!(err, LoadError::NotConfigured(EventKind::Meeting)));
    }
}
