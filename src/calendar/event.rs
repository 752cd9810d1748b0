use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::summary::ProjectStage;

/// Which remote collection a calendar entry was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Project,
    Task,
    Meeting,
}

impl EventKind {
    /// Display marker. Only ever rendered, never parsed back into a kind.
    pub fn marker(&self) -> &'static str {
        match self {
            EventKind::Project => "📂",
            EventKind::Task => "🖊️",
            EventKind::Meeting => "📅",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Project => "project",
            EventKind::Task => "task",
            EventKind::Meeting => "meeting",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            EventKind::Project => "Project deadlines",
            EventKind::Task => "Task deadlines",
            EventKind::Meeting => "Meetings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    pub color: String,
    /// Workflow stage, only set on project deadlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<ProjectStage>,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        title: impl Into<String>,
        date: NaiveDate,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            date,
            color: color.into(),
            stage: None,
        }
    }

    pub fn with_stage(mut self, stage: ProjectStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.kind.marker(), self.title)
    }

    /// Identifier namespaced by source, e.g. `task:42`.
    pub fn scoped_id(&self) -> String {
        format!("{}:{}", self.kind.as_str(), self.id)
    }
}
