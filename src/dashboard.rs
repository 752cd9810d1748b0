use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{DedupKey, Grouping};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Photographer,
    Editor,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Photographer => "photographer",
            Role::Editor => "editor",
            Role::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "photographer" => Ok(Role::Photographer),
            "editor" => Ok(Role::Editor),
            "client" => Ok(Role::Client),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Which sources a dashboard's calendar pulls from and how it presents a day.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardProfile {
    pub role: Role,
    pub project_endpoints: Vec<String>,
    pub task_endpoint: Option<String>,
    pub include_meetings: bool,
    pub grouping: Grouping,
    pub dedup: DedupKey,
}

impl DashboardProfile {
    /// Only the staff dashboards carry a deadline calendar; admin and
    /// client fall back to the photographer layout.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Manager => Self {
                role,
                project_endpoints: vec![
                    "/api/pending-projects".to_string(),
                    "/api/pending-projects/active".to_string(),
                    "/api/pending-projects/all-finished".to_string(),
                ],
                task_endpoint: Some("/api/tasks/all".to_string()),
                include_meetings: true,
                grouping: Grouping::ByKind,
                dedup: DedupKey::SourceId,
            },
            Role::Editor => Self {
                role,
                project_endpoints: vec![
                    "/api/active_projects".to_string(),
                    "/api/finished_projects".to_string(),
                ],
                task_endpoint: Some("/api/tasks/assigned".to_string()),
                include_meetings: false,
                grouping: Grouping::ByKind,
                dedup: DedupKey::SourceId,
            },
            Role::Photographer | Role::Admin | Role::Client => Self {
                role,
                project_endpoints: vec![
                    "/api/my-active-projects".to_string(),
                    "/api/finished_projects".to_string(),
                ],
                task_endpoint: Some("/api/tasks/assigned".to_string()),
                include_meetings: false,
                grouping: Grouping::Merged,
                dedup: DedupKey::SourceId,
            },
        }
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupKey) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn title(&self) -> String {
        match self.role {
            Role::Manager => "Manager Calendar".to_string(),
            Role::Editor => "Editor Calendar".to_string(),
            _ => "Photographer Calendar".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photographer_keeps_one_merged_list() {
        let profile = DashboardProfile::for_role(Role::Photographer);

        assert_eq!(profile.grouping, Grouping::Merged);
        assert_eq!(profile.project_endpoints, vec!["/api/my-active-projects", "/api/finished_projects"]);
        assert_eq!(profile.task_endpoint.as_deref(), Some("/api/tasks/assigned"));
        assert!(!profile.include_meetings);
    }

    #[test]
    fn manager_splits_by_kind_and_loads_meetings() {
        let profile = DashboardProfile::for_role(Role::Manager);

        assert_eq!(profile.grouping, Grouping::ByKind);
        assert_eq!(profile.project_endpoints.len(), 3);
        assert!(profile.include_meetings);
    }

    #[test]
    fn editor_splits_by_kind() {
        assert_eq!(DashboardProfile::for_role(Role::Editor).grouping, Grouping::ByKind);
    }

    #[test]
    fn overrides_apply() {
        let profile = DashboardProfile::for_role(Role::Editor)
            .with_grouping(Grouping::Merged)
            .with_dedup(DedupKey::KindScoped);

        assert_eq!(profile.grouping, Grouping::Merged);
        assert_eq!(profile.dedup, DedupKey::KindScoped);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Manager".parse::<Role>(), Ok(Role::Manager));
        assert!("janitor".parse::<Role>().is_err());
    }
}
