use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub status: String,
}

/// Workflow stage derived from a project's `status` and numeric `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStage {
    Finished,
    Pending,
    AwaitingPayment,
    Photographing,
    Editing,
    Unknown,
}

impl ProjectStage {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStage::Finished => "Finished",
            ProjectStage::Pending => "Pending",
            ProjectStage::AwaitingPayment => "Awaiting Payment",
            ProjectStage::Photographing => "Photographing",
            ProjectStage::Editing => "Editing",
            ProjectStage::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ProjectStage::Finished => "#5cb85c",
            ProjectStage::Photographing => "#f0ad4e",
            ProjectStage::Editing => "#5bc0de",
            _ => "#f28b82",
        }
    }
}

impl ProjectSummary {
    pub fn stage(&self) -> ProjectStage {
        match (self.status.as_str(), self.state) {
            ("finished", _) => ProjectStage::Finished,
            ("pending", -1) => ProjectStage::Pending,
            ("pending", 0) => ProjectStage::AwaitingPayment,
            (_, 1) => ProjectStage::Photographing,
            (_, 2) => ProjectStage::Editing,
            _ => ProjectStage::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub status: String,
}

impl TaskSummary {
    pub fn is_completed(&self) -> bool {
        self.status == "Completed"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub id: String,
    #[serde(default)]
    pub meeting_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl MeetingSummary {
    pub fn meeting_status(&self) -> Option<MeetingStatus> {
        match self.status.as_str() {
            "pending" => Some(MeetingStatus::Pending),
            "accepted" => Some(MeetingStatus::Accepted),
            "rejected" => Some(MeetingStatus::Rejected),
            _ => None,
        }
    }
}
