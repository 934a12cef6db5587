use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Timestamp, UserRef};

/// An approval or review request on a file.
///
/// Each assignee gets a [`TaskAssignment`] whose resolution state moves
/// independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub message: String,
    pub created_at: Timestamp,
    pub created_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<Timestamp>,
    #[serde(default, rename = "task_assignment_collection")]
    pub assignments: Collection<TaskAssignment>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pending: bool,
}

impl Task {
    /// Local stand-in for a task whose create request is in flight.
    pub fn placeholder(
        author: UserRef,
        message: impl Into<String>,
        assignees: Vec<UserRef>,
        due_at: Option<Timestamp>,
    ) -> Self {
        let entries: Vec<TaskAssignment> = assignees
            .into_iter()
            .map(|assigned_to| TaskAssignment {
                id: Uuid::new_v4().to_string(),
                assigned_to,
                resolution_state: ResolutionState::Incomplete,
                message: None,
            })
            .collect();
        Self {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            created_at: Timestamp::now(),
            created_by: author,
            due_at,
            assignments: Collection {
                total_count: entries.len() as u64,
                entries,
            },
            is_pending: true,
        }
    }

    pub fn assignment(&self, id: &str) -> Option<&TaskAssignment> {
        self.assignments.entries.iter().find(|a| a.id == id)
    }
}

/// One assignee's slot on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: String,
    pub assigned_to: UserRef,
    pub resolution_state: ResolutionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Where an assignee stands on a task.
///
/// - `Incomplete`: Not acted on yet
/// - `Complete` / `Done`: Internal codes the feed stores after an approve or
///   reject action
/// - `Approved` / `Rejected`: Statuses as reported by the approval UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionState {
    Incomplete,
    Complete,
    Done,
    Approved,
    Rejected,
}

impl ResolutionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
            Self::Done => "done",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "incomplete" => Some(Self::Incomplete),
            "complete" => Some(Self::Complete),
            "done" => Some(Self::Done),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}
