//! Task records and their status/priority enumerations.

use crate::{ProjectId, TaskId, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a task. `Done` is the terminal state analytics
/// treats as completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Backlog,
    #[default]
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// Whether the task has reached the terminal completed state
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

/// Priority of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A unit of work scoped to a project and its workspace
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identity
    pub id: TaskId,
    /// Short human-facing tag, e.g. "task-3f9a"
    pub task_code: String,
    /// Title of the task
    pub title: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The project this task belongs to
    pub project_id: ProjectId,
    /// The workspace this task belongs to (denormalized for scoped
    /// scans and cascade deletion)
    pub workspace_id: WorkspaceId,
    /// Current workflow status
    pub status: TaskStatus,
    /// Priority
    pub priority: TaskPriority,
    /// Optional assignee; must be a member of the workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,
    /// Who created the task
    pub created_by: UserId,
    /// Optional due date; tasks past it and not Done count as overdue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the given project and workspace
    pub fn new(
        title: impl Into<String>,
        project_id: ProjectId,
        workspace_id: WorkspaceId,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::generate(),
            task_code: Self::generate_task_code(),
            title: title.into(),
            description: None,
            project_id,
            workspace_id,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assigned_to: None,
            created_by,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a short task code ("task-" plus 4 hex chars)
    pub fn generate_task_code() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        format!("task-{}", &hex[..4])
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Whether the task is overdue relative to `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && !self.status.is_done(),
            None => false,
        }
    }
}
