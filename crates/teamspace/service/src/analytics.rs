//! Read-only task analytics, scoped to a workspace or a project.

use crate::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{ProjectId, Task, WorkspaceId};

/// Task counts for a workspace or project. Counts are zero when no
/// tasks match, never absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalytics {
    pub total_tasks: u64,
    pub overdue_tasks: u64,
    pub completed_tasks: u64,
}

/// Computes task counts over a consistent store snapshot
pub struct AnalyticsEngine {
    store: Arc<Store>,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Counts for every task in a workspace
    pub fn workspace_analytics(&self, workspace_id: &WorkspaceId) -> ServiceResult<TaskAnalytics> {
        let state = self.store.read()?;
        let now = Utc::now();
        Ok(count_tasks(&state.tasks_in_workspace(workspace_id), now))
    }

    /// Counts for every task in a project, after verifying the project
    /// belongs to the given workspace
    pub fn project_analytics(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<TaskAnalytics> {
        let state = self.store.read()?;
        if state
            .project_in_workspace(project_id, workspace_id)
            .is_none()
        {
            return Err(ServiceError::NotFound(
                "Project not found or does not belong to the workspace".into(),
            ));
        }
        let now = Utc::now();
        Ok(count_tasks(&state.tasks_in_project(project_id), now))
    }
}

/// One `now` snapshot classifies all three counts, so a task cannot
/// flip between overdue and completed mid-computation.
fn count_tasks(tasks: &[&Task], now: DateTime<Utc>) -> TaskAnalytics {
    let mut analytics = TaskAnalytics::default();
    for task in tasks {
        analytics.total_tasks += 1;
        if task.is_overdue(now) {
            analytics.overdue_tasks += 1;
        }
        if task.status.is_done() {
            analytics.completed_tasks += 1;
        }
    }
    analytics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use teamspace_types::{TaskStatus, UserId};

    fn task_with(status: TaskStatus, due_in_days: Option<i64>) -> Task {
        let mut task = Task::new(
            "t",
            ProjectId::new("p-1"),
            WorkspaceId::new("w-1"),
            UserId::new("u-1"),
        )
        .with_status(status);
        if let Some(days) = due_in_days {
            task = task.with_due_date(Utc::now() + Duration::days(days));
        }
        task
    }

    #[test]
    fn test_counts_never_exceed_total() {
        let tasks = vec![
            task_with(TaskStatus::Done, None),
            task_with(TaskStatus::Done, Some(-3)),
            task_with(TaskStatus::Todo, Some(-1)),
            task_with(TaskStatus::Todo, Some(2)),
            task_with(TaskStatus::InProgress, None),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let analytics = count_tasks(&refs, Utc::now());

        assert_eq!(analytics.total_tasks, 5);
        assert!(analytics.overdue_tasks + analytics.completed_tasks <= analytics.total_tasks);
        // A Done task past its due date counts as completed, not overdue.
        assert_eq!(analytics.overdue_tasks, 1);
        assert_eq!(analytics.completed_tasks, 2);
    }

    #[test]
    fn test_empty_scope_is_all_zeroes() {
        let analytics = count_tasks(&[], Utc::now());
        assert_eq!(analytics, TaskAnalytics::default());
    }
}
