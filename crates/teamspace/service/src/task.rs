//! Task operations, scoped to a project and its workspace.

use crate::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{ProjectId, Task, TaskId, TaskPriority, TaskStatus, UserId, WorkspaceId};
use tracing::info;

/// Payload for creating a task
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Payload for a partial task update
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Task CRUD with project/workspace-scope checks on every operation
pub struct TaskManager {
    store: Arc<Store>,
}

impl TaskManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a task in a project. The project must belong to the
    /// workspace, and an assignee must be a member of it.
    pub fn create(
        &self,
        creator: &UserId,
        workspace_id: &WorkspaceId,
        project_id: &ProjectId,
        input: CreateTaskInput,
    ) -> ServiceResult<Task> {
        let task = self.store.transaction(|state| {
            if state
                .project_in_workspace(project_id, workspace_id)
                .is_none()
            {
                return Err(ServiceError::NotFound(
                    "Project not found or does not belong to the workspace".into(),
                ));
            }
            if let Some(assignee) = &input.assigned_to {
                if state.member(assignee, workspace_id).is_none() {
                    return Err(ServiceError::NotFound(
                        "Assigned user is not a member of this workspace".into(),
                    ));
                }
            }

            let mut task = Task::new(
                input.title,
                project_id.clone(),
                workspace_id.clone(),
                creator.clone(),
            );
            if let Some(description) = input.description {
                task = task.with_description(description);
            }
            if let Some(status) = input.status {
                task = task.with_status(status);
            }
            if let Some(priority) = input.priority {
                task = task.with_priority(priority);
            }
            if let Some(assignee) = input.assigned_to {
                task = task.with_assignee(assignee);
            }
            if let Some(due_date) = input.due_date {
                task = task.with_due_date(due_date);
            }

            state.insert_task(task.clone());
            Ok::<_, ServiceError>(task)
        })?;

        info!(task = %task.id, project = %project_id, "task created");
        Ok(task)
    }

    /// Get a task, verifying project and workspace scope
    pub fn get(
        &self,
        task_id: &TaskId,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<Task> {
        self.store
            .read()?
            .task(task_id)
            .filter(|t| &t.project_id == project_id && &t.workspace_id == workspace_id)
            .cloned()
            .ok_or_else(|| {
                ServiceError::NotFound("Task not found or does not belong to this project".into())
            })
    }

    /// All tasks in a workspace
    pub fn list_in_workspace(&self, workspace_id: &WorkspaceId) -> ServiceResult<Vec<Task>> {
        Ok(self
            .store
            .read()?
            .tasks_in_workspace(workspace_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Partial update: absent fields retain their prior values
    pub fn update(
        &self,
        task_id: &TaskId,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
        input: UpdateTaskInput,
    ) -> ServiceResult<Task> {
        self.store.transaction(|state| {
            if let Some(assignee) = &input.assigned_to {
                if state.member(assignee, workspace_id).is_none() {
                    return Err(ServiceError::NotFound(
                        "Assigned user is not a member of this workspace".into(),
                    ));
                }
            }

            let task = state
                .task_in_workspace_mut(task_id, workspace_id)
                .filter(|t| &t.project_id == project_id)
                .ok_or_else(|| {
                    ServiceError::NotFound(
                        "Task not found or does not belong to this project".into(),
                    )
                })?;

            if let Some(title) = input.title {
                task.title = title;
            }
            if let Some(description) = input.description {
                task.description = Some(description);
            }
            if let Some(status) = input.status {
                task.status = status;
            }
            if let Some(priority) = input.priority {
                task.priority = priority;
            }
            if let Some(assignee) = input.assigned_to {
                task.assigned_to = Some(assignee);
            }
            if let Some(due_date) = input.due_date {
                task.due_date = Some(due_date);
            }
            task.updated_at = Utc::now();

            Ok(task.clone())
        })
    }

    /// Delete a task from a workspace
    pub fn delete(&self, task_id: &TaskId, workspace_id: &WorkspaceId) -> ServiceResult<Task> {
        let task = self.store.transaction(|state| {
            let task = state
                .task(task_id)
                .filter(|t| &t.workspace_id == workspace_id)
                .cloned()
                .ok_or_else(|| {
                    ServiceError::NotFound(
                        "Task not found or does not belong to the specified workspace".into(),
                    )
                })?;
            state.remove_task(task_id);
            Ok::<_, ServiceError>(task)
        })?;

        info!(task = %task_id, workspace = %workspace_id, "task deleted");
        Ok(task)
    }
}
