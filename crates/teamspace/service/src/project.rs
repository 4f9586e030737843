//! Project operations, scoped to a workspace.

use crate::{ServiceError, ServiceResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{Project, ProjectId, UserId, WorkspaceId};
use tracing::info;

/// Payload for creating a project
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

/// Payload for a partial project update
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

/// Project CRUD with workspace-scope checks on every operation
pub struct ProjectManager {
    store: Arc<Store>,
}

impl ProjectManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a project in a workspace
    pub fn create(
        &self,
        creator: &UserId,
        workspace_id: &WorkspaceId,
        input: CreateProjectInput,
    ) -> ServiceResult<Project> {
        let project = self.store.transaction(|state| {
            if state.workspace(workspace_id).is_none() {
                return Err(ServiceError::NotFound("Workspace not found".into()));
            }

            let mut project = Project::new(
                input.name,
                input.description,
                workspace_id.clone(),
                creator.clone(),
            );
            if let Some(emoji) = input.emoji {
                project = project.with_emoji(emoji);
            }
            state.insert_project(project.clone());
            Ok::<_, ServiceError>(project)
        })?;

        info!(project = %project.id, workspace = %workspace_id, "project created");
        Ok(project)
    }

    /// Get a project, verifying it belongs to the workspace
    pub fn get_in_workspace(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<Project> {
        self.store
            .read()?
            .project_in_workspace(project_id, workspace_id)
            .cloned()
            .ok_or_else(|| {
                ServiceError::NotFound(
                    "Project not found or does not belong to the workspace".into(),
                )
            })
    }

    /// All projects in a workspace
    pub fn list_in_workspace(&self, workspace_id: &WorkspaceId) -> ServiceResult<Vec<Project>> {
        Ok(self
            .store
            .read()?
            .projects_in_workspace(workspace_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Partial update: absent fields retain their prior values
    pub fn update(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
        input: UpdateProjectInput,
    ) -> ServiceResult<Project> {
        self.store.transaction(|state| {
            let project = state
                .project_in_workspace_mut(project_id, workspace_id)
                .ok_or_else(|| {
                    ServiceError::NotFound(
                        "Project not found or does not belong to the workspace".into(),
                    )
                })?;

            if let Some(name) = input.name {
                project.name = name;
            }
            if let Some(description) = input.description {
                project.description = Some(description);
            }
            if let Some(emoji) = input.emoji {
                project.emoji = emoji;
            }
            project.updated_at = Utc::now();

            Ok::<_, ServiceError>(project.clone())
        })
    }

    /// Delete a project and every task in it, atomically
    pub fn delete(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<Project> {
        let project = self.store.transaction(|state| {
            let project = state
                .project_in_workspace(project_id, workspace_id)
                .cloned()
                .ok_or_else(|| {
                    ServiceError::NotFound(
                        "Project not found or does not belong to the workspace".into(),
                    )
                })?;

            state.remove_tasks_in_project(project_id);
            state.remove_project(project_id);
            Ok::<_, ServiceError>(project)
        })?;

        info!(project = %project_id, workspace = %workspace_id, "project deleted");
        Ok(project)
    }
}
