//! Workspace lifecycle: creation, update, and the cascading deletion
//! transaction.

use crate::{ServiceError, ServiceResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{Member, Role, UserId, Workspace, WorkspaceId};
use tracing::info;

/// A workspace together with its member list
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkspaceWithMembers {
    pub workspace: Workspace,
    pub members: Vec<Member>,
}

/// Owns workspace creation, update, and the cascading deletion
/// transaction
pub struct WorkspaceManager {
    store: Arc<Store>,
}

impl WorkspaceManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Create a workspace and its owner membership as one logical
    /// unit. If the member insert fails the workspace insert rolls
    /// back with it. The owner's `current_workspace` is pointed at the
    /// new workspace inside the same transaction.
    pub fn create(
        &self,
        owner: &UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<Workspace> {
        let name = name.into();
        let workspace = self.store.transaction(|state| {
            if state.user(owner).is_none() {
                return Err(ServiceError::NotFound("User not found".into()));
            }

            let workspace = Workspace::new(name, description, owner.clone());
            state.insert_workspace(workspace.clone());
            state.insert_member(Member::new(
                owner.clone(),
                workspace.id.clone(),
                Role::Owner,
            ))?;

            if let Some(user) = state.user_mut(owner) {
                user.current_workspace = Some(workspace.id.clone());
            }

            Ok(workspace)
        })?;

        info!(workspace = %workspace.id, owner = %owner, "workspace created");
        Ok(workspace)
    }

    /// Partial update: absent fields retain their prior values
    pub fn update(
        &self,
        workspace_id: &WorkspaceId,
        name: Option<String>,
        description: Option<String>,
    ) -> ServiceResult<Workspace> {
        self.store.transaction(|state| {
            let workspace = state
                .workspace_mut(workspace_id)
                .ok_or_else(|| ServiceError::NotFound("Workspace not found".into()))?;

            if let Some(name) = name {
                workspace.name = name;
            }
            if let Some(description) = description {
                workspace.description = Some(description);
            }
            workspace.updated_at = Utc::now();

            Ok::<_, ServiceError>(workspace.clone())
        })
    }

    /// Delete a workspace and everything scoped to it, atomically.
    ///
    /// Only the owner may delete; mere membership (or even ADMIN) is
    /// not enough. The cascade removes projects, tasks, and members,
    /// then repairs every user whose `current_workspace` pointed at
    /// the deleted workspace: they are re-pointed at their most
    /// recently joined remaining membership, or cleared when none
    /// remains. Returns the requester's refreshed `current_workspace`.
    pub fn delete(
        &self,
        workspace_id: &WorkspaceId,
        requester: &UserId,
    ) -> ServiceResult<Option<WorkspaceId>> {
        let current_workspace = self.store.transaction(|state| {
            let workspace = state
                .workspace(workspace_id)
                .cloned()
                .ok_or_else(|| ServiceError::NotFound("Workspace not found".into()))?;

            if workspace.owner != *requester {
                return Err(ServiceError::Forbidden(
                    "You are not the owner of this workspace".into(),
                ));
            }
            if state.user(requester).is_none() {
                return Err(ServiceError::NotFound("User not found".into()));
            }

            // Capture the affected set before the cascade touches it.
            let affected = state.users_with_current_workspace(workspace_id);

            state.remove_projects_in_workspace(workspace_id);
            state.remove_tasks_in_workspace(workspace_id);
            state.remove_members_of_workspace(workspace_id);

            // Memberships in this workspace are gone, so the repair
            // only ever lands on a surviving workspace.
            for user_id in &affected {
                let next = state
                    .next_membership_for(user_id)
                    .map(|m| m.workspace_id.clone());
                if let Some(user) = state.user_mut(user_id) {
                    user.current_workspace = next;
                }
            }

            state.remove_workspace(workspace_id);

            let refreshed = state
                .user(requester)
                .and_then(|u| u.current_workspace.clone());
            Ok(refreshed)
        })?;

        info!(workspace = %workspace_id, requester = %requester, "workspace deleted");
        Ok(current_workspace)
    }

    /// Get a workspace together with its member list
    pub fn get(&self, workspace_id: &WorkspaceId) -> ServiceResult<WorkspaceWithMembers> {
        let state = self.store.read()?;
        let workspace = state
            .workspace(workspace_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("Workspace not found".into()))?;
        let members = state
            .members_of_workspace(workspace_id)
            .into_iter()
            .cloned()
            .collect();
        Ok(WorkspaceWithMembers { workspace, members })
    }

    /// All workspaces the user holds a membership in
    pub fn list_for_user(&self, user_id: &UserId) -> ServiceResult<Vec<Workspace>> {
        let state = self.store.read()?;
        let workspaces = state
            .memberships_of_user(user_id)
            .into_iter()
            .filter_map(|m| state.workspace(&m.workspace_id).cloned())
            .collect();
        Ok(workspaces)
    }

    /// Rotate the workspace's invite code, invalidating the old one
    pub fn reset_invite_code(&self, workspace_id: &WorkspaceId) -> ServiceResult<Workspace> {
        let workspace = self.store.transaction(|state| {
            let workspace = state
                .workspace_mut(workspace_id)
                .ok_or_else(|| ServiceError::NotFound("Workspace not found".into()))?;
            workspace.reset_invite_code();
            Ok::<_, ServiceError>(workspace.clone())
        })?;

        info!(workspace = %workspace_id, "invite code reset");
        Ok(workspace)
    }
}
