//! The entity collections and their scoped operations.
//!
//! `StoreState` is a plain cloneable value; transactional behavior
//! lives in [`crate::Store`]. Members are keyed by the composite
//! (user, workspace) pair, which makes the one-membership-per-pair
//! invariant structural rather than an application-level check.

use crate::StoreError;
use std::collections::BTreeMap;
use teamspace_types::{
    Member, Project, ProjectId, Task, TaskId, User, UserId, Workspace, WorkspaceId,
};
use tracing::debug;

/// Every entity collection in one cloneable snapshot
#[derive(Clone, Debug, Default)]
pub struct StoreState {
    users: BTreeMap<UserId, User>,
    workspaces: BTreeMap<WorkspaceId, Workspace>,
    members: BTreeMap<(UserId, WorkspaceId), Member>,
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
}

impl StoreState {
    // ============ Users ============

    /// Insert or replace a user record
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Get a user by id
    pub fn user(&self, user_id: &UserId) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Get a mutable user by id
    pub fn user_mut(&mut self, user_id: &UserId) -> Option<&mut User> {
        self.users.get_mut(user_id)
    }

    /// All users whose `current_workspace` points at `workspace_id`.
    /// This is the affected set the deletion cascade must repair.
    pub fn users_with_current_workspace(&self, workspace_id: &WorkspaceId) -> Vec<UserId> {
        self.users
            .values()
            .filter(|u| u.current_workspace.as_ref() == Some(workspace_id))
            .map(|u| u.id.clone())
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // ============ Workspaces ============

    /// Insert or replace a workspace record
    pub fn insert_workspace(&mut self, workspace: Workspace) {
        self.workspaces.insert(workspace.id.clone(), workspace);
    }

    /// Get a workspace by id
    pub fn workspace(&self, workspace_id: &WorkspaceId) -> Option<&Workspace> {
        self.workspaces.get(workspace_id)
    }

    /// Get a mutable workspace by id
    pub fn workspace_mut(&mut self, workspace_id: &WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.get_mut(workspace_id)
    }

    /// Find a workspace by its invite code
    pub fn workspace_by_invite_code(&self, invite_code: &str) -> Option<&Workspace> {
        self.workspaces
            .values()
            .find(|w| w.invite_code == invite_code)
    }

    /// Remove a workspace record
    pub fn remove_workspace(&mut self, workspace_id: &WorkspaceId) -> Option<Workspace> {
        self.workspaces.remove(workspace_id)
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    // ============ Members ============

    /// Insert a membership. Fails if the (user, workspace) pair already
    /// holds one - the uniqueness invariant is enforced here, at the
    /// storage layer, so no caller race can produce a duplicate.
    pub fn insert_member(&mut self, member: Member) -> Result<(), StoreError> {
        let key = (member.user_id.clone(), member.workspace_id.clone());
        if self.members.contains_key(&key) {
            return Err(StoreError::DuplicateMember(key.0, key.1));
        }
        self.members.insert(key, member);
        Ok(())
    }

    /// Get the membership of `user_id` in `workspace_id`
    pub fn member(&self, user_id: &UserId, workspace_id: &WorkspaceId) -> Option<&Member> {
        self.members
            .get(&(user_id.clone(), workspace_id.clone()))
    }

    /// Get a mutable membership
    pub fn member_mut(
        &mut self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> Option<&mut Member> {
        self.members
            .get_mut(&(user_id.clone(), workspace_id.clone()))
    }

    /// All members of a workspace
    pub fn members_of_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Member> {
        self.members
            .values()
            .filter(|m| &m.workspace_id == workspace_id)
            .collect()
    }

    /// All memberships a user holds, across workspaces
    pub fn memberships_of_user(&self, user_id: &UserId) -> Vec<&Member> {
        self.members
            .values()
            .filter(|m| &m.user_id == user_id)
            .collect()
    }

    /// Delete every membership scoped to a workspace
    pub fn remove_members_of_workspace(&mut self, workspace_id: &WorkspaceId) -> usize {
        let before = self.members.len();
        self.members.retain(|_, m| &m.workspace_id != workspace_id);
        let removed = before - self.members.len();
        debug!(workspace = %workspace_id, removed, "members removed");
        removed
    }

    /// The membership a repaired `current_workspace` should point at:
    /// most recently joined wins, ties broken by ascending workspace
    /// id. Deterministic so every caller agrees.
    pub fn next_membership_for(&self, user_id: &UserId) -> Option<&Member> {
        self.members
            .values()
            .filter(|m| &m.user_id == user_id)
            .min_by(|a, b| {
                b.joined_at
                    .cmp(&a.joined_at)
                    .then_with(|| a.workspace_id.cmp(&b.workspace_id))
            })
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    // ============ Projects ============

    /// Insert or replace a project record
    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    /// Get a project by id
    pub fn project(&self, project_id: &ProjectId) -> Option<&Project> {
        self.projects.get(project_id)
    }

    /// Get a project only if it belongs to the given workspace
    pub fn project_in_workspace(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> Option<&Project> {
        self.projects
            .get(project_id)
            .filter(|p| &p.workspace_id == workspace_id)
    }

    /// Get a mutable project only if it belongs to the given workspace
    pub fn project_in_workspace_mut(
        &mut self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> Option<&mut Project> {
        self.projects
            .get_mut(project_id)
            .filter(|p| &p.workspace_id == workspace_id)
    }

    /// All projects in a workspace
    pub fn projects_in_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Project> {
        self.projects
            .values()
            .filter(|p| &p.workspace_id == workspace_id)
            .collect()
    }

    /// Remove a single project record
    pub fn remove_project(&mut self, project_id: &ProjectId) -> Option<Project> {
        self.projects.remove(project_id)
    }

    /// Delete every project scoped to a workspace
    pub fn remove_projects_in_workspace(&mut self, workspace_id: &WorkspaceId) -> usize {
        let before = self.projects.len();
        self.projects.retain(|_, p| &p.workspace_id != workspace_id);
        let removed = before - self.projects.len();
        debug!(workspace = %workspace_id, removed, "projects removed");
        removed
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    // ============ Tasks ============

    /// Insert or replace a task record
    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Get a task by id
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Get a mutable task only if it belongs to the given workspace
    pub fn task_in_workspace_mut(
        &mut self,
        task_id: &TaskId,
        workspace_id: &WorkspaceId,
    ) -> Option<&mut Task> {
        self.tasks
            .get_mut(task_id)
            .filter(|t| &t.workspace_id == workspace_id)
    }

    /// All tasks in a workspace
    pub fn tasks_in_workspace(&self, workspace_id: &WorkspaceId) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|t| &t.workspace_id == workspace_id)
            .collect()
    }

    /// All tasks in a project
    pub fn tasks_in_project(&self, project_id: &ProjectId) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|t| &t.project_id == project_id)
            .collect()
    }

    /// Remove a single task record
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        self.tasks.remove(task_id)
    }

    /// Delete every task scoped to a workspace
    pub fn remove_tasks_in_workspace(&mut self, workspace_id: &WorkspaceId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| &t.workspace_id != workspace_id);
        let removed = before - self.tasks.len();
        debug!(workspace = %workspace_id, removed, "tasks removed");
        removed
    }

    /// Delete every task scoped to a project
    pub fn remove_tasks_in_project(&mut self, project_id: &ProjectId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| &t.project_id != project_id);
        before - self.tasks.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
