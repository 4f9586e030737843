//! Teamspace Service - Workspace lifecycle, membership, and analytics
//!
//! The unified service facade over the teamspace core. Callers hand it
//! a trusted principal id and validated payloads; it enforces the
//! business invariants (existence, ownership, membership uniqueness)
//! and returns typed errors the boundary layer surfaces unchanged.

#![deny(unsafe_code)]

mod analytics;
mod membership;
mod project;
mod task;
mod user;
mod workspace;

pub use analytics::{AnalyticsEngine, TaskAnalytics};
pub use membership::{JoinOutcome, MemberProfile, MemberRoster, MembershipDirectory};
pub use project::{CreateProjectInput, ProjectManager, UpdateProjectInput};
pub use task::{CreateTaskInput, TaskManager, UpdateTaskInput};
pub use user::UserDirectory;
pub use workspace::{WorkspaceManager, WorkspaceWithMembers};

use std::sync::Arc;
use teamspace_rbac::RbacError;
use teamspace_store::{Store, StoreError};
use teamspace_types::{
    Member, Permission, Project, ProjectId, Role, Task, TaskId, User, UserId, Workspace,
    WorkspaceId,
};
use thiserror::Error;

/// Convenience alias used throughout the service layer
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The error taxonomy surfaced to callers
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced entity (workspace, member, role, project, task,
    /// user) is absent
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint was violated
    #[error("{0}")]
    Conflict(String),

    /// Authenticated but not allowed - ownership or permission denial
    #[error("{0}")]
    Forbidden(String),

    /// No valid principal attached to the call
    #[error("You are not authorized to access this resource")]
    Unauthorized,

    /// The role guard denied the operation
    #[error(transparent)]
    Rbac(#[from] RbacError),

    /// The storage layer failed in a way callers cannot act on
    #[error("internal storage failure")]
    Internal(#[source] StoreError),
}

/// Coarse classification of a [`ServiceError`] for boundary layers
/// that map errors to transport codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Unauthorized,
    Internal,
}

impl ServiceError {
    /// The taxonomy class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) => ErrorKind::Conflict,
            ServiceError::Forbidden(_) | ServiceError::Rbac(_) => ErrorKind::Forbidden,
            ServiceError::Unauthorized => ErrorKind::Unauthorized,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // The structural member key caught a duplicate join; the
            // caller sees the same conflict as the application check.
            StoreError::DuplicateMember(_, _) => {
                ServiceError::Conflict("You are already a member of this workspace".into())
            }
            StoreError::Poisoned => ServiceError::Internal(err),
        }
    }
}

/// The teamspace core service
pub struct TeamspaceService {
    users: UserDirectory,
    membership: MembershipDirectory,
    workspaces: WorkspaceManager,
    projects: ProjectManager,
    tasks: TaskManager,
    analytics: AnalyticsEngine,
}

impl TeamspaceService {
    /// Create a new service over an empty store
    pub fn new() -> Self {
        Self::with_store(Arc::new(Store::new()))
    }

    /// Create a service over an existing store
    pub fn with_store(store: Arc<Store>) -> Self {
        Self {
            users: UserDirectory::new(store.clone()),
            membership: MembershipDirectory::new(store.clone()),
            workspaces: WorkspaceManager::new(store.clone()),
            projects: ProjectManager::new(store.clone()),
            tasks: TaskManager::new(store.clone()),
            analytics: AnalyticsEngine::new(store),
        }
    }

    // ============ Users ============

    /// Register a user record
    pub fn register_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        profile_picture: Option<String>,
    ) -> ServiceResult<User> {
        self.users.register(name, email, profile_picture)
    }

    /// Get a user by id
    pub fn get_user(&self, user_id: &UserId) -> ServiceResult<User> {
        self.users.get(user_id)
    }

    // ============ Authorization ============

    /// Resolve the principal's role in a workspace and verify it
    /// grants every required permission
    pub fn authorize(
        &self,
        principal: Option<&UserId>,
        workspace_id: &WorkspaceId,
        required: &[Permission],
    ) -> ServiceResult<Role> {
        self.membership.authorize(principal, workspace_id, required)
    }

    // ============ Workspaces ============

    /// Create a workspace owned by `owner`
    pub fn create_workspace(
        &self,
        owner: &UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<Workspace> {
        self.workspaces.create(owner, name, description)
    }

    /// Partially update a workspace
    pub fn update_workspace(
        &self,
        workspace_id: &WorkspaceId,
        name: Option<String>,
        description: Option<String>,
    ) -> ServiceResult<Workspace> {
        self.workspaces.update(workspace_id, name, description)
    }

    /// Delete a workspace with full cascade; returns the requester's
    /// refreshed `current_workspace`
    pub fn delete_workspace(
        &self,
        workspace_id: &WorkspaceId,
        requester: &UserId,
    ) -> ServiceResult<Option<WorkspaceId>> {
        self.workspaces.delete(workspace_id, requester)
    }

    /// Get a workspace with its member list
    pub fn get_workspace(&self, workspace_id: &WorkspaceId) -> ServiceResult<WorkspaceWithMembers> {
        self.workspaces.get(workspace_id)
    }

    /// All workspaces the user is a member of
    pub fn list_workspaces_for_user(&self, user_id: &UserId) -> ServiceResult<Vec<Workspace>> {
        self.workspaces.list_for_user(user_id)
    }

    /// Member roster of a workspace plus the role reference list
    pub fn get_workspace_members(&self, workspace_id: &WorkspaceId) -> ServiceResult<MemberRoster> {
        self.membership.workspace_members(workspace_id)
    }

    /// Change a member's role by role name
    pub fn change_member_role(
        &self,
        workspace_id: &WorkspaceId,
        member_user_id: &UserId,
        role_name: &str,
    ) -> ServiceResult<Member> {
        self.membership
            .change_member_role(workspace_id, member_user_id, role_name)
    }

    /// Join a workspace by invite code
    pub fn join_by_invite(&self, user_id: &UserId, invite_code: &str) -> ServiceResult<JoinOutcome> {
        self.membership.join_by_invite(user_id, invite_code)
    }

    // ============ Analytics ============

    /// Task counts for a workspace
    pub fn get_workspace_analytics(
        &self,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<TaskAnalytics> {
        self.analytics.workspace_analytics(workspace_id)
    }

    /// Task counts for a project within a workspace
    pub fn get_project_analytics(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<TaskAnalytics> {
        self.analytics.project_analytics(project_id, workspace_id)
    }

    // ============ Projects ============

    /// Create a project in a workspace
    pub fn create_project(
        &self,
        creator: &UserId,
        workspace_id: &WorkspaceId,
        input: CreateProjectInput,
    ) -> ServiceResult<Project> {
        self.projects.create(creator, workspace_id, input)
    }

    /// Delete a project and its tasks
    pub fn delete_project(
        &self,
        project_id: &ProjectId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<Project> {
        self.projects.delete(project_id, workspace_id)
    }

    // ============ Tasks ============

    /// Create a task in a project
    pub fn create_task(
        &self,
        creator: &UserId,
        workspace_id: &WorkspaceId,
        project_id: &ProjectId,
        input: CreateTaskInput,
    ) -> ServiceResult<Task> {
        self.tasks.create(creator, workspace_id, project_id, input)
    }

    /// Delete a task
    pub fn delete_task(&self, task_id: &TaskId, workspace_id: &WorkspaceId) -> ServiceResult<Task> {
        self.tasks.delete(task_id, workspace_id)
    }

    // ============ Component Access ============

    /// Get the user directory
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Get the membership directory
    pub fn membership(&self) -> &MembershipDirectory {
        &self.membership
    }

    /// Get the workspace manager
    pub fn workspaces(&self) -> &WorkspaceManager {
        &self.workspaces
    }

    /// Get the project manager
    pub fn projects(&self) -> &ProjectManager {
        &self.projects
    }

    /// Get the task manager
    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Get the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}

impl Default for TeamspaceService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workspace_flow() {
        let service = TeamspaceService::new();

        // Step 1: Register the owner and create a workspace
        let owner = service
            .register_user("Ada", "ada@example.com", None)
            .unwrap();
        let workspace = service
            .create_workspace(&owner.id, "Acme", Some("The Acme workspace".into()))
            .unwrap();

        // The owner membership exists with role OWNER, and the owner's
        // current workspace points at the new workspace.
        let role = service
            .membership()
            .member_role(&owner.id, &workspace.id)
            .unwrap();
        assert_eq!(role, Role::Owner);
        let refreshed = service.get_user(&owner.id).unwrap();
        assert_eq!(refreshed.current_workspace, Some(workspace.id.clone()));

        // Step 2: A second user joins by invite
        let joiner = service
            .register_user("Grace", "grace@example.com", None)
            .unwrap();
        let outcome = service
            .join_by_invite(&joiner.id, &workspace.invite_code)
            .unwrap();
        assert_eq!(outcome.workspace_id, workspace.id);
        assert_eq!(outcome.role, Role::Member);

        // Step 3: The guard gates a member-level principal
        let err = service
            .authorize(
                Some(&joiner.id),
                &workspace.id,
                &[Permission::DeleteWorkspace],
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        // Step 4: Promote the joiner and re-check
        service
            .change_member_role(&workspace.id, &joiner.id, "ADMIN")
            .unwrap();
        service
            .authorize(Some(&joiner.id), &workspace.id, &[Permission::CreateProject])
            .unwrap();

        // Step 5: Roster resolves display attributes for both members
        let roster = service.get_workspace_members(&workspace.id).unwrap();
        assert_eq!(roster.members.len(), 2);
        assert_eq!(roster.roles, Role::ALL.to_vec());
    }

    #[test]
    fn test_missing_principal_is_unauthorized() {
        let service = TeamspaceService::new();
        let owner = service
            .register_user("Ada", "ada@example.com", None)
            .unwrap();
        let workspace = service.create_workspace(&owner.id, "Acme", None).unwrap();

        let err = service
            .authorize(None, &workspace.id, &[Permission::ViewOnly])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
