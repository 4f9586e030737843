//! Membership directory: role resolution, invite joins, role changes,
//! and the member roster.

use crate::{ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{Member, Permission, Role, UserId, WorkspaceId};
use tracing::info;

/// Result of joining a workspace via invite code
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinOutcome {
    pub workspace_id: WorkspaceId,
    pub role: Role,
}

/// A member with resolved user display attributes. Credential fields
/// never appear here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

/// The full member list of a workspace plus the role reference list
/// for UI population
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberRoster {
    pub members: Vec<MemberProfile>,
    pub roles: Vec<Role>,
}

/// Who belongs to which workspace, with what role
pub struct MembershipDirectory {
    store: Arc<Store>,
}

impl MembershipDirectory {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Resolve the role a user holds in a workspace.
    ///
    /// The two failure modes are reported distinctly: a missing
    /// workspace and a missing membership are different conditions.
    pub fn member_role(&self, user_id: &UserId, workspace_id: &WorkspaceId) -> ServiceResult<Role> {
        let state = self.store.read()?;
        if state.workspace(workspace_id).is_none() {
            return Err(ServiceError::NotFound("Workspace not found".into()));
        }
        let member = state.member(user_id, workspace_id).ok_or_else(|| {
            ServiceError::NotFound("You are not a member of this workspace".into())
        })?;
        Ok(member.role)
    }

    /// Resolve the principal's role and verify it grants every
    /// required permission. `None` as principal means no valid
    /// identity was attached to the call.
    pub fn authorize(
        &self,
        principal: Option<&UserId>,
        workspace_id: &WorkspaceId,
        required: &[Permission],
    ) -> ServiceResult<Role> {
        let user_id = principal.ok_or(ServiceError::Unauthorized)?;
        let role = self.member_role(user_id, workspace_id)?;
        teamspace_rbac::ensure(role, required)?;
        Ok(role)
    }

    /// Join a workspace by invite code, as a plain MEMBER.
    ///
    /// A second join by the same user is rejected with a conflict, not
    /// silently accepted; the storage layer's composite member key
    /// backs this even under racing joins.
    pub fn join_by_invite(&self, user_id: &UserId, invite_code: &str) -> ServiceResult<JoinOutcome> {
        let outcome = self.store.transaction(|state| {
            let workspace = state
                .workspace_by_invite_code(invite_code)
                .cloned()
                .ok_or_else(|| {
                    ServiceError::NotFound("Workspace not found or invite code is invalid".into())
                })?;

            if state.user(user_id).is_none() {
                return Err(ServiceError::NotFound("User not found".into()));
            }
            if state.member(user_id, &workspace.id).is_some() {
                return Err(ServiceError::Conflict(
                    "You are already a member of this workspace".into(),
                ));
            }

            state.insert_member(Member::new(
                user_id.clone(),
                workspace.id.clone(),
                Role::Member,
            ))?;

            Ok(JoinOutcome {
                workspace_id: workspace.id,
                role: Role::Member,
            })
        })?;

        info!(
            user = %user_id,
            workspace = %outcome.workspace_id,
            "member joined by invite"
        );
        Ok(outcome)
    }

    /// Change a member's role. Unknown role names surface as NotFound,
    /// never a panic.
    pub fn change_member_role(
        &self,
        workspace_id: &WorkspaceId,
        member_user_id: &UserId,
        role_name: &str,
    ) -> ServiceResult<Member> {
        let role = Role::from_name(role_name)
            .ok_or_else(|| ServiceError::NotFound("Role not found".into()))?;

        let member = self.store.transaction(|state| {
            if state.workspace(workspace_id).is_none() {
                return Err(ServiceError::NotFound("Workspace not found".into()));
            }
            let member = state
                .member_mut(member_user_id, workspace_id)
                .ok_or_else(|| {
                    ServiceError::NotFound("Member not found in the workspace".into())
                })?;
            member.role = role;
            Ok(member.clone())
        })?;

        info!(
            workspace = %workspace_id,
            member = %member_user_id,
            role = %role,
            "member role changed"
        );
        Ok(member)
    }

    /// All members of a workspace with resolved display attributes,
    /// plus the role reference list.
    pub fn workspace_members(&self, workspace_id: &WorkspaceId) -> ServiceResult<MemberRoster> {
        let state = self.store.read()?;
        if state.workspace(workspace_id).is_none() {
            return Err(ServiceError::NotFound("Workspace not found".into()));
        }

        let members = state
            .members_of_workspace(workspace_id)
            .into_iter()
            .map(|member| {
                let user = state.user(&member.user_id);
                MemberProfile {
                    user_id: member.user_id.clone(),
                    name: user.map(|u| u.name.clone()).unwrap_or_default(),
                    email: user.map(|u| u.email.clone()).unwrap_or_default(),
                    profile_picture: user.and_then(|u| u.profile_picture.clone()),
                    role: member.role,
                    joined_at: member.joined_at,
                }
            })
            .collect();

        Ok(MemberRoster {
            members,
            roles: Role::ALL.to_vec(),
        })
    }
}
