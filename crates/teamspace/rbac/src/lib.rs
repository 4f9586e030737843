//! Teamspace RBAC - Permission matrix and role guard
//!
//! The matrix is fixed at compile time: each role maps to a static
//! permission slice, so there is no lookup-miss failure mode and no
//! mutable role state anywhere. The guard is a pure set-containment
//! check over that matrix.

#![deny(unsafe_code)]

use teamspace_types::{Permission, Role};
use thiserror::Error;

/// Every permission, granted to workspace owners
pub const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::CreateWorkspace,
    Permission::DeleteWorkspace,
    Permission::EditWorkspace,
    Permission::ManageWorkspaceSettings,
    Permission::AddMember,
    Permission::ChangeMemberRole,
    Permission::RemoveMember,
    Permission::CreateProject,
    Permission::EditProject,
    Permission::DeleteProject,
    Permission::CreateTask,
    Permission::EditTask,
    Permission::DeleteTask,
    Permission::ViewOnly,
];

/// Admin grants: everything except the owner-only workspace actions
/// (create/delete/edit workspace, change member role)
pub const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AddMember,
    Permission::RemoveMember,
    Permission::CreateProject,
    Permission::EditProject,
    Permission::DeleteProject,
    Permission::CreateTask,
    Permission::EditTask,
    Permission::DeleteTask,
    Permission::ManageWorkspaceSettings,
    Permission::ViewOnly,
];

/// Member grants: task work and read access only
pub const MEMBER_PERMISSIONS: &[Permission] = &[
    Permission::CreateTask,
    Permission::EditTask,
    Permission::ViewOnly,
];

/// The permission set granted to a role
pub fn granted(role: Role) -> &'static [Permission] {
    match role {
        Role::Owner => OWNER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Member => MEMBER_PERMISSIONS,
    }
}

/// Whether `role` holds a single permission
pub fn has_permission(role: Role, permission: Permission) -> bool {
    granted(role).contains(&permission)
}

/// Verify that `role` holds every permission in `required`.
///
/// Succeeds silently when the full set is granted; otherwise fails with
/// the first missing permission. No side effects, no state.
pub fn ensure(role: Role, required: &[Permission]) -> Result<(), RbacError> {
    match required.iter().find(|p| !granted(role).contains(*p)) {
        None => Ok(()),
        Some(missing) => Err(RbacError::NotAuthorized {
            role,
            missing: *missing,
        }),
    }
}

/// Authorization failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    #[error("role {role} is not authorized to access this resource (missing {missing:?})")]
    NotAuthorized { role: Role, missing: Permission },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_holds_full_universe() {
        for permission in Permission::ALL {
            assert!(has_permission(Role::Owner, permission));
        }
    }

    #[test]
    fn test_admin_lacks_owner_only_actions() {
        for permission in [
            Permission::CreateWorkspace,
            Permission::DeleteWorkspace,
            Permission::EditWorkspace,
            Permission::ChangeMemberRole,
        ] {
            assert!(!has_permission(Role::Admin, permission));
        }
        assert!(has_permission(Role::Admin, Permission::ManageWorkspaceSettings));
        assert!(has_permission(Role::Admin, Permission::DeleteProject));
    }

    #[test]
    fn test_member_never_deletes_workspace() {
        let result = ensure(Role::Member, &[Permission::DeleteWorkspace]);
        assert_eq!(
            result,
            Err(RbacError::NotAuthorized {
                role: Role::Member,
                missing: Permission::DeleteWorkspace,
            })
        );
    }

    #[test]
    fn test_ensure_requires_every_permission() {
        // Member holds CreateTask but not DeleteTask; the combined
        // requirement must fail.
        assert!(ensure(Role::Member, &[Permission::CreateTask]).is_ok());
        assert!(ensure(Role::Member, &[Permission::CreateTask, Permission::DeleteTask]).is_err());
    }

    #[test]
    fn test_empty_requirement_always_passes() {
        for role in Role::ALL {
            assert!(ensure(role, &[]).is_ok());
        }
    }
}
