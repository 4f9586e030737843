//! The closed role and permission enumerations.
//!
//! Roles are reference data, not user-created: the set is fixed at
//! compile time and each role maps to an immutable permission set (see
//! the `teamspace-rbac` crate for the matrix itself).

use serde::{Deserialize, Serialize};

/// A role a member can hold within a workspace
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Workspace owner - full permission universe
    Owner,
    /// Administrator - everything except owner-only workspace actions
    Admin,
    /// Plain member - task work and read access only
    Member,
}

impl Role {
    /// All roles, in descending order of authority
    pub const ALL: [Role; 3] = [Role::Owner, Role::Admin, Role::Member];

    /// The canonical wire name of this role
    pub fn name(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }

    /// Parse a role from its wire name. Unknown names return `None` so
    /// callers surface them as a not-found condition, never a panic.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OWNER" => Some(Role::Owner),
            "ADMIN" => Some(Role::Admin),
            "MEMBER" => Some(Role::Member),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single granular capability gating one action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    CreateWorkspace,
    DeleteWorkspace,
    EditWorkspace,
    ManageWorkspaceSettings,

    AddMember,
    ChangeMemberRole,
    RemoveMember,

    CreateProject,
    EditProject,
    DeleteProject,

    CreateTask,
    EditTask,
    DeleteTask,

    ViewOnly,
}

impl Permission {
    /// The full permission universe
    pub const ALL: [Permission; 14] = [
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_name() {
        assert_eq!(Role::from_name("SUPERUSER"), None);
        assert_eq!(Role::from_name("owner"), None);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Permission::CreateWorkspace).unwrap();
        assert_eq!(json, "\"CREATE_WORKSPACE\"");
        let json = serde_json::to_string(&Role::Owner).unwrap();
        assert_eq!(json, "\"OWNER\"");
    }
}
