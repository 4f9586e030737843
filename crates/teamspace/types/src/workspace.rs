//! Workspace and membership records.
//!
//! A workspace is the tenant boundary: projects, tasks, and members are
//! all scoped to one. A member is the binding of a user to a workspace
//! with an assigned role; the (user, workspace) pair is unique.

use crate::{Role, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tenant-scoped container for projects, tasks, and members
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workspace {
    /// Unique workspace identity
    pub id: WorkspaceId,
    /// Human-readable name
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The owning user. The owner always holds a Member record with
    /// role OWNER in this workspace.
    pub owner: UserId,
    /// Opaque token permitting self-service join as MEMBER
    pub invite_code: String,
    /// When the workspace was created
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Create a new workspace owned by `owner`
    pub fn new(name: impl Into<String>, description: Option<String>, owner: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: WorkspaceId::generate(),
            name: name.into(),
            description,
            owner,
            invite_code: Self::generate_invite_code(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a fresh invite code (8 hex chars of a v4 uuid)
    pub fn generate_invite_code() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        hex[..8].to_string()
    }

    /// Rotate the invite code, invalidating the previous one
    pub fn reset_invite_code(&mut self) {
        self.invite_code = Self::generate_invite_code();
        self.updated_at = Utc::now();
    }
}

/// The binding of a user to a workspace with an assigned role
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    /// The user this membership belongs to
    pub user_id: UserId,
    /// The workspace joined
    pub workspace_id: WorkspaceId,
    /// Role held within the workspace
    pub role: Role,
    /// When the member joined
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Create a new membership, stamped with the current time
    pub fn new(user_id: UserId, workspace_id: WorkspaceId, role: Role) -> Self {
        Self {
            user_id,
            workspace_id,
            role,
            joined_at: Utc::now(),
        }
    }

    pub fn with_joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }
}
