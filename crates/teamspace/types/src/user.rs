//! User records as the core sees them.
//!
//! Credentials live with the authentication collaborator; the core only
//! stores display attributes and the `current_workspace` pointer it has
//! to keep consistent across workspace deletion.

use crate::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user known to the core
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// Unique user identity
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact email (display only, never used for authentication here)
    pub email: String,
    /// Optional avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// The workspace the user last selected. If set, it must name a
    /// workspace the user is a member of.
    pub current_workspace: Option<WorkspaceId>,
    /// When the user record was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            profile_picture: None,
            current_workspace: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }
}
