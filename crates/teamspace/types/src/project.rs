//! Project records.

use crate::{ProjectId, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default emoji shown for projects created without one
pub const DEFAULT_PROJECT_EMOJI: &str = "📊";

/// A project inside a workspace, grouping related tasks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identity
    pub id: ProjectId,
    /// Human-readable name
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display emoji
    pub emoji: String,
    /// The owning workspace
    pub workspace_id: WorkspaceId,
    /// Who created the project
    pub created_by: UserId,
    /// When the project was created
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project in `workspace_id`
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        workspace_id: WorkspaceId,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            description,
            emoji: DEFAULT_PROJECT_EMOJI.to_string(),
            workspace_id,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }
}
