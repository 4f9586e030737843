//! Teamspace Types - Entities, roles, and permissions
//!
//! Shared data model for the teamspace core: workspaces, members,
//! projects, tasks, and the closed role/permission enumeration that the
//! authorization layer evaluates.

#![deny(unsafe_code)]

mod ids;
mod project;
mod role;
mod task;
mod user;
mod workspace;

pub use ids::{ProjectId, TaskId, UserId, WorkspaceId};
pub use project::{Project, DEFAULT_PROJECT_EMOJI};
pub use role::{Permission, Role};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
pub use workspace::{Member, Workspace};
