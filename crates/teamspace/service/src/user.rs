//! User directory: the minimal user store the lifecycle operations
//! validate against and repair.

use crate::{ServiceError, ServiceResult};
use std::sync::Arc;
use teamspace_store::Store;
use teamspace_types::{User, UserId, WorkspaceId};
use tracing::info;

/// Lookup and registration of user records
pub struct UserDirectory {
    store: Arc<Store>,
}

impl UserDirectory {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Register a new user record
    pub fn register(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        profile_picture: Option<String>,
    ) -> ServiceResult<User> {
        let mut user = User::new(name, email);
        if let Some(url) = profile_picture {
            user = user.with_profile_picture(url);
        }

        let user_id = user.id.clone();
        let stored = user.clone();
        self.store
            .transaction(move |state| -> ServiceResult<()> {
                state.insert_user(stored);
                Ok(())
            })?;

        info!(user = %user_id, "user registered");
        Ok(user)
    }

    /// Get a user by id
    pub fn get(&self, user_id: &UserId) -> ServiceResult<User> {
        self.store
            .read()?
            .user(user_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))
    }

    /// Point a user's `current_workspace` at a workspace they belong
    /// to. Rejected when the user holds no membership there, so the
    /// pointer can never name a workspace the user is not in.
    pub fn select_current_workspace(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> ServiceResult<User> {
        self.store.transaction(|state| {
            if state.workspace(workspace_id).is_none() {
                return Err(ServiceError::NotFound("Workspace not found".into()));
            }
            if state.member(user_id, workspace_id).is_none() {
                return Err(ServiceError::NotFound(
                    "You are not a member of this workspace".into(),
                ));
            }
            let user = state
                .user_mut(user_id)
                .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
            user.current_workspace = Some(workspace_id.clone());
            Ok(user.clone())
        })
    }
}
