//! Teamspace Store - Transactional in-memory entity store
//!
//! All entity collections live in one [`StoreState`] behind a single
//! `RwLock`. Reads observe a consistent snapshot. Writes go through
//! [`Store::transaction`], which clones the state, applies the mutation
//! to the clone, and swaps it back only on success - so a failed
//! cascade leaves nothing behind, and concurrent deletions serialize on
//! the write lock (the loser re-reads and finds the workspace gone).

#![deny(unsafe_code)]

mod state;

pub use state::StoreState;

use std::sync::{RwLock, RwLockReadGuard};
use teamspace_types::{UserId, WorkspaceId};
use thiserror::Error;

/// The shared entity store
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Take a read snapshot of the store.
    ///
    /// The guard pins a consistent view: a workspace mid-deletion is
    /// either fully present or fully absent, never partially cascaded.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    /// Run `f` against a working copy of the state and commit the copy
    /// if it returns `Ok`. On `Err` the copy is dropped and the store
    /// is untouched.
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.state.write().map_err(|_| StoreError::Poisoned)?;
        let mut working = guard.clone();
        let value = f(&mut working)?;
        *guard = working;
        Ok(value)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("store lock poisoned")]
    Poisoned,

    /// The (user, workspace) membership key already exists
    #[error("user {0} is already a member of workspace {1}")]
    DuplicateMember(UserId, WorkspaceId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamspace_types::{Member, Role, User, Workspace};

    fn seed_user(state: &mut StoreState, name: &str) -> UserId {
        let user = User::new(name, format!("{name}@example.com"));
        let id = user.id.clone();
        state.insert_user(user);
        id
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let store = Store::new();
        store
            .transaction::<_, StoreError>(|state| {
                seed_user(state, "ada");
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read().unwrap().user_count(), 1);
    }

    #[test]
    fn test_transaction_aborts_on_err() {
        let store = Store::new();
        let owner = store
            .transaction::<_, StoreError>(|state| Ok(seed_user(state, "ada")))
            .unwrap();

        // A mutation followed by a failure must leave no trace.
        let result = store.transaction::<(), StoreError>(|state| {
            let workspace = Workspace::new("Doomed", None, owner.clone());
            let workspace_id = workspace.id.clone();
            state.insert_workspace(workspace);
            state.insert_member(Member::new(owner.clone(), workspace_id, Role::Owner))?;
            Err(StoreError::Poisoned)
        });

        assert!(result.is_err());
        let state = store.read().unwrap();
        assert_eq!(state.workspace_count(), 0);
        assert_eq!(state.member_count(), 0);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let store = Store::new();
        let result = store.transaction::<_, StoreError>(|state| {
            let user = seed_user(state, "ada");
            let workspace = Workspace::new("Acme", None, user.clone());
            let workspace_id = workspace.id.clone();
            state.insert_workspace(workspace);
            state.insert_member(Member::new(user.clone(), workspace_id.clone(), Role::Owner))?;
            state.insert_member(Member::new(user, workspace_id, Role::Member))?;
            Ok(())
        });

        assert!(matches!(result, Err(StoreError::DuplicateMember(_, _))));
        // The whole transaction rolled back, including the first insert.
        assert_eq!(store.read().unwrap().member_count(), 0);
    }
}
