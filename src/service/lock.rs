//! Exclusive edit locks.
//!
//! A raid can only be edited by one conversation at a time, and the role groups or role
//! templates of a guild likewise. Locks are plain in-memory markers held by the owning
//! conversation and released when it completes or is cancelled.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockScope {
    /// Keyed by raid id.
    Raid,
    /// Keyed by guild id.
    RoleGroups,
    /// Keyed by guild id.
    RoleTemplates,
}

#[derive(Debug, Clone, Default)]
pub struct EditLocks {
    held: Arc<Mutex<HashSet<(LockScope, u64)>>>,
}

impl EditLocks {
    /// Takes the lock.
    ///
    /// # Returns
    /// - `true` - The lock was free and is now held by the caller
    /// - `false` - Someone else holds it
    pub fn try_acquire(&self, scope: LockScope, id: u64) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((scope, id))
    }

    pub fn release(&self, scope: LockScope, id: u64) {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(scope, id));
    }

    pub fn is_held(&self, scope: LockScope, id: u64) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(scope, id))
    }
}
