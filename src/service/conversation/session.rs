//! Per-user session storage.
//!
//! Each user gets one async mutex guarding all of their sessions, so messages from the
//! same user are handled one at a time while different users proceed in parallel. The
//! outer map is only locked briefly to look up or prune a user's slot.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::{FlowKind, Session};

/// Active sessions of one user, keyed and ordered by flow priority.
#[derive(Default)]
pub struct UserSessions {
    sessions: BTreeMap<FlowKind, Session>,
}

impl UserSessions {
    /// Highest priority kind with an active session.
    pub fn active_kind(&self) -> Option<FlowKind> {
        self.sessions.keys().next().copied()
    }

    pub fn get_mut(&mut self, kind: FlowKind) -> Option<&mut Session> {
        self.sessions.get_mut(&kind)
    }

    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.kind(), session);
    }

    pub fn remove(&mut self, kind: FlowKind) -> Option<Session> {
        self.sessions.remove(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[derive(Default)]
pub struct SessionStore {
    users: Mutex<HashMap<u64, Arc<AsyncMutex<UserSessions>>>>,
}

impl SessionStore {
    /// Waits for exclusive access to a user's sessions.
    pub async fn lock(&self, user_id: u64) -> OwnedMutexGuard<UserSessions> {
        let slot = self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id)
            .or_default()
            .clone();

        slot.lock_owned().await
    }

    /// Drops the user's slot when nobody is using it and no session is active.
    pub fn release_if_idle(&self, user_id: u64) {
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);

        let idle = users.get(&user_id).is_some_and(|slot| {
            Arc::strong_count(slot) == 1
                && slot
                    .try_lock()
                    .map(|sessions| sessions.is_empty())
                    .unwrap_or(false)
        });

        if idle {
            users.remove(&user_id);
        }
    }

    /// Number of users holding a slot.
    pub fn tracked_users(&self) -> usize {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
