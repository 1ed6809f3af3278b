//! Bot state shared across all event handlers.
//!
//! `BotState` holds every shared resource the handlers, conversation flows and scheduled
//! jobs need. It is created once during startup and cloned into each consumer; all fields
//! are cheap to clone and share their underlying data.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    model::catalog::RoleCatalog,
    scheduler::auto_events::AutoEventScheduler,
    service::{gateway::MessagingGateway, lock::EditLocks, roster::RaidRoster},
};

#[derive(Clone)]
pub struct BotState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Chat platform access.
    pub gateway: Arc<dyn MessagingGateway>,

    /// Class and reaction lookup, built once at startup.
    pub catalog: Arc<RoleCatalog>,

    /// Live raids.
    pub roster: RaidRoster,

    /// Exclusive edit locks on raids and guild settings.
    pub locks: EditLocks,

    /// Weekly auto event jobs.
    pub auto_events: AutoEventScheduler,

    /// Per-guild limit of auto events.
    pub max_auto_events: u64,
}

impl BotState {
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn MessagingGateway>,
        catalog: RoleCatalog,
        roster: RaidRoster,
        auto_events: AutoEventScheduler,
        max_auto_events: u64,
    ) -> Self {
        Self {
            db,
            gateway,
            catalog: Arc::new(catalog),
            roster,
            locks: EditLocks::default(),
            auto_events,
            max_auto_events,
        }
    }
}
