//! Shared fixtures for service tests.

use std::{collections::HashMap, sync::Arc};

use test_utils::builder::TestBuilder;

use crate::{
    model::catalog::RoleCatalog,
    scheduler::auto_events::AutoEventScheduler,
    service::{gateway::mock::MockGateway, roster::RaidRoster},
    state::BotState,
};

/// Emoji id assigned to the n-th reaction name of the catalog.
pub fn emoji_id(name: &str) -> u64 {
    RoleCatalog::reaction_names()
        .position(|n| n == name)
        .map(|i| 500 + i as u64)
        .unwrap_or(0)
}

pub fn test_catalog() -> RoleCatalog {
    let ids: HashMap<String, u64> = RoleCatalog::reaction_names()
        .map(|name| (name.to_string(), emoji_id(name)))
        .collect();
    RoleCatalog::new(&ids, None)
}

/// Bot state backed by an in-memory database with every table and a recording gateway.
pub async fn test_state() -> (BotState, Arc<MockGateway>) {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.unwrap();

    let gateway = Arc::new(MockGateway::new());
    let roster = RaidRoster::new(db.clone(), gateway.clone());
    let scheduler = AutoEventScheduler::new().await.unwrap();

    let state = BotState::new(db, gateway.clone(), test_catalog(), roster, scheduler, 5);
    (state, gateway)
}
