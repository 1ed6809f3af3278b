mod engine;

use crate::{
    model::raid::{PendingRaid, Raid, RaidRole},
    state::BotState,
};

use super::ConversationEngine;

pub const GUILD_ID: u64 = 1;
pub const LEADER_ID: u64 = 42;

/// Stores a published raid named "Weekly Clear" in the roster.
pub async fn insert_raid(state: &BotState, raid_id: u64, roles: Vec<RaidRole>) -> Raid {
    let mut pending = PendingRaid::new(GUILD_ID, LEADER_ID);
    pending.name = "Weekly Clear".to_string();
    pending.date = "Saturday, 29.02.2020".to_string();
    pending.time = "20:00".to_string();
    pending.channel = "events".to_string();
    for role in roles {
        pending.add_role(role);
    }

    assert!(state.roster.insert(pending.into_raid(raid_id, 10)).await);
    state.roster.get(raid_id).await.unwrap()
}

/// Sends each message in order.
pub async fn send_all(engine: &ConversationEngine, user_id: u64, messages: &[&str]) {
    for message in messages {
        assert!(
            engine.handle_message(user_id, message).await,
            "no active session for '{}'",
            message
        );
    }
}
