//! Publishing, refreshing and removing event messages.

use crate::{
    error::{gateway::GatewayError, publish::PublishError, roster::RosterError},
    model::{catalog::RoleCatalog, raid::PendingRaid},
    service::{gateway::MessagingGateway, roster::RaidRoster},
    state::BotState,
};

pub struct RaidLifecycle<'a> {
    roster: &'a RaidRoster,
    gateway: &'a dyn MessagingGateway,
    catalog: &'a RoleCatalog,
}

impl<'a> RaidLifecycle<'a> {
    pub fn new(
        roster: &'a RaidRoster,
        gateway: &'a dyn MessagingGateway,
        catalog: &'a RoleCatalog,
    ) -> Self {
        Self {
            roster,
            gateway,
            catalog,
        }
    }

    pub fn from_state(state: &'a BotState) -> Self {
        Self::new(&state.roster, state.gateway.as_ref(), &state.catalog)
    }

    /// Publishes a pending raid.
    ///
    /// Resolves the announcement channel, posts the rendered raid, stores it under the
    /// message id and finally attaches the reaction set one reaction at a time. If the raid
    /// cannot be stored, the posted message is deleted again. Reactions are only attached
    /// to stored raids; individual reaction failures are logged and do not fail the call.
    ///
    /// # Returns
    /// - `Ok(raid_id)` - Id of the published raid
    /// - `Err(PublishError)` - Nothing was left behind
    pub async fn publish(&self, pending: PendingRaid) -> Result<u64, PublishError> {
        let channel = self
            .gateway
            .resolve_channel_by_name(pending.guild_id, &pending.channel)
            .await
            .map_err(PublishError::ChannelLookup)?
            .ok_or_else(|| PublishError::ChannelNotFound {
                channel: pending.channel.clone(),
                guild_id: pending.guild_id,
            })?;

        let short = pending.is_display_short;
        let draft = pending.into_raid(0, channel.channel_id);
        let message = self
            .gateway
            .send_document(channel, &draft.render(short))
            .await
            .map_err(PublishError::Send)?;

        let mut raid = draft;
        raid.id = message.message_id;
        let symbols = if raid.is_open_world {
            self.catalog.open_world_reactions()
        } else {
            self.catalog.core_class_reactions()
        };

        if !self.roster.insert(raid).await {
            if let Err(e) = self.gateway.delete_message(message).await {
                tracing::error!(
                    "Failed to delete message {} of unstored event: {}",
                    message.message_id,
                    e
                );
            }
            return Err(PublishError::NotPersisted(message.message_id));
        }

        let mut failed = 0;
        for symbol in &symbols {
            if let Err(e) = self.gateway.add_reaction(message, symbol).await {
                tracing::warn!(
                    "Failed to add reaction '{}' to event {}: {}",
                    symbol.name(),
                    message.message_id,
                    e
                );
                failed += 1;
            }
        }
        if failed > 0 {
            tracing::error!(
                "{} of {} reactions could not be added to event {}",
                failed,
                symbols.len(),
                message.message_id
            );
        }

        tracing::info!(
            "Published event {} in guild {}",
            message.message_id,
            message.guild_id
        );

        Ok(message.message_id)
    }

    /// Re-renders a raid into its published message.
    ///
    /// # Returns
    /// - `Ok(true)` - Message updated
    /// - `Ok(false)` - The raid is not in the roster
    /// - `Err(GatewayError)` - The update call failed
    pub async fn refresh(&self, raid_id: u64) -> Result<bool, GatewayError> {
        let Some((message, document)) = self.roster.render(raid_id).await else {
            return Ok(false);
        };

        self.gateway.update_document(message, &document).await?;
        Ok(true)
    }

    /// Removes a raid and its message.
    pub async fn remove(&self, raid_id: u64) -> bool {
        self.roster.delete(raid_id, true).await
    }

    /// Signs a user up, updates the event message and sends the resulting notices.
    pub async fn sign_up(
        &self,
        raid_id: u64,
        user_id: u64,
        name: &str,
        spec: &str,
        role: &str,
        as_flex: bool,
    ) -> Result<(), RosterError> {
        let notices = self
            .roster
            .sign_up(raid_id, user_id, name, spec, role, as_flex)
            .await?;
        self.refresh_logged(raid_id).await;

        for notice in notices {
            if let Err(e) = self
                .gateway
                .send_direct_message(notice.user_id, &notice.text)
                .await
            {
                tracing::warn!("Failed to notify user {}: {}", notice.user_id, e);
            }
        }

        Ok(())
    }

    /// Removes a user from a raid and updates the event message.
    pub async fn withdraw(&self, raid_id: u64, user_id: u64) -> Result<bool, RosterError> {
        let removed = self.roster.withdraw(raid_id, user_id).await?;
        if removed {
            self.refresh_logged(raid_id).await;
        }
        Ok(removed)
    }

    /// Refreshes the event message; a failed update only costs a stale message.
    pub async fn refresh_logged(&self, raid_id: u64) {
        if let Err(e) = self.refresh(raid_id).await {
            tracing::warn!("Failed to update message of event {}: {}", raid_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use super::*;
    use crate::{model::raid::RaidRole, service::gateway::mock::MockGateway};
    use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
    use test_utils::builder::TestBuilder;

    fn catalog() -> RoleCatalog {
        let ids: HashMap<String, u64> = RoleCatalog::reaction_names()
            .enumerate()
            .map(|(i, name)| (name.to_string(), 500 + i as u64))
            .collect();
        RoleCatalog::new(&ids, None)
    }

    fn pending(open_world: bool) -> PendingRaid {
        let mut pending = PendingRaid::new(1, 2);
        pending.name = "Weekly Clear".to_string();
        pending.date = "Saturday, 29.02.2020".to_string();
        pending.time = "20:00".to_string();
        pending.channel = "Events".to_string();
        pending.is_open_world = open_world;
        pending.add_role(RaidRole::new(10, "Participants"));
        pending
    }

    fn setup(db: &DatabaseConnection) -> (Arc<MockGateway>, RaidRoster) {
        let gateway = Arc::new(MockGateway::new());
        gateway.add_channel(1, "events", 10);
        let roster = RaidRoster::new(db.clone(), gateway.clone());
        (gateway, roster)
    }

    /// Tests publishing a regular event.
    ///
    /// Expected: message sent, raid stored under the message id, all 13 reactions added
    #[tokio::test]
    async fn publishes_event() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let raid_id = lifecycle.publish(pending(false)).await.unwrap();

        let raid = roster.get(raid_id).await.unwrap();
        assert_eq!(raid.channel_id, 10);
        assert_eq!(entity::prelude::Raid::find().count(db).await?, 1);

        let state = gateway.state();
        assert_eq!(state.sent.len(), 1);
        assert_eq!(state.sent[0].2.message_id, raid_id);
        assert_eq!(state.reactions.len(), 13);
        assert!(state.reactions.iter().all(|(m, _)| m.message_id == raid_id));

        Ok(())
    }

    /// Tests that reactions are attached in declared order and a failure does not stop the rest.
    ///
    /// Expected: Check, Cancel, Edit attempted in order despite the second failing
    #[tokio::test]
    async fn open_world_reactions_continue_after_failure() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        gateway.state().failing_reactions.insert(1);
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let result = lifecycle.publish(pending(true)).await;

        assert!(result.is_ok());
        let names: Vec<_> = gateway
            .state()
            .reactions
            .iter()
            .map(|(_, name)| name.clone())
            .collect();
        assert_eq!(names, vec!["Check", "Cancel", "Edit"]);

        Ok(())
    }

    /// Tests that an unknown channel aborts before anything is sent.
    ///
    /// Expected: ChannelNotFound, nothing sent or stored
    #[tokio::test]
    async fn unknown_channel_sends_nothing() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        let catalog = catalog();

        let mut pending = pending(false);
        pending.channel = "nowhere".to_string();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let result = lifecycle.publish(pending).await;

        assert!(matches!(result, Err(PublishError::ChannelNotFound { .. })));
        assert!(gateway.state().sent.is_empty());
        assert_eq!(entity::prelude::Raid::find().count(db).await?, 0);

        Ok(())
    }

    /// Tests that a store failure removes the posted message.
    ///
    /// Expected: NotPersisted, message deleted, no reactions, raid not cached
    #[tokio::test]
    async fn store_failure_deletes_message() -> Result<(), DbErr> {
        // No tables, so storing the raid fails
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let result = lifecycle.publish(pending(false)).await;

        let message_id = match result {
            Err(PublishError::NotPersisted(message_id)) => message_id,
            other => panic!("expected NotPersisted, got {:?}", other),
        };
        let state = gateway.state();
        assert_eq!(state.deleted.len(), 1);
        assert_eq!(state.deleted[0].message_id, message_id);
        assert!(state.reactions.is_empty());
        drop(state);
        assert!(!roster.contains(message_id).await);

        Ok(())
    }

    /// Tests that a send failure leaves nothing behind.
    ///
    /// Expected: Send error, nothing stored
    #[tokio::test]
    async fn send_failure_stores_nothing() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        gateway.state().fail_send = true;
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let result = lifecycle.publish(pending(false)).await;

        assert!(matches!(result, Err(PublishError::Send(_))));
        assert_eq!(entity::prelude::Raid::find().count(db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_updates_message() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let raid_id = lifecycle.publish(pending(false)).await.unwrap();
        roster
            .sign_up(raid_id, 7, "Seven", "Druid", "Participants", false)
            .await
            .unwrap();

        assert!(lifecycle.refresh(raid_id).await.unwrap());
        assert!(!lifecycle.refresh(1).await.unwrap());

        let state = gateway.state();
        assert_eq!(state.updated.len(), 1);
        assert!(state.updated[0]
            .1
            .fields
            .iter()
            .any(|f| f.name == "Participants (1/10)"));

        Ok(())
    }

    /// Tests signing up through the lifecycle.
    ///
    /// Expected: message refreshed and the user notified, withdrawing refreshes again
    #[tokio::test]
    async fn sign_up_notifies_and_refreshes() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_raid_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let (gateway, roster) = setup(db);
        let catalog = catalog();

        let lifecycle = RaidLifecycle::new(&roster, gateway.as_ref(), &catalog);
        let raid_id = lifecycle.publish(pending(false)).await.unwrap();
        lifecycle
            .sign_up(raid_id, 7, "Seven", "Druid", "Participants", false)
            .await
            .unwrap();

        assert_eq!(gateway.state().updated.len(), 1);
        assert_eq!(
            gateway.messages_to(7),
            vec!["You are signed up for Weekly Clear as Participants (Druid).".to_string()]
        );

        assert!(lifecycle.withdraw(raid_id, 7).await.unwrap());
        assert!(!lifecycle.withdraw(raid_id, 7).await.unwrap());
        assert_eq!(gateway.state().updated.len(), 2);

        Ok(())
    }
}
