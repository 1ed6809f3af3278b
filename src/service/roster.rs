//! In-memory roster of published raids with write-through persistence.
//!
//! The roster is the single owner of live [`Raid`] values. Every mutation is applied to
//! the cached raid and written to the database before the lock is released; when the
//! write fails the cached raid is restored, so the cache never diverges from storage.
//! The lock is never held across gateway calls.

use std::{collections::HashMap, sync::Arc};

use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::{
    data::{raid::RaidRepository, raid_user::RaidUserRepository},
    error::{roster::RosterError, AppError},
    model::{
        discord::MessageRef,
        document::DisplayDocument,
        raid::{Raid, RaidRole, RaidUser, RosterNotice},
    },
    service::gateway::MessagingGateway,
};

#[derive(Clone)]
pub struct RaidRoster {
    db: DatabaseConnection,
    gateway: Arc<dyn MessagingGateway>,
    raids: Arc<RwLock<HashMap<u64, Raid>>>,
}

impl RaidRoster {
    /// Creates an empty roster.
    pub fn new(db: DatabaseConnection, gateway: Arc<dyn MessagingGateway>) -> Self {
        Self {
            db,
            gateway,
            raids: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Loads every stored raid and reconciles it against its published message.
    ///
    /// Raids without roles or whose message can no longer be resolved are dropped and
    /// purged from storage. Participant rows referencing unknown raids are skipped.
    ///
    /// # Returns
    /// - `Ok(RaidRoster)` - Roster holding every surviving raid
    /// - `Err(AppError::DbErr(_))` - Reading or purging failed
    pub async fn load(
        db: DatabaseConnection,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Result<Self, AppError> {
        let roster = Self::new(db, gateway);
        roster.reconcile().await?;
        Ok(roster)
    }

    async fn reconcile(&self) -> Result<(), AppError> {
        let raid_repo = RaidRepository::new(&self.db);
        let user_repo = RaidUserRepository::new(&self.db);

        let mut raids = HashMap::new();
        let mut unreadable = Vec::new();
        for model in raid_repo.get_all().await? {
            let stored_id = model.id.clone();
            match Raid::from_entity(model) {
                Ok(raid) => {
                    raids.insert(raid.id, raid);
                }
                Err(e) => {
                    tracing::error!("Removing unreadable stored event {}: {}", stored_id, e);
                    unreadable.push(stored_id);
                }
            }
        }

        let primary = user_repo
            .get_all_primary()
            .await?
            .into_iter()
            .map(RaidUser::from_primary_entity);
        let flex = user_repo
            .get_all_flex()
            .await?
            .into_iter()
            .map(RaidUser::from_flex_entity);

        for participant in primary.chain(flex) {
            let (raid_id, user) = match participant {
                Ok(participant) => participant,
                Err(e) => {
                    tracing::error!("Skipping stored participant: {}", e);
                    continue;
                }
            };

            let Some(raid) = raids.get_mut(&raid_id) else {
                tracing::info!(
                    "Skipping participant {} of unknown event {}",
                    user.user_id,
                    raid_id
                );
                continue;
            };

            let RaidUser {
                user_id,
                name,
                spec,
                role,
                is_flex,
            } = user;
            if !raid.add_participant(user_id, name, spec, &role, is_flex, false) {
                tracing::warn!(
                    "Skipping participant {} of event {}: role '{}' unavailable",
                    user_id,
                    raid_id,
                    role
                );
            }
        }

        let mut stale = Vec::new();
        for raid in raids.values() {
            if raid.roles().is_empty() {
                tracing::warn!("Event {} has no roles, removing", raid.id);
                stale.push(raid.id);
                continue;
            }

            match self.gateway.resolve_message(message_ref(raid)).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::info!("Message of event {} no longer exists, removing", raid.id);
                    stale.push(raid.id);
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not resolve message of event {}, removing: {}",
                        raid.id,
                        e
                    );
                    stale.push(raid.id);
                }
            }
        }

        for raid_id in stale {
            raids.remove(&raid_id);
            raid_repo.delete(raid_id).await?;
        }
        for stored_id in unreadable {
            raid_repo.delete_stored(&stored_id).await?;
        }

        tracing::info!("Loaded {} events", raids.len());
        *self.raids.write().await = raids;

        Ok(())
    }

    /// Stores a newly published raid and adds it to the roster.
    ///
    /// # Returns
    /// - `true` - Stored and cached
    /// - `false` - The database rejected the raid; nothing was cached
    pub async fn insert(&self, raid: Raid) -> bool {
        if let Err(e) = RaidRepository::new(&self.db).create(&raid).await {
            tracing::error!("Failed to store event {}: {}", raid.id, e);
            return false;
        }

        self.raids.write().await.insert(raid.id, raid);
        true
    }

    /// Removes a raid from storage and from the roster.
    ///
    /// # Arguments
    /// - `raid_id` - Raid to remove
    /// - `delete_message` - Also delete the published message; failures are only logged
    ///
    /// # Returns
    /// - `true` - The raid existed and was removed
    /// - `false` - Unknown raid, or the database delete failed
    pub async fn delete(&self, raid_id: u64, delete_message: bool) -> bool {
        let stored = match RaidRepository::new(&self.db).delete(raid_id).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to delete event {}: {}", raid_id, e);
                return false;
            }
        };

        let cached = self.raids.write().await.remove(&raid_id);

        if delete_message {
            if let Some(raid) = &cached {
                if let Err(e) = self.gateway.delete_message(message_ref(raid)).await {
                    tracing::warn!("Failed to delete message of event {}: {}", raid_id, e);
                }
            }
        }

        stored || cached.is_some()
    }

    pub async fn get(&self, raid_id: u64) -> Option<Raid> {
        self.raids.read().await.get(&raid_id).cloned()
    }

    pub async fn contains(&self, raid_id: u64) -> bool {
        self.raids.read().await.contains_key(&raid_id)
    }

    /// Raids of a guild ordered by id, which is publication order.
    pub async fn raids_for_guild(&self, guild_id: u64) -> Vec<Raid> {
        let mut raids: Vec<Raid> = self
            .raids
            .read()
            .await
            .values()
            .filter(|raid| raid.guild_id == guild_id)
            .cloned()
            .collect();
        raids.sort_by_key(|raid| raid.id);
        raids
    }

    /// Current rendering of a raid and the message it belongs to.
    pub async fn render(&self, raid_id: u64) -> Option<(MessageRef, DisplayDocument)> {
        self.raids
            .read()
            .await
            .get(&raid_id)
            .map(|raid| (message_ref(raid), raid.render(raid.is_display_short)))
    }

    /// Signs a user up for a role, moving them if they already hold a slot.
    ///
    /// # Returns
    /// - `Ok(notices)` - Signed up; notices are to be delivered by the caller
    /// - `Err(RosterError::RaidNotFound)` - Unknown raid
    /// - `Err(RosterError::RoleUnavailable)` - Unknown, flex-only or full role
    /// - `Err(RosterError::Store)` - Database write failed; nothing changed
    pub async fn sign_up(
        &self,
        raid_id: u64,
        user_id: u64,
        name: &str,
        spec: &str,
        role: &str,
        as_flex: bool,
    ) -> Result<Vec<RosterNotice>, RosterError> {
        let mut raids = self.raids.write().await;
        let raid = raids
            .get_mut(&raid_id)
            .ok_or(RosterError::RaidNotFound(raid_id))?;

        let snapshot = raid.clone();
        if !raid.add_participant(user_id, name, spec, role, as_flex, true) {
            return Err(RosterError::RoleUnavailable(role.to_string()));
        }

        let Some(user) = raid.participant(user_id).cloned() else {
            *raid = snapshot;
            return Err(RosterError::RoleUnavailable(role.to_string()));
        };

        if let Err(e) = RaidUserRepository::new(&self.db).replace(raid_id, &user).await {
            *raid = snapshot;
            return Err(e.into());
        }

        Ok(raid.take_notices())
    }

    /// Removes a user from a raid.
    ///
    /// # Returns
    /// - `Ok(true)` - The user was signed up and has been removed
    /// - `Ok(false)` - The user was not signed up
    pub async fn withdraw(&self, raid_id: u64, user_id: u64) -> Result<bool, RosterError> {
        let mut raids = self.raids.write().await;
        let raid = raids
            .get_mut(&raid_id)
            .ok_or(RosterError::RaidNotFound(raid_id))?;

        if raid.participant(user_id).is_none() {
            return Ok(false);
        }

        RaidUserRepository::new(&self.db)
            .delete(raid_id, user_id)
            .await?;
        raid.remove_participant(user_id);

        Ok(true)
    }

    /// Applies a metadata change and persists the raid row.
    pub async fn update_details<F>(&self, raid_id: u64, change: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Raid) + Send,
    {
        let mut raids = self.raids.write().await;
        let raid = raids
            .get_mut(&raid_id)
            .ok_or(RosterError::RaidNotFound(raid_id))?;

        let snapshot = raid.clone();
        change(raid);

        if let Err(e) = RaidRepository::new(&self.db).update(raid).await {
            *raid = snapshot;
            return Err(e.into());
        }

        Ok(())
    }

    /// Adds a role to a raid.
    ///
    /// # Returns
    /// - `Ok(true)` - Added and stored
    /// - `Ok(false)` - A role with that name already exists
    pub async fn add_role(&self, raid_id: u64, role: RaidRole) -> Result<bool, RosterError> {
        let mut raids = self.raids.write().await;
        let raid = raids
            .get_mut(&raid_id)
            .ok_or(RosterError::RaidNotFound(raid_id))?;

        let snapshot = raid.clone();
        if !raid.add_role(role) {
            return Ok(false);
        }

        if let Err(e) = RaidRepository::new(&self.db).update(raid).await {
            *raid = snapshot;
            return Err(e.into());
        }

        Ok(true)
    }

    /// Removes a role and everyone assigned to it.
    ///
    /// # Returns
    /// - `Ok(removed)` - Participants that held the role
    /// - `Err(RosterError::RoleNotRemovable)` - Unknown role, or the last role of the raid
    pub async fn remove_role(&self, raid_id: u64, name: &str) -> Result<Vec<RaidUser>, RosterError> {
        let mut raids = self.raids.write().await;
        let raid = raids
            .get_mut(&raid_id)
            .ok_or(RosterError::RaidNotFound(raid_id))?;

        let snapshot = raid.clone();
        let Some(role) = raid.role(name).map(|role| role.name.clone()) else {
            return Err(RosterError::RoleNotRemovable(name.to_string()));
        };
        let Some(removed) = raid.remove_role(&role) else {
            return Err(RosterError::RoleNotRemovable(name.to_string()));
        };

        if let Err(e) = RaidRepository::new(&self.db).remove_role(raid, &role).await {
            *raid = snapshot;
            return Err(e.into());
        }

        Ok(removed)
    }
}

fn message_ref(raid: &Raid) -> MessageRef {
    MessageRef {
        guild_id: raid.guild_id,
        channel_id: raid.channel_id,
        message_id: raid.id,
    }
}
