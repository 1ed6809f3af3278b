//! Raid factory for creating test raid rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test raids with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::raid::RaidFactory;
///
/// let raid = RaidFactory::new(&db)
///     .name("Weekly Clear")
///     .roles("2:Tank;3:DPS")
///     .build()
///     .await?;
/// ```
pub struct RaidFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    guild_id: String,
    channel_id: String,
    leader_id: String,
    name: String,
    roles: String,
    permitted_groups: String,
    is_open_world: bool,
}

impl<'a> RaidFactory<'a> {
    /// Creates a new RaidFactory with default values.
    ///
    /// Defaults:
    /// - id, channel_id, leader_id: unique generated snowflakes
    /// - guild_id: `"1"`
    /// - name: `"Raid {id}"`
    /// - roles: `"2:Tank;3:DPS;1:!Support"`
    /// - permitted_groups: empty
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `RaidFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: id.to_string(),
            guild_id: "1".to_string(),
            channel_id: next_id().to_string(),
            leader_id: next_id().to_string(),
            name: format!("Raid {}", id),
            roles: "2:Tank;3:DPS;1:!Support".to_string(),
            permitted_groups: String::new(),
            is_open_world: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the encoded role list.
    pub fn roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = roles.into();
        self
    }

    pub fn permitted_groups(mut self, groups: impl Into<String>) -> Self {
        self.permitted_groups = groups.into();
        self
    }

    pub fn open_world(mut self, is_open_world: bool) -> Self {
        self.is_open_world = is_open_world;
        self
    }

    /// Builds and inserts the raid entity into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created raid entity
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::raid::Model, DbErr> {
        entity::raid::ActiveModel {
            id: ActiveValue::Set(self.id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            is_display_short: ActiveValue::Set(false),
            is_open_world: ActiveValue::Set(self.is_open_world),
            is_special_category: ActiveValue::Set(false),
            leader_id: ActiveValue::Set(self.leader_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(Some("Test raid description".to_string())),
            date: ActiveValue::Set("Saturday, 29.02.2020".to_string()),
            time: ActiveValue::Set("20:00".to_string()),
            roles: ActiveValue::Set(self.roles),
            permitted_groups: ActiveValue::Set(self.permitted_groups),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a raid with default values.
///
/// # Returns
/// - `Ok(Model)` - The created raid entity
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_raid(db: &DatabaseConnection) -> Result<entity::raid::Model, DbErr> {
    RaidFactory::new(db).build().await
}
