use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::raid::RaidRole,
    util::format::{format_name_list, format_roles},
};

pub struct RoleGroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleGroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a role group or replaces the roles of an existing one with the same name.
    ///
    /// # Arguments
    /// - `guild_id`: Discord guild ID (u64, stored as string)
    /// - `name`: Group name
    /// - `roles`: Discord role names belonging to the group
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored role group
    /// - `Err(DbErr)`: Database error
    pub async fn upsert(
        &self,
        guild_id: u64,
        name: &str,
        roles: &[String],
    ) -> Result<entity::role_group::Model, DbErr> {
        entity::prelude::RoleGroup::insert(entity::role_group::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            roles: ActiveValue::Set(format_name_list(roles)),
        })
        .on_conflict(
            OnConflict::columns([
                entity::role_group::Column::GuildId,
                entity::role_group::Column::Name,
            ])
            .update_column(entity::role_group::Column::Roles)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Gets all role groups of a guild ordered by name.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<entity::role_group::Model>, DbErr> {
        entity::prelude::RoleGroup::find()
            .filter(entity::role_group::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::role_group::Column::Name)
            .all(self.db)
            .await
    }

    /// Deletes a role group.
    ///
    /// # Returns
    /// - `Ok(true)`: The group existed and was removed
    /// - `Ok(false)`: No group with that name exists in the guild
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::RoleGroup::delete_many()
            .filter(entity::role_group::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::role_group::Column::Name.eq(name))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct RoleTemplateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleTemplateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a role template or replaces the roles of an existing one with the same name.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored role template
    /// - `Err(DbErr)`: Database error
    pub async fn upsert(
        &self,
        guild_id: u64,
        name: &str,
        roles: &[RaidRole],
    ) -> Result<entity::role_template::Model, DbErr> {
        entity::prelude::RoleTemplate::insert(entity::role_template::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            roles: ActiveValue::Set(format_roles(roles)),
        })
        .on_conflict(
            OnConflict::columns([
                entity::role_template::Column::GuildId,
                entity::role_template::Column::Name,
            ])
            .update_column(entity::role_template::Column::Roles)
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }

    /// Gets all role templates of a guild ordered by name.
    pub async fn get_by_guild(
        &self,
        guild_id: u64,
    ) -> Result<Vec<entity::role_template::Model>, DbErr> {
        entity::prelude::RoleTemplate::find()
            .filter(entity::role_template::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::role_template::Column::Name)
            .all(self.db)
            .await
    }

    /// Deletes a role template.
    ///
    /// # Returns
    /// - `Ok(true)`: The template existed and was removed
    /// - `Ok(false)`: No template with that name exists in the guild
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, guild_id: u64, name: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::RoleTemplate::delete_many()
            .filter(entity::role_template::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::role_template::Column::Name.eq(name))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

pub struct GuildSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the fractal channel name of a guild, if one was set.
    pub async fn get_fractal_channel(&self, guild_id: u64) -> Result<Option<String>, DbErr> {
        Ok(entity::prelude::GuildSetting::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .and_then(|setting| setting.fractal_channel))
    }

    /// Sets the fractal channel of a guild, creating the settings row if needed.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored settings row
    /// - `Err(DbErr)`: Database error
    pub async fn set_fractal_channel(
        &self,
        guild_id: u64,
        channel: &str,
    ) -> Result<entity::guild_setting::Model, DbErr> {
        entity::prelude::GuildSetting::insert(entity::guild_setting::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            fractal_channel: ActiveValue::Set(Some(channel.to_string())),
        })
        .on_conflict(
            OnConflict::column(entity::guild_setting::Column::GuildId)
                .update_column(entity::guild_setting::Column::FractalChannel)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }
}
