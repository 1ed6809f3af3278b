use std::collections::BTreeSet;

use sea_orm::DatabaseConnection;

use crate::{
    data::settings::{GuildSettingRepository, RoleGroupRepository, RoleTemplateRepository},
    error::AppError,
    model::{
        raid::RaidRole,
        settings::{RoleGroup, RoleTemplate},
    },
};

/// Per-guild settings: role groups, role templates and the fractal channel.
pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the role groups of a guild ordered by name
    pub async fn role_groups(&self, guild_id: u64) -> Result<Vec<RoleGroup>, AppError> {
        RoleGroupRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?
            .into_iter()
            .map(RoleGroup::from_entity)
            .collect()
    }

    /// Creates or replaces a role group
    pub async fn save_role_group(
        &self,
        guild_id: u64,
        name: &str,
        roles: &[String],
    ) -> Result<RoleGroup, AppError> {
        let model = RoleGroupRepository::new(self.db)
            .upsert(guild_id, name, roles)
            .await?;

        RoleGroup::from_entity(model)
    }

    pub async fn delete_role_group(&self, guild_id: u64, name: &str) -> Result<bool, AppError> {
        Ok(RoleGroupRepository::new(self.db)
            .delete(guild_id, name)
            .await?)
    }

    /// Gets the role templates of a guild ordered by name
    pub async fn role_templates(&self, guild_id: u64) -> Result<Vec<RoleTemplate>, AppError> {
        RoleTemplateRepository::new(self.db)
            .get_by_guild(guild_id)
            .await?
            .into_iter()
            .map(RoleTemplate::from_entity)
            .collect()
    }

    /// Creates or replaces a role template
    pub async fn save_role_template(
        &self,
        guild_id: u64,
        name: &str,
        roles: &[RaidRole],
    ) -> Result<RoleTemplate, AppError> {
        let model = RoleTemplateRepository::new(self.db)
            .upsert(guild_id, name, roles)
            .await?;

        RoleTemplate::from_entity(model)
    }

    pub async fn delete_role_template(&self, guild_id: u64, name: &str) -> Result<bool, AppError> {
        Ok(RoleTemplateRepository::new(self.db)
            .delete(guild_id, name)
            .await?)
    }

    /// Name of the channel fractal events are posted in
    pub async fn fractal_channel(&self, guild_id: u64) -> Result<Option<String>, AppError> {
        Ok(GuildSettingRepository::new(self.db)
            .get_fractal_channel(guild_id)
            .await?)
    }

    pub async fn set_fractal_channel(&self, guild_id: u64, channel: &str) -> Result<(), AppError> {
        GuildSettingRepository::new(self.db)
            .set_fractal_channel(guild_id, channel)
            .await?;
        Ok(())
    }

    /// Names of the role groups a member belongs to through their Discord roles
    pub async fn groups_for_member(
        &self,
        guild_id: u64,
        member_roles: &[String],
    ) -> Result<BTreeSet<String>, AppError> {
        Ok(self
            .role_groups(guild_id)
            .await?
            .into_iter()
            .filter(|group| group.matches(member_roles))
            .map(|group| group.name)
            .collect())
    }
}
