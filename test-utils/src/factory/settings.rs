//! Factories for per-guild server settings.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a role group.
///
/// # Arguments
/// - `guild_id` - Guild the group belongs to
/// - `name` - Group name
/// - `roles` - Comma separated Discord role names
pub async fn create_role_group(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
    roles: &str,
) -> Result<entity::role_group::Model, DbErr> {
    entity::role_group::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        name: ActiveValue::Set(name.to_string()),
        roles: ActiveValue::Set(roles.to_string()),
    }
    .insert(db)
    .await
}

/// Creates a role template.
///
/// # Arguments
/// - `guild_id` - Guild the template belongs to
/// - `name` - Template name
/// - `roles` - Encoded role list, e.g. `"2:Tank;3:DPS"`
pub async fn create_role_template(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
    roles: &str,
) -> Result<entity::role_template::Model, DbErr> {
    entity::role_template::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        name: ActiveValue::Set(name.to_string()),
        roles: ActiveValue::Set(roles.to_string()),
    }
    .insert(db)
    .await
}

/// Sets the fractal channel of a guild.
///
/// # Arguments
/// - `guild_id` - Guild the setting belongs to
/// - `channel` - Channel name fractal events are posted in
pub async fn create_guild_setting(
    db: &DatabaseConnection,
    guild_id: &str,
    channel: &str,
) -> Result<entity::guild_setting::Model, DbErr> {
    entity::guild_setting::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        fractal_channel: ActiveValue::Set(Some(channel.to_string())),
    }
    .insert(db)
    .await
}
