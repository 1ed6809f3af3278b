//! Auto event factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a weekly auto event on Saturdays, posted two days ahead.
///
/// # Arguments
/// - `guild_id` - Guild the auto event belongs to
///
/// # Returns
/// - `Ok(Model)` - The created auto event row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_auto_event(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::auto_event::Model, DbErr> {
    let id = next_id();
    entity::auto_event::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        creator_id: ActiveValue::Set(next_id().to_string()),
        name: ActiveValue::Set(format!("Auto Event {}", id)),
        description: ActiveValue::Set("Weekly run".to_string()),
        time: ActiveValue::Set("20:00".to_string()),
        channel: ActiveValue::Set("events".to_string()),
        weekday: ActiveValue::Set(5),
        lead_days: ActiveValue::Set(2),
        is_open_world: ActiveValue::Set(false),
        is_display_short: ActiveValue::Set(false),
        roles: ActiveValue::Set("2:Tank;3:DPS".to_string()),
        permitted_groups: ActiveValue::Set(String::new()),
        last_raid_id: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
