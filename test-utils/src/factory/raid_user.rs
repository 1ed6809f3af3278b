//! Participant factories for the primary and flex participant tables.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a primary participant with a generated user id.
///
/// # Arguments
/// - `db` - Database connection
/// - `raid_id` - Raid the participant belongs to
/// - `role` - Role the participant holds
///
/// # Returns
/// - `Ok(Model)` - The created participant row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_raid_user(
    db: &DatabaseConnection,
    raid_id: &str,
    role: &str,
) -> Result<entity::raid_user::Model, DbErr> {
    let user_id = next_id();
    entity::raid_user::ActiveModel {
        raid_id: ActiveValue::Set(raid_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        username: ActiveValue::Set(format!("User {}", user_id)),
        spec: ActiveValue::Set("Firebrand".to_string()),
        role: ActiveValue::Set(role.to_string()),
    }
    .insert(db)
    .await
}

/// Creates a flex participant with a generated user id.
///
/// # Returns
/// - `Ok(Model)` - The created flex participant row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_raid_user_flex(
    db: &DatabaseConnection,
    raid_id: &str,
    role: &str,
) -> Result<entity::raid_user_flex::Model, DbErr> {
    let user_id = next_id();
    entity::raid_user_flex::ActiveModel {
        raid_id: ActiveValue::Set(raid_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        username: ActiveValue::Set(format!("User {}", user_id)),
        spec: ActiveValue::Set("Chronomancer".to_string()),
        role: ActiveValue::Set(role.to_string()),
    }
    .insert(db)
    .await
}
