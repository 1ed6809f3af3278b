use chrono::Weekday;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::auto_event::CreateAutoEventParams,
    util::format::{format_name_list, format_roles},
};

pub struct AutoEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AutoEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new auto event.
    ///
    /// # Arguments
    /// - `params`: Template, schedule and owner of the auto event
    ///
    /// # Returns
    /// - `Ok(Model)`: The created auto event with its generated id
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        params: &CreateAutoEventParams,
    ) -> Result<entity::auto_event::Model, DbErr> {
        let template = &params.template;

        entity::auto_event::ActiveModel {
            guild_id: ActiveValue::Set(params.guild_id.to_string()),
            creator_id: ActiveValue::Set(params.creator_id.to_string()),
            name: ActiveValue::Set(template.name.clone()),
            description: ActiveValue::Set(template.description.clone()),
            time: ActiveValue::Set(template.time.clone()),
            channel: ActiveValue::Set(template.channel.clone()),
            weekday: ActiveValue::Set(weekday_to_column(params.weekday)),
            lead_days: ActiveValue::Set(params.lead_days as i32),
            is_open_world: ActiveValue::Set(template.is_open_world),
            is_display_short: ActiveValue::Set(template.is_display_short),
            roles: ActiveValue::Set(format_roles(template.roles())),
            permitted_groups: ActiveValue::Set(format_name_list(&template.permitted_groups)),
            last_raid_id: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::auto_event::Model>, DbErr> {
        entity::prelude::AutoEvent::find_by_id(id).one(self.db).await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::auto_event::Model>, DbErr> {
        entity::prelude::AutoEvent::find().all(self.db).await
    }

    /// Gets the auto events of a guild in creation order.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<entity::auto_event::Model>, DbErr> {
        entity::prelude::AutoEvent::find()
            .filter(entity::auto_event::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::auto_event::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::AutoEvent::find()
            .filter(entity::auto_event::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }

    /// Records the raid published by the latest run.
    ///
    /// # Returns
    /// - `Ok(())`: Updated
    /// - `Err(DbErr::RecordNotUpdated)`: The auto event no longer exists
    pub async fn set_last_raid(&self, id: i32, raid_id: Option<u64>) -> Result<(), DbErr> {
        entity::auto_event::ActiveModel {
            id: ActiveValue::Unchanged(id),
            last_raid_id: ActiveValue::Set(raid_id.map(|raid_id| raid_id.to_string())),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes an auto event.
    ///
    /// # Returns
    /// - `Ok(true)`: The auto event existed and was removed
    /// - `Ok(false)`: Not found
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AutoEvent::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Stores weekdays as days from Monday.
fn weekday_to_column(weekday: Weekday) -> i32 {
    weekday.num_days_from_monday() as i32
}
