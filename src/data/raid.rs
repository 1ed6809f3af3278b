use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};

use crate::{
    model::raid::Raid,
    util::format::{format_name_list, format_roles},
};

pub struct RaidRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RaidRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the raid row. Participants are stored separately.
    ///
    /// # Returns
    /// - `Ok(Model)`: The created raid row
    /// - `Err(DbErr)`: Database error, including a duplicate id
    pub async fn create(&self, raid: &Raid) -> Result<entity::raid::Model, DbErr> {
        to_active_model(raid).insert(self.db).await
    }

    /// Overwrites the metadata and role list of an existing raid row.
    ///
    /// # Returns
    /// - `Ok(Model)`: The updated raid row
    /// - `Err(DbErr::RecordNotUpdated)`: No row with the raid's id exists
    pub async fn update(&self, raid: &Raid) -> Result<entity::raid::Model, DbErr> {
        to_active_model(raid).update(self.db).await
    }

    /// Gets every stored raid row.
    pub async fn get_all(&self) -> Result<Vec<entity::raid::Model>, DbErr> {
        entity::prelude::Raid::find().all(self.db).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Option<entity::raid::Model>, DbErr> {
        entity::prelude::Raid::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    /// Stores a raid whose role was removed and deletes every participant row holding it.
    ///
    /// Both writes run in one transaction, so on failure neither the role list nor the
    /// participant rows change.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of participant rows removed
    /// - `Err(DbErr)`: Database error; nothing was changed
    pub async fn remove_role(&self, raid: &Raid, role: &str) -> Result<u64, DbErr> {
        let id = raid.id.to_string();
        let txn = self.db.begin().await?;

        let primary = entity::prelude::RaidUser::delete_many()
            .filter(entity::raid_user::Column::RaidId.eq(id.as_str()))
            .filter(entity::raid_user::Column::Role.eq(role))
            .exec(&txn)
            .await?;
        let flex = entity::prelude::RaidUserFlex::delete_many()
            .filter(entity::raid_user_flex::Column::RaidId.eq(id.as_str()))
            .filter(entity::raid_user_flex::Column::Role.eq(role))
            .exec(&txn)
            .await?;
        to_active_model(raid).update(&txn).await?;

        txn.commit().await?;

        Ok(primary.rows_affected + flex.rows_affected)
    }

    /// Deletes a raid together with all of its participant rows.
    ///
    /// Runs in one transaction so a failure leaves every table untouched.
    ///
    /// # Returns
    /// - `Ok(true)`: The raid row existed and was removed
    /// - `Ok(false)`: No raid row existed; stray participant rows were still removed
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: u64) -> Result<bool, DbErr> {
        self.delete_stored(&id.to_string()).await
    }

    /// Deletes a raid by its stored id, which may not be a valid snowflake.
    ///
    /// Used to purge rows that can no longer be converted into a [`Raid`].
    pub async fn delete_stored(&self, id: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::RaidUser::delete_many()
            .filter(entity::raid_user::Column::RaidId.eq(id))
            .exec(&txn)
            .await?;
        entity::prelude::RaidUserFlex::delete_many()
            .filter(entity::raid_user_flex::Column::RaidId.eq(id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Raid::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}

fn to_active_model(raid: &Raid) -> entity::raid::ActiveModel {
    let description = if raid.description.is_empty() {
        None
    } else {
        Some(raid.description.clone())
    };

    entity::raid::ActiveModel {
        id: ActiveValue::Set(raid.id.to_string()),
        guild_id: ActiveValue::Set(raid.guild_id.to_string()),
        channel_id: ActiveValue::Set(raid.channel_id.to_string()),
        is_display_short: ActiveValue::Set(raid.is_display_short),
        is_open_world: ActiveValue::Set(raid.is_open_world),
        is_special_category: ActiveValue::Set(raid.is_special_category),
        leader_id: ActiveValue::Set(raid.leader_id.to_string()),
        name: ActiveValue::Set(raid.name.clone()),
        description: ActiveValue::Set(description),
        date: ActiveValue::Set(raid.date.clone()),
        time: ActiveValue::Set(raid.time.clone()),
        roles: ActiveValue::Set(format_roles(raid.roles())),
        permitted_groups: ActiveValue::Set(format_name_list(&raid.permitted_groups)),
    }
}
