use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, TransactionTrait,
};

use crate::model::raid::RaidUser;

/// Participant rows of both the primary and the flex table.
pub struct RaidUserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RaidUserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every primary participant row.
    pub async fn get_all_primary(&self) -> Result<Vec<entity::raid_user::Model>, DbErr> {
        entity::prelude::RaidUser::find().all(self.db).await
    }

    /// Gets every flex participant row.
    pub async fn get_all_flex(&self) -> Result<Vec<entity::raid_user_flex::Model>, DbErr> {
        entity::prelude::RaidUserFlex::find().all(self.db).await
    }

    /// Stores the user's assignment, replacing whatever the user held before.
    ///
    /// The previous row is removed from both tables and the new row is written to the
    /// table matching `user.is_flex`, all in one transaction.
    ///
    /// # Arguments
    /// - `raid_id`: Raid the user signs up for
    /// - `user`: The new assignment
    ///
    /// # Returns
    /// - `Ok(())`: Assignment stored
    /// - `Err(DbErr)`: Database error; nothing was changed
    pub async fn replace(&self, raid_id: u64, user: &RaidUser) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        delete_user(&txn, raid_id, user.user_id).await?;

        if user.is_flex {
            entity::raid_user_flex::ActiveModel {
                raid_id: ActiveValue::Set(raid_id.to_string()),
                user_id: ActiveValue::Set(user.user_id.to_string()),
                username: ActiveValue::Set(user.name.clone()),
                spec: ActiveValue::Set(user.spec.clone()),
                role: ActiveValue::Set(user.role.clone()),
            }
            .insert(&txn)
            .await?;
        } else {
            entity::raid_user::ActiveModel {
                raid_id: ActiveValue::Set(raid_id.to_string()),
                user_id: ActiveValue::Set(user.user_id.to_string()),
                username: ActiveValue::Set(user.name.clone()),
                spec: ActiveValue::Set(user.spec.clone()),
                role: ActiveValue::Set(user.role.clone()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }

    /// Removes the user from both participant tables of a raid.
    ///
    /// # Returns
    /// - `Ok(true)`: At least one row was removed
    /// - `Ok(false)`: The user had no rows
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, raid_id: u64, user_id: u64) -> Result<bool, DbErr> {
        delete_user(self.db, raid_id, user_id).await
    }
}

async fn delete_user<C: ConnectionTrait>(db: &C, raid_id: u64, user_id: u64) -> Result<bool, DbErr> {
    let raid_id = raid_id.to_string();
    let user_id = user_id.to_string();

    let primary = entity::prelude::RaidUser::delete_many()
        .filter(entity::raid_user::Column::RaidId.eq(raid_id.as_str()))
        .filter(entity::raid_user::Column::UserId.eq(user_id.as_str()))
        .exec(db)
        .await?;
    let flex = entity::prelude::RaidUserFlex::delete_many()
        .filter(entity::raid_user_flex::Column::RaidId.eq(raid_id.as_str()))
        .filter(entity::raid_user_flex::Column::UserId.eq(user_id.as_str()))
        .exec(db)
        .await?;

    Ok(primary.rows_affected + flex.rows_affected > 0)
}
