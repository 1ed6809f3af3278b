use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to raid: rows are purged explicitly together with their raid.
        manager
            .create_table(
                Table::create()
                    .table(RaidUser::Table)
                    .if_not_exists()
                    .col(string(RaidUser::RaidId))
                    .col(string(RaidUser::UserId))
                    .col(string(RaidUser::Username))
                    .col(string(RaidUser::Spec))
                    .col(string(RaidUser::Role))
                    .primary_key(
                        Index::create()
                            .col(RaidUser::RaidId)
                            .col(RaidUser::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raid_user_raid_id")
                    .table(RaidUser::Table)
                    .col(RaidUser::RaidId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_raid_user_raid_id")
                    .table(RaidUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RaidUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RaidUser {
    Table,
    RaidId,
    UserId,
    Username,
    Spec,
    Role,
}
