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
                    .table(RaidUserFlex::Table)
                    .if_not_exists()
                    .col(string(RaidUserFlex::RaidId))
                    .col(string(RaidUserFlex::UserId))
                    .col(string(RaidUserFlex::Username))
                    .col(string(RaidUserFlex::Spec))
                    .col(string(RaidUserFlex::Role))
                    .primary_key(
                        Index::create()
                            .col(RaidUserFlex::RaidId)
                            .col(RaidUserFlex::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_raid_user_flex_raid_id")
                    .table(RaidUserFlex::Table)
                    .col(RaidUserFlex::RaidId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_raid_user_flex_raid_id")
                    .table(RaidUserFlex::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RaidUserFlex::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RaidUserFlex {
    Table,
    RaidId,
    UserId,
    Username,
    Spec,
    Role,
}
