use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AutoEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(AutoEvent::Id))
                    .col(string(AutoEvent::GuildId))
                    .col(string(AutoEvent::CreatorId))
                    .col(string(AutoEvent::Name))
                    .col(text(AutoEvent::Description))
                    .col(string(AutoEvent::Time))
                    .col(string(AutoEvent::Channel))
                    .col(integer(AutoEvent::Weekday))
                    .col(integer(AutoEvent::LeadDays))
                    .col(boolean(AutoEvent::IsOpenWorld).default(false))
                    .col(boolean(AutoEvent::IsDisplayShort).default(false))
                    .col(text(AutoEvent::Roles))
                    .col(text(AutoEvent::PermittedGroups).default(""))
                    .col(string_null(AutoEvent::LastRaidId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_auto_event_guild_id")
                    .table(AutoEvent::Table)
                    .col(AutoEvent::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_auto_event_guild_id")
                    .table(AutoEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AutoEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AutoEvent {
    Table,
    Id,
    GuildId,
    CreatorId,
    Name,
    Description,
    Time,
    Channel,
    Weekday,
    LeadDays,
    IsOpenWorld,
    IsDisplayShort,
    Roles,
    PermittedGroups,
    LastRaidId,
}
