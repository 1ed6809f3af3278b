use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Raid::Table)
                    .if_not_exists()
                    .col(string(Raid::Id).primary_key())
                    .col(string(Raid::GuildId))
                    .col(string(Raid::ChannelId))
                    .col(boolean(Raid::IsDisplayShort).default(false))
                    .col(boolean(Raid::IsOpenWorld).default(false))
                    .col(boolean(Raid::IsSpecialCategory).default(false))
                    .col(string(Raid::LeaderId))
                    .col(string(Raid::Name))
                    .col(text_null(Raid::Description))
                    .col(string(Raid::Date))
                    .col(string(Raid::Time))
                    .col(text(Raid::Roles))
                    .col(text(Raid::PermittedGroups).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Raid::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Raid {
    Table,
    Id,
    GuildId,
    ChannelId,
    IsDisplayShort,
    IsOpenWorld,
    IsSpecialCategory,
    LeaderId,
    Name,
    Description,
    Date,
    Time,
    Roles,
    PermittedGroups,
}
