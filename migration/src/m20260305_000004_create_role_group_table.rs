use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleGroup::Table)
                    .if_not_exists()
                    .col(string(RoleGroup::GuildId))
                    .col(string(RoleGroup::Name))
                    .col(text(RoleGroup::Roles))
                    .primary_key(
                        Index::create()
                            .col(RoleGroup::GuildId)
                            .col(RoleGroup::Name),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RoleGroup {
    Table,
    GuildId,
    Name,
    Roles,
}
