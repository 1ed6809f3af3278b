use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleTemplate::Table)
                    .if_not_exists()
                    .col(string(RoleTemplate::GuildId))
                    .col(string(RoleTemplate::Name))
                    .col(text(RoleTemplate::Roles))
                    .primary_key(
                        Index::create()
                            .col(RoleTemplate::GuildId)
                            .col(RoleTemplate::Name),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleTemplate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RoleTemplate {
    Table,
    GuildId,
    Name,
    Roles,
}
