use sea_orm::entity::prelude::*;

/// Primary role sign-up of a user for a raid.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "raid_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub raid_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub username: String,
    pub spec: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
