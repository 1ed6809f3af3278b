use sea_orm::entity::prelude::*;

/// Weekly recurring event template.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auto_event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub creator_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub time: String,
    pub channel: String,
    /// Weekday of the event, 0 = Monday
    pub weekday: i32,
    /// Days before the event at which it is posted
    pub lead_days: i32,
    pub is_open_world: bool,
    pub is_display_short: bool,
    #[sea_orm(column_type = "Text")]
    pub roles: String,
    #[sea_orm(column_type = "Text")]
    pub permitted_groups: String,
    pub last_raid_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
