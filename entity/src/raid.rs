use sea_orm::entity::prelude::*;

/// A published event. `id` is the Discord message id of the event post.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "raid")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub is_display_short: bool,
    pub is_open_world: bool,
    pub is_special_category: bool,
    pub leader_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub date: String,
    pub time: String,
    /// `amount:name;amount:!name` encoded role list
    #[sea_orm(column_type = "Text")]
    pub roles: String,
    /// Comma separated role group names, empty when unrestricted
    #[sea_orm(column_type = "Text")]
    pub permitted_groups: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
