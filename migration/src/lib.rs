pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_raid_table;
mod m20260301_000002_create_raid_user_table;
mod m20260301_000003_create_raid_user_flex_table;
mod m20260305_000004_create_role_group_table;
mod m20260305_000005_create_role_template_table;
mod m20260312_000006_create_auto_event_table;
mod m20260320_000007_create_guild_setting_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_raid_table::Migration),
            Box::new(m20260301_000002_create_raid_user_table::Migration),
            Box::new(m20260301_000003_create_raid_user_flex_table::Migration),
            Box::new(m20260305_000004_create_role_group_table::Migration),
            Box::new(m20260305_000005_create_role_template_table::Migration),
            Box::new(m20260312_000006_create_auto_event_table::Migration),
            Box::new(m20260320_000007_create_guild_setting_table::Migration),
        ]
    }
}
