//! SeaORM entity models for the raidboard database.
//!
//! One module per table. Migrations in the `migration` crate create the matching schema.

pub mod prelude;

pub mod auto_event;
pub mod guild_setting;
pub mod raid;
pub mod raid_user;
pub mod raid_user_flex;
pub mod role_group;
pub mod role_template;
