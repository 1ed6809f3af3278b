//! Factory methods for creating test data.
//!
//! Each table has a factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let raid = factory::raid::create_raid(&db).await?;
//! let user = factory::raid_user::create_raid_user(&db, &raid.id, "Tank").await?;
//!
//! let raid = factory::raid::RaidFactory::new(&db)
//!     .guild_id("42")
//!     .roles("2:Tank;1:!Support")
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `raid` - Create raid rows
//! - `raid_user` - Create primary and flex participant rows
//! - `settings` - Create guild setting, role group and role template rows
//! - `auto_event` - Create auto event rows
//! - `helpers` - Unique id generation

pub mod auto_event;
pub mod helpers;
pub mod raid;
pub mod raid_user;
pub mod settings;

pub use auto_event::create_auto_event;
pub use raid::create_raid;
pub use raid_user::{create_raid_user, create_raid_user_flex};
pub use settings::{create_guild_setting, create_role_group, create_role_template};
