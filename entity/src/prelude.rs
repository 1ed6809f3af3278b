pub use super::auto_event::Entity as AutoEvent;
pub use super::guild_setting::Entity as GuildSetting;
pub use super::raid::Entity as Raid;
pub use super::raid_user::Entity as RaidUser;
pub use super::raid_user_flex::Entity as RaidUserFlex;
pub use super::role_group::Entity as RoleGroup;
pub use super::role_template::Entity as RoleTemplate;
