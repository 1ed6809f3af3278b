use crate::{
    data::settings::{GuildSettingRepository, RoleGroupRepository, RoleTemplateRepository},
    model::{
        raid::RaidRole,
        settings::{RoleGroup, RoleTemplate},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod guild_setting;
mod role_group;
mod role_template;
