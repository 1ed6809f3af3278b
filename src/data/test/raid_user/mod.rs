use crate::{data::raid_user::RaidUserRepository, model::raid::RaidUser};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod replace;

fn participant(user_id: u64, role: &str, is_flex: bool) -> RaidUser {
    RaidUser {
        user_id,
        name: format!("User {}", user_id),
        spec: "Druid".to_string(),
        role: role.to_string(),
        is_flex,
    }
}
