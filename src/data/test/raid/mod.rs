use crate::{
    data::raid::RaidRepository,
    model::raid::{PendingRaid, Raid, RaidRole},
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod remove_role;
mod update;

/// Builds an unstored raid with two roles.
fn sample_raid(id: u64) -> Raid {
    let mut pending = PendingRaid::new(1, 2);
    pending.name = "Weekly Clear".to_string();
    pending.description = "Full clear".to_string();
    pending.date = "Saturday, 29.02.2020".to_string();
    pending.time = "20:00".to_string();
    pending.permitted_groups.insert("Static".to_string());
    pending.add_role(RaidRole::new(2, "Tank"));
    pending.add_role(RaidRole::flex(1, "Support"));
    pending.into_raid(id, 10)
}
