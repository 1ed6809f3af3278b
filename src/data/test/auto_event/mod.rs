use crate::{
    data::auto_event::AutoEventRepository,
    model::{
        auto_event::{AutoEvent, CreateAutoEventParams},
        raid::{PendingRaid, RaidRole},
    },
};
use chrono::Weekday;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod set_last_raid;

fn params(guild_id: u64) -> CreateAutoEventParams {
    let mut template = PendingRaid::new(guild_id, 9);
    template.name = "Weekly".to_string();
    template.description = "Every week".to_string();
    template.time = "20:00".to_string();
    template.channel = "events".to_string();
    template.add_role(RaidRole::new(5, "Participants"));

    CreateAutoEventParams {
        guild_id,
        creator_id: 9,
        template,
        weekday: Weekday::Sat,
        lead_days: 2,
    }
}
