//! Domain model for weekly recurring events.

use chrono::{Days, NaiveDate, Weekday};

use crate::{
    error::{internal::InternalError, AppError},
    model::raid::PendingRaid,
    util::{
        format::{parse_name_list, parse_roles},
        parse::parse_u64_from_string,
    },
};

/// A weekly event template that the scheduler publishes automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoEvent {
    pub id: i32,
    pub guild_id: u64,
    pub creator_id: u64,
    /// Everything but the date of the raids to publish.
    pub template: PendingRaid,
    /// Day of the week the event takes place.
    pub weekday: Weekday,
    /// How many days before the event it is published.
    pub lead_days: u32,
    /// Raid published by the latest run, removed on the next one.
    pub last_raid_id: Option<u64>,
}

impl AutoEvent {
    /// Converts an entity model to an auto event domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(AutoEvent)` - Converted auto event
    /// - `Err(AppError::InternalErr(_))` - Malformed id, weekday or lead time
    pub fn from_entity(entity: entity::auto_event::Model) -> Result<Self, AppError> {
        let guild_id = parse_u64_from_string(entity.guild_id)?;
        let creator_id = parse_u64_from_string(entity.creator_id)?;

        let weekday = u8::try_from(entity.weekday)
            .ok()
            .and_then(|day| Weekday::try_from(day).ok())
            .ok_or_else(|| InternalError::invalid_value("weekday", entity.weekday))?;
        let lead_days = u32::try_from(entity.lead_days)
            .ok()
            .filter(|days| *days < 7)
            .ok_or_else(|| InternalError::invalid_value("lead_days", entity.lead_days))?;

        let last_raid_id = entity
            .last_raid_id
            .map(parse_u64_from_string)
            .transpose()?;

        let mut template = PendingRaid::new(guild_id, creator_id);
        template.name = entity.name;
        template.description = entity.description;
        template.time = entity.time;
        template.channel = entity.channel;
        template.is_open_world = entity.is_open_world;
        template.is_display_short = entity.is_display_short;
        template.permitted_groups = parse_name_list(&entity.permitted_groups)
            .into_iter()
            .collect();
        for role in parse_roles(&entity.roles) {
            template.add_role(role);
        }

        Ok(Self {
            id: entity.id,
            guild_id,
            creator_id,
            template,
            weekday,
            lead_days,
            last_raid_id,
        })
    }

    /// Day of the week the raid is published on.
    pub fn posting_weekday(&self) -> Weekday {
        posting_weekday(self.weekday, self.lead_days)
    }

    /// Builds the pending raid for a run on `posting_date`.
    pub fn pending_for(&self, posting_date: NaiveDate) -> PendingRaid {
        let event_date = posting_date
            .checked_add_days(Days::new(u64::from(self.lead_days)))
            .unwrap_or(posting_date);

        let mut pending = self.template.clone();
        pending.date = event_date.format("%A, %d.%m.%Y").to_string();
        pending
    }
}

/// Parameters for registering a new auto event.
#[derive(Debug, Clone)]
pub struct CreateAutoEventParams {
    pub guild_id: u64,
    pub creator_id: u64,
    pub template: PendingRaid,
    pub weekday: Weekday,
    pub lead_days: u32,
}

/// Weekday that lies `lead_days` before `weekday`.
pub fn posting_weekday(weekday: Weekday, lead_days: u32) -> Weekday {
    let offset = 7 - (lead_days % 7);
    (0..offset).fold(weekday, |day, _| day.succ())
}
