//! Steps shared by the creation and auto creation conversations.
//!
//! Both conversations fill a [`PendingRaid`]; the field steps here validate one value
//! each and write it into the draft.

use crate::{
    error::{flow::FlowError, AppError},
    model::{
        raid::{PendingRaid, RaidRole},
        settings::RoleTemplate,
    },
    service::settings::SettingsService,
    state::BotState,
    util::format::{parse_name_list, parse_role_entry},
};

use super::{
    input::{is_keyword, parse_date, parse_time, parse_yes_no, DONE_KEYWORD},
    reply, StepOutcome,
};

/// Role name used for open world events, which only have a participant limit.
pub const PARTICIPANTS_ROLE: &str = "Participants";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    Date,
    Time,
    Channel,
    OpenWorld,
    /// Open world events only.
    Capacity,
    /// Regular events only.
    Roles,
    /// Skipped when the guild has no role groups.
    PermittedGroups,
    DisplayShort,
}

/// A pending raid being filled in, together with the guild settings offered while doing so.
pub struct RaidDraft {
    pub pending: PendingRaid,
    templates: Vec<RoleTemplate>,
    groups: Vec<String>,
}

impl RaidDraft {
    /// Loads the guild's role templates and role groups.
    pub async fn load(state: &BotState, guild_id: u64, leader_id: u64) -> Result<Self, AppError> {
        let settings = SettingsService::new(&state.db);
        let templates = settings.role_templates(guild_id).await?;
        let groups = settings
            .role_groups(guild_id)
            .await?
            .into_iter()
            .map(|group| group.name)
            .collect();

        Ok(Self {
            pending: PendingRaid::new(guild_id, leader_id),
            templates,
            groups,
        })
    }

    /// Field following `field` in the shared part of both conversations.
    pub fn field_after(&self, field: DraftField) -> Option<DraftField> {
        match field {
            DraftField::OpenWorld if self.pending.is_open_world => Some(DraftField::Capacity),
            DraftField::OpenWorld => Some(DraftField::Roles),
            DraftField::Capacity | DraftField::Roles if self.groups.is_empty() => {
                Some(DraftField::DisplayShort)
            }
            DraftField::Capacity | DraftField::Roles => Some(DraftField::PermittedGroups),
            DraftField::PermittedGroups => Some(DraftField::DisplayShort),
            DraftField::DisplayShort => None,
            DraftField::Name => Some(DraftField::Description),
            DraftField::Description => Some(DraftField::Date),
            DraftField::Date => Some(DraftField::Time),
            DraftField::Time => Some(DraftField::Channel),
            DraftField::Channel => Some(DraftField::OpenWorld),
        }
    }

    pub fn prompt(&self, field: DraftField) -> Vec<String> {
        match field {
            DraftField::Name => vec!["Enter the name of the event:".to_string()],
            DraftField::Description => vec!["Enter the description of the event:".to_string()],
            DraftField::Date => {
                vec!["Enter the date of the event (format: dd.mm.yyyy, e.g. 29.02.2020):".to_string()]
            }
            DraftField::Time => {
                vec!["Enter the time of the event (format: HH:MM, e.g. 20:00):".to_string()]
            }
            DraftField::Channel => {
                vec!["Enter the name of the channel the event should be posted in:".to_string()]
            }
            DraftField::OpenWorld => vec![
                "Is this an open world event? Open world events have no class roles, everyone signs up with a single reaction. (yes/no)"
                    .to_string(),
            ],
            DraftField::Capacity => vec!["How many participants can join?".to_string()],
            DraftField::Roles => {
                let mut messages = vec![
                    "Add the roles of the event, one per message, in the format amount:role name (e.g. 2:Tank). \
                     Prefix the role name with ! to make it flex only (e.g. 1:!Support). Type done when finished."
                        .to_string(),
                ];
                if !self.templates.is_empty() {
                    let names = self
                        .templates
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    messages.push(format!(
                        "You can also type the name of a role template to add all of its roles: {}",
                        names
                    ));
                }
                messages
            }
            DraftField::PermittedGroups => vec![format!(
                "Which role groups may sign up? Enter group names separated by commas, or none to allow everyone.\nAvailable groups: {}",
                self.groups.join(", ")
            )],
            DraftField::DisplayShort => {
                vec!["Should the event be displayed in the short form? (yes/no)".to_string()]
            }
        }
    }

    /// Validates input for `field` and stores it in the draft.
    pub async fn handle(
        &mut self,
        field: DraftField,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        let pending = &mut self.pending;

        match field {
            DraftField::Name | DraftField::Description => {
                if input.is_empty() {
                    reply(state, user_id, "Please enter some text.").await;
                    return Ok(StepOutcome::Retry);
                }
                if field == DraftField::Name {
                    pending.name = input.to_string();
                } else {
                    pending.description = input.to_string();
                }
            }
            DraftField::Date => match parse_date(input) {
                Some(date) => pending.date = date,
                None => {
                    reply(
                        state,
                        user_id,
                        "Please use the correct format: dd.mm.yyyy, e.g. 29.02.2020",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                }
            },
            DraftField::Time => match parse_time(input) {
                Some(time) => pending.time = time,
                None => {
                    reply(
                        state,
                        user_id,
                        "Please use the correct format: HH:MM, e.g. 20:00",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                }
            },
            DraftField::Channel => {
                let name = input.trim_start_matches('#').trim();
                let found = state
                    .gateway
                    .resolve_channel_by_name(pending.guild_id, name)
                    .await;
                match found {
                    Ok(Some(_)) => pending.channel = name.to_string(),
                    Ok(None) => {
                        reply(
                            state,
                            user_id,
                            "I could not find a text channel with that name. Please try again.",
                        )
                        .await;
                        return Ok(StepOutcome::Retry);
                    }
                    Err(e) => {
                        tracing::warn!("Channel lookup for '{}' failed: {}", name, e);
                        reply(
                            state,
                            user_id,
                            "I could not look up that channel right now. Please try again.",
                        )
                        .await;
                        return Ok(StepOutcome::Retry);
                    }
                }
            }
            DraftField::OpenWorld | DraftField::DisplayShort => {
                let Some(answer) = parse_yes_no(input) else {
                    reply(state, user_id, "Please answer yes or no.").await;
                    return Ok(StepOutcome::Retry);
                };
                if field == DraftField::OpenWorld {
                    pending.is_open_world = answer;
                } else {
                    pending.is_display_short = answer;
                }
            }
            DraftField::Capacity => {
                let Some(amount) = input.parse::<u32>().ok().filter(|amount| *amount > 0) else {
                    reply(state, user_id, "Please enter a positive number.").await;
                    return Ok(StepOutcome::Retry);
                };
                pending.clear_roles();
                pending.add_role(RaidRole::new(amount, PARTICIPANTS_ROLE));
            }
            DraftField::Roles => return self.handle_role(state, user_id, input).await,
            DraftField::PermittedGroups => {
                pending.permitted_groups.clear();
                if is_keyword(input, "none") {
                    return Ok(StepOutcome::Done);
                }

                let mut unknown = Vec::new();
                for name in parse_name_list(input) {
                    match self.groups.iter().find(|g| g.eq_ignore_ascii_case(&name)) {
                        Some(group) => {
                            self.pending.permitted_groups.insert(group.clone());
                        }
                        None => unknown.push(name),
                    }
                }

                if !unknown.is_empty() || self.pending.permitted_groups.is_empty() {
                    self.pending.permitted_groups.clear();
                    let text = if unknown.is_empty() {
                        "Please enter at least one role group, or none.".to_string()
                    } else {
                        format!("Unknown role groups: {}. Please try again.", unknown.join(", "))
                    };
                    reply(state, user_id, &text).await;
                    return Ok(StepOutcome::Retry);
                }
            }
        }

        Ok(StepOutcome::Done)
    }

    async fn handle_role(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        if is_keyword(input, DONE_KEYWORD) {
            if self.pending.roles().is_empty() {
                reply(state, user_id, "Please add at least one role first.").await;
                return Ok(StepOutcome::Retry);
            }
            return Ok(StepOutcome::Done);
        }

        if let Some(template) = self
            .templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(input))
        {
            let added = template
                .roles
                .iter()
                .filter(|role| self.pending.add_role((*role).clone()))
                .count();
            reply(
                state,
                user_id,
                &format!("Added {} roles from template {}.", added, template.name),
            )
            .await;
            return Ok(StepOutcome::Retry);
        }

        let text = match parse_role_entry(input) {
            Some(role) => {
                if self.pending.add_role(role) {
                    "Role added."
                } else {
                    "A role with that name already exists."
                }
            }
            None => "Invalid input: make sure it is in the format amount:role name, e.g. 2:Tank",
        };
        reply(state, user_id, text).await;

        Ok(StepOutcome::Retry)
    }
}
