use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, roster::RosterError},
    model::raid::Raid,
    service::{lifecycle::RaidLifecycle, lock::LockScope},
    state::BotState,
    util::format::parse_role_entry,
};

use super::{
    input::{is_keyword, numbered, parse_choice, parse_date, parse_time, pick, DONE_KEYWORD},
    reply, ConversationFlow, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    Menu,
    Name,
    Description,
    Date,
    Time,
    AddRole,
    RemoveRole,
}

const MENU: [(EditStep, &str); 6] = [
    (EditStep::Name, "Change name"),
    (EditStep::Description, "Change description"),
    (EditStep::Date, "Change date"),
    (EditStep::Time, "Change time"),
    (EditStep::AddRole, "Add role"),
    (EditStep::RemoveRole, "Remove role"),
];

/// Lets the leader change a published event. Holds the raid's edit lock until it ends.
pub struct EditFlow {
    raid_id: u64,
    role_names: Vec<String>,
    /// Option picked in the menu; `None` while the menu is waiting or after `done`.
    selected: Option<EditStep>,
    step: EditStep,
}

impl EditFlow {
    /// The caller must hold the raid's edit lock.
    pub fn new(raid: &Raid) -> Self {
        Self {
            raid_id: raid.id,
            role_names: role_names(raid),
            selected: None,
            step: EditStep::Menu,
        }
    }

    async fn apply<F>(&self, state: &BotState, change: F) -> Result<(), FlowError>
    where
        F: FnOnce(&mut Raid) + Send,
    {
        state
            .roster
            .update_details(self.raid_id, change)
            .await
            .map_err(missing_raid)?;
        RaidLifecycle::from_state(state)
            .refresh_logged(self.raid_id)
            .await;
        Ok(())
    }

    async fn reload_roles(&mut self, state: &BotState) -> Result<(), FlowError> {
        let raid = state
            .roster
            .get(self.raid_id)
            .await
            .ok_or(FlowError::SessionMissing)?;
        self.role_names = role_names(&raid);
        Ok(())
    }
}

fn role_names(raid: &Raid) -> Vec<String> {
    raid.roles().iter().map(|role| role.name.clone()).collect()
}

fn missing_raid(error: RosterError) -> FlowError {
    match error {
        RosterError::RaidNotFound(_) => FlowError::SessionMissing,
        other => other.into(),
    }
}

#[async_trait]
impl ConversationFlow for EditFlow {
    type Step = EditStep;

    fn set_step(&mut self, step: EditStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        let text = match self.step {
            EditStep::Menu => {
                let options: Vec<&str> = MENU.iter().map(|(_, label)| *label).collect();
                format!(
                    "What do you want to change? Type done when finished.\n{}",
                    numbered(&options)
                )
            }
            EditStep::Name => "Enter the new name:".to_string(),
            EditStep::Description => "Enter the new description:".to_string(),
            EditStep::Date => "Enter the new date (format: dd.mm.yyyy):".to_string(),
            EditStep::Time => "Enter the new time (format: HH:MM):".to_string(),
            EditStep::AddRole => {
                "Enter the role to add in the format amount:role name (e.g. 2:Tank):".to_string()
            }
            EditStep::RemoveRole => format!(
                "Which role should be removed? Everyone signed up for it will be removed too.\n{}",
                numbered(&self.role_names)
            ),
        };
        vec![text]
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        match self.step {
            EditStep::Menu => {
                if is_keyword(input, DONE_KEYWORD) {
                    self.selected = None;
                    return Ok(StepOutcome::Done);
                }
                let Some(index) = parse_choice(input, MENU.len()) else {
                    reply(state, user_id, "Please choose one of the listed options.").await;
                    return Ok(StepOutcome::Retry);
                };
                self.selected = Some(MENU[index].0);
            }
            EditStep::Name | EditStep::Description => {
                if input.is_empty() {
                    reply(state, user_id, "Please enter some text.").await;
                    return Ok(StepOutcome::Retry);
                }
                let value = input.to_string();
                if self.step == EditStep::Name {
                    self.apply(state, move |raid| raid.name = value).await?;
                } else {
                    self.apply(state, move |raid| raid.description = value).await?;
                }
            }
            EditStep::Date => {
                let Some(date) = parse_date(input) else {
                    reply(
                        state,
                        user_id,
                        "Please use the correct format: dd.mm.yyyy, e.g. 29.02.2020",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                };
                self.apply(state, move |raid| raid.date = date).await?;
            }
            EditStep::Time => {
                let Some(time) = parse_time(input) else {
                    reply(
                        state,
                        user_id,
                        "Please use the correct format: HH:MM, e.g. 20:00",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                };
                self.apply(state, move |raid| raid.time = time).await?;
            }
            EditStep::AddRole => {
                let Some(role) = parse_role_entry(input) else {
                    reply(
                        state,
                        user_id,
                        "Invalid input: make sure it is in the format amount:role name, e.g. 2:Tank",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                };
                let added = state
                    .roster
                    .add_role(self.raid_id, role)
                    .await
                    .map_err(missing_raid)?;
                if !added {
                    reply(state, user_id, "A role with that name already exists.").await;
                    return Ok(StepOutcome::Retry);
                }
                RaidLifecycle::from_state(state)
                    .refresh_logged(self.raid_id)
                    .await;
                self.reload_roles(state).await?;
            }
            EditStep::RemoveRole => {
                let Some(name) = pick(input, &self.role_names).cloned() else {
                    reply(state, user_id, "Please choose one of the listed roles.").await;
                    return Ok(StepOutcome::Retry);
                };

                let removed = match state.roster.remove_role(self.raid_id, &name).await {
                    Ok(removed) => removed,
                    Err(RosterError::RoleNotRemovable(_)) => {
                        reply(
                            state,
                            user_id,
                            "That role cannot be removed, an event needs at least one role.",
                        )
                        .await;
                        return Ok(StepOutcome::Retry);
                    }
                    Err(e) => return Err(missing_raid(e)),
                };

                RaidLifecycle::from_state(state)
                    .refresh_logged(self.raid_id)
                    .await;
                for participant in removed {
                    reply(
                        state,
                        participant.user_id,
                        &format!(
                            "The role {} was removed from an event you signed up for. Please sign up again.",
                            name
                        ),
                    )
                    .await;
                }
                self.reload_roles(state).await?;
            }
        }

        if self.step != EditStep::Menu {
            reply(state, user_id, "Event updated.").await;
        }
        Ok(StepOutcome::Done)
    }

    fn next_step(&self) -> Option<EditStep> {
        match self.step {
            EditStep::Menu => self.selected,
            _ => Some(EditStep::Menu),
        }
    }

    fn release(&self, state: &BotState) {
        state.locks.release(LockScope::Raid, self.raid_id);
    }

    async fn complete(self, _state: &BotState, _user_id: u64) -> Option<String> {
        Some("Finished editing the event.".to_string())
    }
}
